//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::catalog::{InMemoryCatalog, Product};
use storefront_commerce::checkout::{Locale, OrderField, ValidationSchema};

/// File names searched for when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Shop settings.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Products to seed the catalog with.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Order form rules.
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Resolved message language.
    pub fn locale(&self) -> Locale {
        Locale::from_code(&self.shop.locale)
    }

    /// Build the catalog, falling back to the demo products when none are
    /// configured.
    pub fn catalog(&self) -> InMemoryCatalog {
        if self.catalog.products.is_empty() {
            InMemoryCatalog::new(default_products())
        } else {
            InMemoryCatalog::new(self.catalog.products.clone())
        }
    }

    /// Build the order form schema.
    pub fn schema(&self) -> Result<ValidationSchema> {
        let Some(ref required) = self.validation.required else {
            return Ok(ValidationSchema::default());
        };

        let fields = required
            .iter()
            .map(|name| name.parse::<OrderField>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid validation.required")?;
        Ok(ValidationSchema::requiring(fields))
    }
}

/// Shop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Display name.
    #[serde(default = "default_shop_name")]
    pub name: String,

    /// Culture code for checkout messages (e.g. "en", "fr-FR").
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_shop_name() -> String {
    "Storefront".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: default_shop_name(),
            locale: default_locale(),
        }
    }
}

/// Catalog seed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Order form rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Fields that must be filled in. Unset means name, address, city and
    /// country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

/// Products used when the config file lists none.
pub fn default_products() -> Vec<Product> {
    vec![
        Product::new(1, "Echo Dot", 92.50, 10)
            .with_description("Smart speaker with Alexa")
            .with_details("Voice-controlled speaker, charcoal fabric"),
        Product::new(2, "Anker 3ft / 0.9m Nylon Braided Cable", 9.99, 20)
            .with_description("Lightning to USB cable"),
        Product::new(3, "JVC HAFX8R Headphone", 69.99, 30)
            .with_description("Riptidz in-ear headphones"),
        Product::new(4, "VTech CS6114 DECT 6.0", 32.50, 40)
            .with_description("Cordless phone with caller ID"),
        Product::new(5, "NOKIA OEM BL-5J", 895.00, 50).with_description("Cell phone battery"),
    ]
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Storefront configuration

[shop]
name = "{name}"
# Checkout message language: en, fr or es
locale = "en"

[validation]
required = ["name", "address", "city", "country"]

[[catalog.products]]
id = 1
name = "Echo Dot"
description = "Smart speaker with Alexa"
price = 92.5
stock = 10

[[catalog.products]]
id = 2
name = "Anker 3ft / 0.9m Nylon Braided Cable"
description = "Lightning to USB cable"
price = 9.99
stock = 20
"#,
        name = name
    )
}
