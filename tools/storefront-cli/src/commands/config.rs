//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use storefront_commerce::checkout::{Locale, OrderField};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[shop]");
    ctx.output.kv("name", &ctx.config.shop.name);
    ctx.output.kv("locale", &ctx.config.shop.locale);
    ctx.output.kv("effective locale", ctx.locale.code());

    ctx.output.info("");
    ctx.output.info("[validation]");
    let schema = ctx.config.schema()?;
    for field in OrderField::ALL {
        ctx.output
            .kv(field.as_str(), &format!("{:?}", schema.rule(field)).to_lowercase());
    }

    ctx.output.info("");
    if ctx.config.catalog.products.is_empty() {
        ctx.output.info("[catalog] (built-in demo products)");
    } else {
        ctx.output.info("[catalog]");
        for product in &ctx.config.catalog.products {
            ctx.output.list_item(&format!("{} {}", product.id, product.name));
        }
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(ref config_path) = ctx.config_path else {
        bail!("No config file found. Run `storefront config init` to create one.");
    };
    let config_path = config_path.to_string_lossy();

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let name = ctx
        .cwd
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("My Storefront");

    fs::write(&config_path, generate_default_config(name))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = config_errors(&ctx.config);
    let warnings = config_warnings(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn config_errors(config: &CliConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if let Err(e) = config.schema() {
        errors.push(format!("{:#}", e));
    }

    let products = &config.catalog.products;
    for (i, product) in products.iter().enumerate() {
        if product.price < 0.0 || !product.price.is_finite() {
            errors.push(format!("catalog.products[{}].price must be a non-negative number", i));
        }
        if product.stock < 0 {
            errors.push(format!("catalog.products[{}].stock must not be negative", i));
        }
        if products[..i].iter().any(|p| p.id == product.id) {
            errors.push(format!("catalog.products[{}].id {} is a duplicate", i, product.id));
        }
    }

    errors
}

fn config_warnings(config: &CliConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    let locale = Locale::from_code(&config.shop.locale);
    if !config.shop.locale.to_lowercase().starts_with(locale.code()) {
        warnings.push(format!(
            "shop.locale '{}' is not supported, falling back to '{}'",
            config.shop.locale, locale
        ));
    }

    for (i, product) in config.catalog.products.iter().enumerate() {
        if product.name.trim().is_empty() {
            warnings.push(format!("catalog.products[{}].name is empty", i));
        }
    }

    warnings
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["shop", "name"] => Ok(config.shop.name.clone()),
        ["shop", "locale"] => Ok(config.shop.locale.clone()),
        ["validation", "required"] => Ok(config
            .validation
            .required
            .as_ref()
            .map(|r| r.join(","))
            .unwrap_or_else(|| "name,address,city,country".to_string())),
        ["catalog", "products"] => Ok(config.catalog.products.len().to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["shop", "name"] => config.shop.name = value.to_string(),
        ["shop", "locale"] => config.shop.locale = value.to_string(),
        ["validation", "required"] => {
            config.validation.required = Some(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            );
            config.schema()?;
        }
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;
    use storefront_commerce::catalog::Product;

    #[test]
    fn test_set_writes_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        fs::write(&path, "[shop]\nname = \"X\"\n").unwrap();
        let path = path.to_str().unwrap();

        let ctx = Context::load(Some(path), None, Output::new(false, true)).unwrap();
        set_config("shop.name", "Y", &ctx).unwrap();

        assert_eq!(CliConfig::load(path).unwrap().shop.name, "Y");
    }

    #[test]
    fn test_set_without_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
            config_path: None,
            locale: Locale::En,
        };

        let err = set_config("shop.name", "Y", &ctx).unwrap_err();
        assert!(err.to_string().contains("No config file found"));
    }

    #[test]
    fn test_get_and_set_values() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "shop.locale", "fr").unwrap();
        set_config_value(&mut config, "validation.required", "name, zip").unwrap();

        assert_eq!(get_config_value(&config, "shop.locale").unwrap(), "fr");
        assert_eq!(
            get_config_value(&config, "validation.required").unwrap(),
            "name,zip"
        );
        assert!(get_config_value(&config, "shop.owner").is_err());
    }

    #[test]
    fn test_set_rejects_unknown_field() {
        let mut config = CliConfig::default();
        assert!(set_config_value(&mut config, "validation.required", "email").is_err());
    }

    #[test]
    fn test_config_errors() {
        let mut config = CliConfig::default();
        config.catalog.products = vec![
            Product::new(1, "A", 1.0, 1),
            Product::new(1, "B", -2.0, -1),
        ];

        let errors = config_errors(&config);
        assert_eq!(errors.len(), 3);
        assert!(errors[2].contains("duplicate"));
    }

    #[test]
    fn test_unsupported_locale_warns() {
        let mut config = CliConfig::default();
        assert!(config_warnings(&config).is_empty());

        config.shop.locale = "de-DE".to_string();
        assert_eq!(config_warnings(&config).len(), 1);

        config.shop.locale = "fr-CA".to_string();
        assert!(config_warnings(&config).is_empty());
    }
}
