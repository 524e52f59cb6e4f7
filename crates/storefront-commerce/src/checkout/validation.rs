//! Order form validation with localized messages.

use crate::checkout::OrderForm;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Languages messages can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Es,
}

impl Locale {
    /// Two-letter language code.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Es => "es",
        }
    }

    /// Resolve a culture code such as `fr`, `fr-FR` or `es_ES`.
    ///
    /// Unsupported languages fall back to English.
    pub fn from_code(code: &str) -> Self {
        let language = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match language.as_str() {
            "fr" => Locale::Fr,
            "es" => Locale::Es,
            _ => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Keys for user-facing checkout messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    ErrorMissingName,
    ErrorMissingAddress,
    ErrorMissingCity,
    ErrorMissingZip,
    ErrorMissingCountry,
    CartEmpty,
}

impl MessageKey {
    /// Localized text for this key.
    pub fn message(&self, locale: Locale) -> &'static str {
        use Locale::*;
        use MessageKey::*;
        match (self, locale) {
            (ErrorMissingName, En) => "Please enter your name",
            (ErrorMissingName, Fr) => "Veuillez saisir votre nom",
            (ErrorMissingName, Es) => "Por favor, introduzca su nombre",
            (ErrorMissingAddress, En) => "Please enter your address",
            (ErrorMissingAddress, Fr) => "Veuillez saisir votre adresse",
            (ErrorMissingAddress, Es) => "Por favor, introduzca su dirección",
            (ErrorMissingCity, En) => "Please enter your city",
            (ErrorMissingCity, Fr) => "Veuillez saisir votre ville",
            (ErrorMissingCity, Es) => "Por favor, introduzca su ciudad",
            (ErrorMissingZip, En) => "Please enter your zip code",
            (ErrorMissingZip, Fr) => "Veuillez saisir votre code postal",
            (ErrorMissingZip, Es) => "Por favor, introduzca su código postal",
            (ErrorMissingCountry, En) => "Please enter your country",
            (ErrorMissingCountry, Fr) => "Veuillez saisir votre pays",
            (ErrorMissingCountry, Es) => "Por favor, introduzca su país",
            (CartEmpty, En) => "Your cart is empty",
            (CartEmpty, Fr) => "Votre panier est vide",
            (CartEmpty, Es) => "Su carrito está vacío",
        }
    }
}

/// Contact and shipping fields on an order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Name,
    Address,
    City,
    Zip,
    Country,
}

impl OrderField {
    pub const ALL: [OrderField; 5] = [
        OrderField::Name,
        OrderField::Address,
        OrderField::City,
        OrderField::Zip,
        OrderField::Country,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Name => "name",
            OrderField::Address => "address",
            OrderField::City => "city",
            OrderField::Zip => "zip",
            OrderField::Country => "country",
        }
    }

    /// Message shown when this field is required but missing.
    pub fn missing_message(&self) -> MessageKey {
        match self {
            OrderField::Name => MessageKey::ErrorMissingName,
            OrderField::Address => MessageKey::ErrorMissingAddress,
            OrderField::City => MessageKey::ErrorMissingCity,
            OrderField::Zip => MessageKey::ErrorMissingZip,
            OrderField::Country => MessageKey::ErrorMissingCountry,
        }
    }
}

impl FromStr for OrderField {
    type Err = UnknownOrderField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(OrderField::Name),
            "address" => Ok(OrderField::Address),
            "city" => Ok(OrderField::City),
            "zip" => Ok(OrderField::Zip),
            "country" => Ok(OrderField::Country),
            _ => Err(UnknownOrderField(s.trim().to_string())),
        }
    }
}

/// Field name that is not part of the order form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown order field: {0}")]
pub struct UnknownOrderField(pub String);

/// Whether a field must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldRule {
    Required,
    #[default]
    Optional,
}

/// Field rules for an order form. Stateless; validating never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSchema {
    rules: BTreeMap<OrderField, FieldRule>,
}

impl ValidationSchema {
    /// Schema where exactly `required` must be present.
    pub fn requiring(required: impl IntoIterator<Item = OrderField>) -> Self {
        let mut rules: BTreeMap<OrderField, FieldRule> = OrderField::ALL
            .iter()
            .map(|f| (*f, FieldRule::Optional))
            .collect();
        for field in required {
            rules.insert(field, FieldRule::Required);
        }
        Self { rules }
    }

    /// Override the rule for one field.
    pub fn with_rule(mut self, field: OrderField, rule: FieldRule) -> Self {
        self.rules.insert(field, rule);
        self
    }

    pub fn rule(&self, field: OrderField) -> FieldRule {
        self.rules.get(&field).copied().unwrap_or_default()
    }

    /// Check a form. Blank or whitespace-only values count as missing.
    pub fn validate(&self, form: &OrderForm) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = self
            .rules
            .iter()
            .filter(|(_, rule)| **rule == FieldRule::Required)
            .filter(|(field, _)| form.value(**field).is_none())
            .map(|(field, _)| FieldError {
                field: *field,
                message: field.missing_message(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

impl Default for ValidationSchema {
    /// Name, address, city and country required; zip optional.
    fn default() -> Self {
        Self::requiring([
            OrderField::Name,
            OrderField::Address,
            OrderField::City,
            OrderField::Country,
        ])
    }
}

/// A single failed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: OrderField,
    pub message: MessageKey,
}

/// All failed fields of a form, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Check whether a field failed.
    pub fn has(&self, field: OrderField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Render every message in the given language.
    pub fn messages(&self, locale: Locale) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.message.message(locale)).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages(Locale::En).join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> OrderForm {
        OrderForm {
            name: Some("Ada Lovelace".into()),
            address: Some("12 St James's Square".into()),
            city: Some("London".into()),
            zip: None,
            country: Some("United Kingdom".into()),
        }
    }

    #[test]
    fn test_locale_from_code() {
        assert_eq!(Locale::from_code("fr-FR"), Locale::Fr);
        assert_eq!(Locale::from_code("es_ES"), Locale::Es);
        assert_eq!(Locale::from_code("EN"), Locale::En);
        assert_eq!(Locale::from_code("de"), Locale::En);
        assert_eq!(Locale::from_code(""), Locale::En);
    }

    #[test]
    fn test_default_schema_accepts_missing_zip() {
        assert!(ValidationSchema::default().validate(&complete_form()).is_ok());
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let form = OrderForm {
            name: Some("   ".into()),
            city: Some("Paris".into()),
            ..Default::default()
        };

        let errors = ValidationSchema::default().validate(&form).unwrap_err();
        let fields: Vec<OrderField> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![OrderField::Name, OrderField::Address, OrderField::Country]
        );
        assert!(!errors.has(OrderField::City));
    }

    #[test]
    fn test_messages_are_localized() {
        let form = OrderForm {
            address: Some("1 rue de Rivoli".into()),
            city: Some("Paris".into()),
            country: Some("France".into()),
            ..Default::default()
        };
        let errors = ValidationSchema::default().validate(&form).unwrap_err();

        assert_eq!(errors.messages(Locale::Fr), vec!["Veuillez saisir votre nom"]);
        assert_eq!(errors.messages(Locale::Es), vec!["Por favor, introduzca su nombre"]);
        assert_eq!(errors.to_string(), "Please enter your name");
    }

    #[test]
    fn test_custom_rules() {
        let schema = ValidationSchema::default().with_rule(OrderField::Zip, FieldRule::Required);
        let errors = schema.validate(&complete_form()).unwrap_err();
        assert_eq!(errors.messages(Locale::En), vec!["Please enter your zip code"]);

        let lenient = ValidationSchema::requiring(Vec::<OrderField>::new());
        assert!(lenient.validate(&OrderForm::default()).is_ok());
        assert_eq!(lenient.rule(OrderField::Name), FieldRule::Optional);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!(" Country ".parse::<OrderField>(), Ok(OrderField::Country));
        assert_eq!(
            "email".parse::<OrderField>(),
            Err(UnknownOrderField("email".to_string()))
        );
    }
}
