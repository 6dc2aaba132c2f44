//! CLI configuration.

use anyhow::{Context, Result};
use feast_commerce::cart::PricingConfig;
use feast_observability::LogConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Fees and promo codes.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Restaurant catalog location.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout behaviour.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Log level and format.
    #[serde(default)]
    pub logging: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config content; JSON when the path ends in `.json`, TOML otherwise.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Catalog location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog TOML file, relative to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Checkout configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Pause before an order is confirmed, in milliseconds.
    #[serde(default)]
    pub submit_delay_ms: u64,
}

/// Generate a default feast.toml config file.
pub fn generate_default_config(catalog_path: &str) -> String {
    format!(
        r#"# Feast configuration

[pricing]
currency = "EUR"
delivery_fee = 3.90
pickup_fee = 0.0

[[pricing.promos]]
code = "WELCOME10"
percent = 10.0
description = "10% off your order"

[catalog]
path = "{catalog_path}"

[checkout]
submit_delay_ms = 0

[logging]
level = "info"
format = "human"
"#,
        catalog_path = catalog_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use feast_commerce::cart::Pricing;
    use feast_observability::{LogFormat, LogLevel};

    #[test]
    fn test_default_config_round_trips() {
        let config = CliConfig::parse("feast.toml", &generate_default_config("catalog.toml"))
            .unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("catalog.toml"));
        assert_eq!(config.checkout.submit_delay_ms, 0);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.pricing.build().unwrap(), Pricing::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse("feast.toml", "").unwrap();
        assert!(config.catalog.path.is_none());
        assert_eq!(config.pricing.build().unwrap(), Pricing::default());
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            "feast.json",
            r#"{"checkout": {"submit_delay_ms": 1500}, "logging": {"format": "json"}}"#,
        )
        .unwrap();
        assert_eq!(config.checkout.submit_delay_ms, 1500);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let err = CliConfig::parse("feast.toml", "[pricing\n").unwrap_err();
        assert!(format!("{:#}", err).contains("feast.toml"));
    }
}
