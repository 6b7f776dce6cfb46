//! Storefront configuration

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    cart::UnresolvedNamePolicy,
    catalog::{Catalog, CatalogError},
};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable single line events
    #[default]
    Compact,

    /// One JSON object per event
    Json,
}

/// Bakery storefront configuration
#[derive(Debug, Parser)]
#[command(name = "bakery", about = "Bakery storefront", long_about = None)]
pub struct AppConfig {
    /// YAML catalog fixture; the built-in bakery catalog is used when absent
    #[arg(short, long, env = "BAKERY_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// What to do with imported item names that are not in the catalog
    #[arg(
        long,
        env = "BAKERY_ON_UNRESOLVED_NAME",
        value_enum,
        default_value_t = UnresolvedNamePolicy::SynthesizePlaceholder
    )]
    pub on_unresolved_name: UnresolvedNamePolicy,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format
    #[arg(long, env = "BAKERY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Build the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog fixture cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::from_yaml_file(path),
            None => Ok(Catalog::bakery()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::catalog::CatalogProvider;

    #[test]
    fn defaults() -> TestResult {
        let config = AppConfig::try_parse_from(["bakery"])?;

        assert_eq!(config.catalog, None);
        assert_eq!(
            config.on_unresolved_name,
            UnresolvedNamePolicy::SynthesizePlaceholder
        );
        assert_eq!(config.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn parses_policy_and_format() -> TestResult {
        let config = AppConfig::try_parse_from([
            "bakery",
            "--on-unresolved-name",
            "skip",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.on_unresolved_name, UnresolvedNamePolicy::Skip);
        assert_eq!(config.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn rejects_unknown_policy() {
        let result = AppConfig::try_parse_from(["bakery", "--on-unresolved-name", "guess"]);

        assert!(result.is_err());
    }

    #[test]
    fn built_in_catalog_without_path() -> TestResult {
        let config = AppConfig::try_parse_from(["bakery"])?;

        assert_eq!(config.catalog()?.len(), Catalog::bakery().len());

        Ok(())
    }

    #[test]
    fn loads_catalog_fixture() -> TestResult {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalogs/bakery.yml");
        let config = AppConfig::try_parse_from(["bakery", "--catalog", path])?;

        let catalog = config.catalog()?;

        assert_eq!(catalog.currency(), rusty_money::iso::RUB);
        assert!(catalog.find("Baguette").is_some());

        Ok(())
    }
}
