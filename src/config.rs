use crate::error::ConfigError;
use crate::filter::SearchFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

/// Top-level configuration, read from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub dataset: DatasetConfig,
    pub logging: LoggingConfig,
    pub search: SearchDefaults,
}

/// Where the listing dataset comes from; `url` wins over `path`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub url: Option<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/properties.json"),
            url: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "compact".into(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber; `RUST_LOG` overrides the configured level
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "pretty" => fmt().pretty().with_env_filter(filter).init(),
            _ => fmt().compact().with_env_filter(filter).init(),
        }
    }
}

/// Initial filter values, written the way the search form would submit them
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_bedrooms: Option<String>,
    pub max_bedrooms: Option<String>,
    pub postcode: Option<String>,
    pub date_after: Option<String>,
    pub date_before: Option<String>,
}

impl SearchDefaults {
    /// Feed every present value through the filter's field updaters
    pub fn apply(&self, search: &mut SearchFilter) {
        let fields: [(&Option<String>, fn(&mut SearchFilter, &str)); 8] = [
            (&self.property_type, SearchFilter::set_type),
            (&self.min_price, SearchFilter::set_min_price),
            (&self.max_price, SearchFilter::set_max_price),
            (&self.min_bedrooms, SearchFilter::set_min_bedrooms),
            (&self.max_bedrooms, SearchFilter::set_max_bedrooms),
            (&self.postcode, SearchFilter::set_postcode),
            (&self.date_after, SearchFilter::set_date_after),
            (&self.date_before, SearchFilter::set_date_before),
        ];

        for (value, setter) in fields {
            if let Some(raw) = value {
                setter(search, raw);
            }
        }
    }
}

impl CatalogConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: CatalogConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "dataset.url",
                reason: "cannot be empty".into(),
            });
        }
        if self.dataset.url.is_none() && self.dataset.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "dataset.path",
                reason: "cannot be empty".into(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: "cannot be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::listing;
    use crate::models::PropertyType;

    #[test]
    fn empty_file_uses_defaults() {
        let config = CatalogConfig::from_toml("").unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data/properties.json"));
        assert_eq!(config.dataset.url, None);
        assert_eq!(config.logging.level, "info");
        assert!(config.search.min_price.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let config = CatalogConfig::from_toml(
            r#"
            [dataset]
            url = "https://example.com/properties.json"

            [logging]
            level = "debug"
            format = "pretty"

            [search]
            type = "Flat"
            min_price = "150000"
            postcode = "BR1"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.dataset.url.as_deref(),
            Some("https://example.com/properties.json")
        );
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.search.property_type.as_deref(), Some("Flat"));
    }

    #[test]
    fn rejects_blank_values() {
        let err = CatalogConfig::from_toml("[dataset]\nurl = \" \"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "dataset.url",
                ..
            }
        ));

        let err = CatalogConfig::from_toml("[logging]\nlevel = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            CatalogConfig::from_toml("[dataset"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn search_defaults_populate_criteria() {
        let defaults = SearchDefaults {
            property_type: Some("House".into()),
            min_price: Some("150000".into()),
            max_bedrooms: Some("oops".into()),
            ..Default::default()
        };

        let mut search = SearchFilter::new(vec![listing("a", 200_000, 2)]);
        defaults.apply(&mut search);

        let criteria = search.criteria();
        assert_eq!(criteria.property_type, Some(PropertyType::House));
        assert_eq!(criteria.min_price, Some(150_000.0));
        assert_eq!(criteria.max_bedrooms, None);
        assert_eq!(search.filtered().len(), 1);
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        tokio::fs::write(&path, "[search]\nmax_price = \"400000\"\n")
            .await
            .unwrap();

        let config = CatalogConfig::load(&path).await.unwrap();
        assert_eq!(config.search.max_price.as_deref(), Some("400000"));

        let missing = CatalogConfig::load(dir.path().join("missing.toml")).await;
        assert!(matches!(missing, Err(ConfigError::ReadFile(_))));
    }
}
