use thiserror::Error;

/// Errors raised while building or querying the listing collection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate listing id '{0}' in dataset")]
    DuplicateId(String),

    #[error("listing '{0}' not found")]
    NotFound(String),
}

/// Reasons a drag payload is rejected at the protocol boundary
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("no data under transfer key '{0}'")]
    Missing(&'static str),

    #[error("empty listing id in remove payload")]
    EmptyId,

    #[error("malformed listing payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
