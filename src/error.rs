//! Error types for index construction, encoding and queries.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    /// A degree value outside the geographic domain, or not finite.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    /// A range whose minimum is greater than its maximum.
    #[error("Invalid range: min ({min}) greater than max ({max})")]
    InvalidRange { min: u64, max: u64 },
    /// A query rectangle whose northeast corner is south or west of its southwest corner.
    #[error("Invalid sector: {0}")]
    InvalidSector(String),
    #[error("Invalid fixed-point format: {0}")]
    InvalidFixedFormat(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::InvalidConfig(err.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for IndexError {
    fn from(err: toml::de::Error) -> Self {
        IndexError::InvalidConfig(err.to_string())
    }
}
