//! Error types.

use thiserror::Error;

/// Configuration could not be resolved.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document did not parse
    #[cfg(feature = "toml")]
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    /// A colour field held something `parse_color` rejects
    #[error("invalid color for `{field}`: {value:?}")]
    InvalidColor { field: &'static str, value: String },
    /// The result template would not show the rolled value
    #[error("`{field}` must contain the {{value}} placeholder")]
    MissingPlaceholder { field: &'static str },
}
