use thiserror::Error;

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable required by the application is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A setting is present but its value cannot be used.
    #[error("Invalid value for `{key}`: {message}")]
    InvalidValue { key: String, message: String },

    /// The configuration source could not be read.
    #[error("Failed to read configuration from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The configuration source could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidValue`].
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
