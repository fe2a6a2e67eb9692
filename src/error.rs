use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {name} is not set")]
    MissingKey { name: String },

    #[error("required environment variable {name} is empty")]
    EmptyKey { name: String },

    #[error("required key name must not be empty")]
    InvalidKeyName,
}
