//! Configuration error type

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Unknown transport provider: {0}. Supported providers: http, mock")]
    UnknownTransport(String),
}
