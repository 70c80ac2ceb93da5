//! Error type for engine construction and configuration.
//!
//! Gesture misses, cooldown rejections and out-of-range scale degrees are
//! ordinary outcomes and never surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid scale: {0}")]
    InvalidScale(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("could not read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
