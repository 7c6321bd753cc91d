// src/errors.rs

//! Crate-wide error type for the configuration, CLI and host layers.
//!
//! Process failures (spawn, wait, non-zero exit) are not errors here: they
//! are reported as values in [`crate::exec::ExecutionResult`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuncapError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RuncapError>;
