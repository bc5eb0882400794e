//! Extension-related errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Extension not found: {0}")]
    NotFound(String),

    #[error("Extension already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Extension initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Extension dependency not satisfied: {extension} requires {dependency}")]
    DependencyNotSatisfied { extension: String, dependency: String },

    #[error("Extension shutdown failed: {0}")]
    ShutdownFailed(String),
}
