//! Error types for Zitify
//!
//! Uses `thiserror` for library errors. Only structural problems in the
//! deployment model and unreadable on-disk fragments are fatal; everything
//! version-control related degrades to a warning instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::services::CompileError;

/// Result type alias for Zitify operations
pub type ZitifyResult<T> = Result<T, ZitifyError>;

/// Main error type for Zitify operations
#[derive(Error, Debug)]
pub enum ZitifyError {
    /// A fragment on disk is not a valid YAML document
    #[error("invalid fragment {path}: {message}")]
    FragmentParse { path: PathBuf, message: String },

    /// The merged model does not have the shape of a deployment model
    #[error("invalid deployment model: {message}")]
    InvalidModel { message: String },

    /// Structural error raised while compiling the model
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Tool configuration could not be parsed
    #[error("invalid config {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Base directory does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
