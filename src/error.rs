//! Error types.
//!
//! Kernel errors are precondition violations: the caller passed a value the
//! geometry model cannot work with. They are not recoverable runtime
//! conditions and nothing retries them.

use std::path::PathBuf;

/// Precondition violation raised by the geometry model.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum KernelError {
    /// A vector argument has a NaN or infinite component.
    #[error("{what} must be a finite vector, got ({x}, {y})")]
    NonFinite { what: &'static str, x: f64, y: f64 },

    /// Elapsed tick time is NaN or infinite.
    #[error("time must be finite, got {0}")]
    NonFiniteTime(f64),

    /// A size vector has a negative component.
    #[error("size must not be negative, got ({x}, {y})")]
    NegativeSize { x: f64, y: f64 },
}

pub type Result<T> = std::result::Result<T, KernelError>;

/// Failure to load an explicit configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
