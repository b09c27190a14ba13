//! Builder-time validation failures.

use thiserror::Error;

/// Failure building a [`crate::Config`].
///
/// This is the library's only error type: every other "failure" mode
/// (limit exceeded, unreachable `normType`) folds into the `f64::INFINITY`
/// sentinel or is ruled out statically by the type system.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tokenSep must be exactly one Unicode scalar, got {0:?} ({1} scalars)")]
    InvalidTokenSep(String, usize),

    #[error("invalid tokenSplit pattern {pattern:?}: {reason}")]
    InvalidTokenSplit { pattern: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
