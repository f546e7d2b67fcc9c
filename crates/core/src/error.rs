//! Error types for quotetree operations.
//!
//! Rebuilding a reply tree never fails on malformed input: bad records are
//! dropped and unmatched quotes simply produce no edge. [`ThreadError`] only
//! covers the parts that can genuinely go wrong, which are compiling the
//! configured boilerplate patterns and encoding output.
//!
//! # Example
//!
//! ```rust
//! use quotetree_core::{ThreadConfig, ThreadError};
//!
//! let config = ThreadConfig::builder().watermark("").build();
//! match quotetree_core::ThreadBuilder::with_config(config) {
//!     Err(ThreadError::ConfigError(msg)) => println!("bad config: {}", msg),
//!     Err(e) => println!("Error: {}", e),
//!     Ok(_) => {}
//! }
//! ```

use thiserror::Error;

/// Main error type for thread reconstruction.
#[derive(Error, Debug)]
pub enum ThreadError {
    /// A boilerplate pattern could not be compiled.
    ///
    /// Patterns are assembled from configuration (the site watermark), so a
    /// failure here points at a bad configuration value rather than bad input.
    #[error("Invalid boilerplate pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// JSON encoding of a thread hierarchy failed.
    #[error("Failed to serialize thread: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration value is unusable.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for ThreadError.
pub type Result<T> = std::result::Result<T, ThreadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThreadError::ConfigError("watermark must not be empty".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("watermark"));
    }

    #[test]
    fn test_invalid_pattern_error() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err = ThreadError::from(regex_err);
        assert!(err.to_string().starts_with("Invalid boilerplate pattern"));
    }

    #[test]
    fn test_serialization_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ThreadError::from(json_err);
        assert!(matches!(err, ThreadError::Serialization(_)));
    }
}
