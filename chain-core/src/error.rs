//! Error types for chain operations
//!
//! The core chain contract answers with booleans (`add_block`,
//! `validate_chain`, `are_linked`). The `Result`-returning companions
//! (`append`, `ensure_valid`, config loading) report *why* something failed
//! through [`ChainError`].
//!
//! # Error Codes
//!
//! Each variant has a stable error code (e.g., `EMPTY_PAYLOAD`) suitable for
//! logging and programmatic handling.
//!
//! # Example
//!
//! ```rust
//! use chain_core::{ChainService, ChainError, ErrorCategory, SystemClock};
//!
//! let mut chain = ChainService::new(SystemClock::new());
//! match chain.append("   ") {
//!     Err(err) => {
//!         assert_eq!(err.error_code(), "EMPTY_PAYLOAD");
//!         assert_eq!(err.category(), ErrorCategory::Validation);
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::LinkFault;

/// Result type alias for chain operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Input validation failed
    Validation,
    /// Data integrity error
    Integrity,
    /// External failure (I/O, JSON)
    External,
}

/// Errors that can occur in chain operations
#[derive(Error, Debug)]
pub enum ChainError {
    // ═══════════════════════════════════════════════════════════════════════
    // Append errors
    // ═══════════════════════════════════════════════════════════════════════

    /// Payload was empty or contained only whitespace
    #[error("Block payload must not be empty or whitespace-only")]
    EmptyPayload,

    // ═══════════════════════════════════════════════════════════════════════
    // Integrity errors
    // ═══════════════════════════════════════════════════════════════════════

    /// Chain verification failed at the given block
    #[error("Chain integrity failure at block {index}: {fault}. The chain may have been tampered with.")]
    ChainIntegrity { index: usize, fault: LinkFault },

    // ═══════════════════════════════════════════════════════════════════════
    // Configuration and infrastructure errors
    // ═══════════════════════════════════════════════════════════════════════

    /// Configuration value could not be interpreted
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("IO error: {message}")]
    IoError { message: String },
}

impl ChainError {
    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChainError::EmptyPayload | ChainError::InvalidConfig { .. } => {
                ErrorCategory::Validation
            }
            ChainError::ChainIntegrity { .. } => ErrorCategory::Integrity,
            ChainError::JsonError(_) | ChainError::IoError { .. } => ErrorCategory::External,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ChainError::EmptyPayload => "EMPTY_PAYLOAD",
            ChainError::ChainIntegrity { .. } => "CHAIN_INTEGRITY_ERROR",
            ChainError::InvalidConfig { .. } => "INVALID_CONFIG",
            ChainError::JsonError(_) => "JSON_ERROR",
            ChainError::IoError { .. } => "IO_ERROR",
        }
    }

    /// Returns true if the caller can fix the problem by changing its input
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ChainError::EmptyPayload.error_code(), "EMPTY_PAYLOAD");
        assert_eq!(
            ChainError::ChainIntegrity {
                index: 3,
                fault: LinkFault::Tampered,
            }
            .error_code(),
            "CHAIN_INTEGRITY_ERROR"
        );
        assert_eq!(
            ChainError::InvalidConfig {
                reason: "x".to_string()
            }
            .error_code(),
            "INVALID_CONFIG"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(ChainError::EmptyPayload.category(), ErrorCategory::Validation);
        assert!(ChainError::EmptyPayload.is_client_error());

        let integrity = ChainError::ChainIntegrity {
            index: 1,
            fault: LinkFault::PredecessorHashMismatch,
        };
        assert_eq!(integrity.category(), ErrorCategory::Integrity);
        assert!(!integrity.is_client_error());
    }

    #[test]
    fn test_integrity_message_names_block_and_fault() {
        let err = ChainError::ChainIntegrity {
            index: 2,
            fault: LinkFault::IndexGap,
        };
        let message = err.to_string();
        assert!(message.contains("block 2"));
        assert!(message.contains("index_gap"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: ChainError = io.into();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert_eq!(err.category(), ErrorCategory::External);
    }
}
