//! # Error Types
//!
//! Typed failure taxonomy for the engine. Callers branch on the variant:
//! not-found and validation failures reject the request with no writes,
//! `DuplicateConfiguration` is a distinct conflict so callers can present a
//! specific remediation, and `Sync` surfaces after the local write has
//! already committed (the local state stands and is not rolled back).

use crate::model::MethodId;
use std::fmt;

/// Engine failure taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The named site is unknown
    SiteNotFound(String),
    /// No method exists with the given identifier
    MethodNotFound(MethodId),
    /// The site is known but declares no uniqueness dimensions
    SchemaMissing(String),
    /// Malformed carrier-string input
    InvalidCarrierString(String),
    /// An enabled method already occupies the candidate's eligibility tuple
    DuplicateConfiguration,
    /// Persistence failure, surfaced unchanged and not retried
    Storage(String),
    /// Downstream sync failure after a committed local write
    Sync(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SiteNotFound(site) => write!(f, "site not found: {}", site),
            EngineError::MethodNotFound(id) => write!(f, "shipping method not found: {}", id),
            EngineError::SchemaMissing(site) => {
                write!(f, "site {} declares no uniqueness dimensions", site)
            }
            EngineError::InvalidCarrierString(detail) => {
                write!(f, "invalid carrier string: {}", detail)
            }
            EngineError::DuplicateConfiguration => {
                write!(f, "an enabled shipping method with the same eligibility already exists")
            }
            EngineError::Storage(detail) => write!(f, "storage failure: {}", detail),
            EngineError::Sync(detail) => {
                write!(f, "downstream sync failed after local write: {}", detail)
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EngineError::SiteNotFound("site-AT".to_string());
        assert_eq!(err.to_string(), "site not found: site-AT");

        let err = EngineError::DuplicateConfiguration;
        assert!(err.to_string().contains("already exists"));
    }
}
