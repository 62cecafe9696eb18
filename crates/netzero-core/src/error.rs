//! Error types for NetZero

use thiserror::Error;

/// Link formats the coordinate resolver understands, listed in user-facing hints.
pub const SUPPORTED_LINK_FORMATS: &str = "https://www.google.com/maps/place/<name>/@<lat>,<lng>,<zoom>z, \
     https://maps.google.com/?q=<lat>,<lng>, \
     https://maps.google.com/?ll=<lat>,<lng>, \
     https://maps.google.com/?q=<place>+<lat>,<lng>, \
     https://maps.app.goo.gl/<code>";

#[derive(Debug, Error)]
pub enum NetZeroError {
    // Registry errors
    #[error("Unknown {registry} kind: {kind}")]
    UnknownKind { registry: String, kind: String },

    #[error("Duplicate {registry} kind: {kind}")]
    DuplicateKind { registry: String, kind: String },

    // Input validation errors
    #[error("Invalid quantity for {field}: {value} (must be a finite, non-negative number)")]
    InvalidQuantity { field: String, value: f64 },

    #[error("Invalid project duration: {value} (must be a positive whole number of years)")]
    InvalidDuration { value: String },

    #[error("Invalid area unit: {unit}. Use hectares, acres, or sqkm")]
    InvalidAreaUnit { unit: String },

    // Ledger errors
    #[error("Strategy {id} cannot move from {from} to {to} without reopening it")]
    InvalidStatusTransition { id: String, from: String, to: String },

    #[error("Invalid strategy status: {value}. Use planned, in-progress, or completed")]
    InvalidStatus { value: String },

    // Coordinate resolver errors
    #[error("Redirect resolver timed out after {seconds}s")]
    ResolverTimeout { seconds: u64 },

    #[error("Redirect resolver unreachable: {reason}")]
    ResolverUnreachable { reason: String },

    #[error("Redirect resolver returned an unusable response: {reason}")]
    ResolverBadResponse { reason: String },

    #[error("Link not recognized: {url}. Supported formats: {formats}", formats = SUPPORTED_LINK_FORMATS)]
    LinkNotRecognized { url: String },

    // Persistence errors
    #[error("Stored collection '{key}' is corrupt: {reason}")]
    PersistenceCorrupt { key: String, reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl NetZeroError {
    /// Whether the caller can recover locally (manual entry, seed data, retry by the user).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NetZeroError::ResolverTimeout { .. }
                | NetZeroError::ResolverUnreachable { .. }
                | NetZeroError::ResolverBadResponse { .. }
                | NetZeroError::LinkNotRecognized { .. }
                | NetZeroError::PersistenceCorrupt { .. }
        )
    }
}

impl From<serde_json::Error> for NetZeroError {
    fn from(err: serde_json::Error) -> Self {
        NetZeroError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NetZeroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_failures_are_recoverable() {
        assert!(NetZeroError::ResolverTimeout { seconds: 5 }.is_recoverable());
        assert!(NetZeroError::LinkNotRecognized { url: "x".to_string() }.is_recoverable());
        assert!(!NetZeroError::InvalidDuration { value: "2.5".to_string() }.is_recoverable());
        assert!(!NetZeroError::ConfigMissing { key: "resolver_url".to_string() }.is_recoverable());
    }
}
