//! Ports infrastructure for the storage boundary
//!
//! The ledger core never talks to a database directly. Each domain
//! defines a port trait describing what it needs from its data source,
//! and adapters (in-memory, SQL, mock) implement those traits. The core
//! performs a read-snapshot, compute, single-batch-write sequence and
//! relies on the adapter to serialize concurrent writers for the same
//! tenant.
//!
//! ```rust,ignore
//! // In domain_ledger/src/ports.rs
//! #[async_trait]
//! pub trait LedgerStore: DomainPort {
//!     async fn charges_for_tenant(&self, id: TenantId) -> Result<Vec<Charge>, PortError>;
//! }
//!
//! // In infra_mem - in-memory adapter
//! impl LedgerStore for InMemoryStore { ... }
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// ensuring consistent error handling across adapters.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Validation error with field information
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Tenant", "123");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("Tenant"));
        assert!(error.to_string().contains("123"));
    }

    #[test]
    fn test_port_error_validation_field() {
        let error = PortError::validation_field("must be positive", "amount");
        assert!(!error.is_not_found());
        assert!(error.to_string().contains("must be positive"));
    }
}
