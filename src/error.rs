//! Error classes shared across the decision engine.
//!
//! Callers are expected to match on variants, never on the `Display` text:
//! the class is the contract, the message is just for logs and HTTP bodies.

use thiserror::Error;

/// Errors raised while canonicalizing or looking up an IP entity.
#[derive(Error, Debug)]
pub enum AclError {
    #[error("empty ip address")]
    EmptyIp,

    #[error("invalid ip address: {0}")]
    ParseIp(#[from] ipnetwork::IpNetworkError),

    #[error("store used before initialization")]
    InvalidInitialization,

    #[error("entity is missing ip or mask")]
    InvalidEntity,

    #[error("not found")]
    NotFound,

    #[error("facade has no backing store")]
    InvalidStorage,

    #[error("request canceled")]
    Canceled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl AclError {
    /// True for the one class the decision pipeline treats as "not present"
    /// rather than as a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AclError::NotFound)
    }

    /// HTTP status this class mirrors, per the error handling design.
    pub fn status_code(&self) -> u16 {
        match self {
            AclError::EmptyIp | AclError::ParseIp(_) => 400,
            AclError::Canceled | AclError::DeadlineExceeded => 400,
            AclError::NotFound => 404,
            AclError::InvalidStorage
            | AclError::InvalidInitialization
            | AclError::InvalidEntity => 500,
        }
    }
}
