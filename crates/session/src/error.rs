use thiserror::Error;

use keystone_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A login action was built from an incomplete or invalid identity.
    /// The store is left untouched.
    #[error("malformed identity: {0}")]
    MalformedIdentity(#[from] DomainError),

    /// The dispatcher task has stopped.
    #[error("session dispatcher is closed")]
    DispatcherClosed,
}
