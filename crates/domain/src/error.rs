//! Common error types used across the workspace.
//!
//! Each failure path is a distinct kind so that callers (in practice the
//! HTTP adapter) can map it deterministically: validation and update
//! rejections become client errors, not-found stays not-found, operation
//! rejections become conflicts, and storage failures stay opaque.

/// Top-level error type shared by the domain, application, and adapters.
#[derive(Debug, thiserror::Error)]
pub enum DepotError {
    /// A field-level invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// An update was refused by a lifecycle guard.
    #[error("update rejected")]
    UpdateRejected(#[from] UpdateRejectedError),

    /// A non-update operation (delete) was refused by a lifecycle guard.
    #[error("operation rejected")]
    OperationRejected(#[from] OperationRejectedError),

    /// The persistence layer failed. Never retried by the core.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Field-level invariant violations on a device record.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("device name cannot be blank")]
    EmptyName,
    #[error("brand cannot be blank")]
    EmptyBrand,
    #[error("device name must be at most {0} characters")]
    NameTooLong(usize),
    #[error("brand must be at most {0} characters")]
    BrandTooLong(usize),
    #[error("updated timestamp cannot precede creation timestamp")]
    TimestampOrder,
}

/// A lookup by identifier found nothing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    /// Human-readable entity kind (e.g. `"Device"`).
    pub entity: &'static str,
    /// The identifier that was requested.
    pub id: String,
}

/// Reasons an update request is refused as a whole.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UpdateRejectedError {
    /// Name or brand may not change while the device is in use.
    #[error("cannot update name or brand when device is in use")]
    FieldsLockedWhileInUse,
    /// The supplied state is not a member of the enumeration.
    #[error("invalid state value: {0}")]
    InvalidState(String),
}

/// Reasons a non-update operation is refused.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OperationRejectedError {
    /// Devices that are in use cannot be removed.
    #[error("cannot delete device in use")]
    DeleteWhileInUse,
}
