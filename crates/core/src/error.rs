use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A path identifier that is not a positive base-10 integer.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A request body that is not a JSON object of the expected shape.
    #[error("Invalid request format: {0}")]
    InvalidFormat(String),

    /// One or more rule violations, in discovery order.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}
