//! Error handling for schema translation and enforcement.

use arrow_schema::ArrowError;

/// Errors that can occur during schema translation, inference, or enforcement
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A representation name outside the five supported ones
    #[error("Unsupported schema representation: {0}")]
    UnsupportedRepresentation(String),

    /// A type token with no equivalent in the requested representation
    #[error("Unsupported schema type '{token}' for field '{field}'")]
    UnsupportedType {
        /// Field whose type could not be translated
        field: String,
        /// The offending type token
        token: String,
    },

    /// The detector could not uniquely identify a representation and no
    /// explicit hint was given
    #[error("Unrecognized schema: {0}")]
    UnrecognizedSchema(String),

    /// Schema inference was given unusable data
    #[error("Inference error: {0}")]
    Inference(String),

    /// A column could not be coerced under its rule (or any fallback rule)
    #[error("Could not enforce schema on column '{column}': {message}")]
    Enforcement {
        /// The column being enforced
        column: String,
        /// The rule(s) attempted and why they failed
        message: String,
    },

    /// Arrow error propagated from casts or batch construction
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;
