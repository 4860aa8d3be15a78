//! A Rust library for translating tabular schemas between representations
//! and enforcing them onto in-memory data.
//!
//! All conversions pivot through one canonical form, a nested mapping of
//! field names to logical type tokens ("int", "str", "timestamp", ...).
//! From there a schema can be rendered as native Rust types, BigQuery
//! field definitions, dtype strings, or an Arrow schema, and can be
//! inferred from raw records or a record batch.
//!
//! ```no_run
//! use schema_bridge::{Schema, SchemaNode, TokenSchema};
//!
//! let tokens = TokenSchema::new()
//!     .with("id", SchemaNode::leaf("int"))
//!     .with("name", SchemaNode::leaf("str"));
//! let schema = Schema::new(tokens)?;
//! let bigquery = schema.bigquery()?;
//! # Ok::<(), schema_bridge::SchemaError>(())
//! ```

pub mod convert;
pub mod detect;
pub mod dictionary;
pub mod enforce;
pub mod error;
pub mod infer;
pub mod model;
pub mod schema;

// Re-export the most common types for easier use
// Core types
pub use error::{Result, SchemaError};
pub use schema::Schema;

// Schema model
pub use dictionary::{LogicalType, Representation};
pub use model::{
    BigQueryField, FieldMode, NativeNode, NativeSchema, NativeType, SchemaInput, SchemaNode,
    TokenSchema,
};

// Detection and inference
pub use detect::detect;
pub use infer::{infer_from_batch, infer_from_records};

// Enforcement
pub use enforce::{
    ColumnRule, DateFormatConfig, OnError, effective_schema, enforce_on_batch, enforce_on_columns,
    rules_from_schema,
};

// Arrow types
pub use arrow::record_batch::RecordBatch;
pub use arrow_schema::Schema as ArrowSchema;
