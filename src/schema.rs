//! The `Schema` façade: one entry point for bridging the gap between the
//! different schema representations of the same data.
//!
//! Whatever comes in, a schema in any of the five representations or a raw
//! data sample, is normalized to the canonical string form at construction.
//! Accessors then convert on demand; the object itself never mutates after
//! construction, so it can be shared freely across threads.

use arrow::record_batch::RecordBatch;
use arrow_schema::Schema as ArrowSchema;
use serde_json::Value;

use crate::convert;
use crate::detect::detect_tokens;
use crate::dictionary::Representation;
use crate::error::{Result, SchemaError};
use crate::infer::{infer_from_batch, infer_from_records, records_from_value};
use crate::model::{BigQueryField, NativeSchema, SchemaInput, TokenSchema};

/// A schema normalized to canonical form, convertible to any supported
/// representation.
///
/// # Examples
///
/// ```
/// use schema_bridge::{Schema, SchemaNode, TokenSchema};
///
/// let tokens = TokenSchema::new()
///     .with("a", SchemaNode::leaf("int"))
///     .with("b", SchemaNode::leaf("str"));
/// let schema = Schema::new(tokens).unwrap();
///
/// let bigquery = schema.bigquery().unwrap();
/// assert_eq!(bigquery[0].field_type, "INTEGER");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    canonical: TokenSchema,
}

impl Schema {
    /// Build a schema from any tagged input, detecting the representation of
    /// token schemas automatically.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnrecognizedSchema`] when a token schema's
    /// dialect cannot be uniquely detected, and conversion errors for
    /// unknown type tokens.
    pub fn new(input: impl Into<SchemaInput>) -> Result<Self> {
        Self::build(input.into(), None)
    }

    /// Build a schema with an explicit representation hint, bypassing
    /// detection for token schemas.
    pub fn with_representation(
        input: impl Into<SchemaInput>,
        representation: Representation,
    ) -> Result<Self> {
        Self::build(input.into(), Some(representation))
    }

    /// Infer a schema from a raw record mapping (or a one-row list of one).
    pub fn from_data(data: Value) -> Result<Self> {
        Self::build(SchemaInput::Records(data), None)
    }

    /// Infer a schema from a tabular data sample.
    #[must_use]
    pub fn from_batch(batch: &RecordBatch) -> Self {
        Self {
            canonical: infer_from_batch(batch),
        }
    }

    fn build(input: SchemaInput, hint: Option<Representation>) -> Result<Self> {
        let canonical = match input {
            // Tabular input always counts as data, regardless of hints.
            SchemaInput::Batch(batch) => infer_from_batch(&batch),
            SchemaInput::Records(value) => infer_from_records(records_from_value(&value)?),
            // Structural forms normalize eagerly through their converter.
            SchemaInput::Arrow(schema) => convert::arrow::to_canonical(&schema),
            SchemaInput::BigQuery(fields) => convert::bigquery::to_canonical(&fields)?,
            SchemaInput::Native(schema) => convert::native::to_canonical(&schema),
            SchemaInput::Tokens(schema) => {
                let representation = match hint {
                    Some(rep) => rep,
                    None => detect_tokens(&schema).ok_or_else(|| {
                        SchemaError::UnrecognizedSchema(format!(
                            "could not determine the representation of {schema}; \
                             pass an explicit representation"
                        ))
                    })?,
                };
                convert::tokens_to_canonical(&schema, representation)?
            }
        };
        Ok(Self { canonical })
    }

    /// The canonical string-form schema.
    #[must_use]
    pub fn str_schema(&self) -> TokenSchema {
        self.canonical.clone()
    }

    /// The schema as host-language types.
    pub fn native(&self) -> Result<NativeSchema> {
        convert::native::from_canonical(&self.canonical)
    }

    /// The schema as a BigQuery field list.
    pub fn bigquery(&self) -> Result<Vec<BigQueryField>> {
        convert::bigquery::from_canonical(&self.canonical)
    }

    /// The schema as pandas dtype tokens.
    pub fn pandas(&self) -> Result<TokenSchema> {
        convert::pandas::from_canonical(&self.canonical)
    }

    /// The schema as an Arrow schema.
    pub fn arrow(&self) -> Result<ArrowSchema> {
        convert::arrow::from_canonical(&self.canonical)
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Schema({})", self.canonical)
    }
}
