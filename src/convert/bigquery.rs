//! Canonical ↔ BigQuery field lists.
//!
//! Nested structs become RECORD fields; single-element lists become REPEATED
//! fields. The `from_canonical` direction also accepts tokens that are
//! already BigQuery types and passes them through unchanged, so a conversion
//! can safely be re-applied to its own token form.

use crate::dictionary::{LogicalType, Representation, equivalent_token, logical_for_token};
use crate::error::{Result, SchemaError};
use crate::model::{BigQueryField, FieldMode, SchemaNode, TokenSchema};

/// Convert a canonical (or already-BigQuery) token schema to a field list.
pub fn from_canonical(schema: &TokenSchema) -> Result<Vec<BigQueryField>> {
    schema
        .iter()
        .map(|(name, node)| field_for_node(name, node))
        .collect()
}

fn field_for_node(name: &str, node: &SchemaNode) -> Result<BigQueryField> {
    match node {
        SchemaNode::Leaf(token) => Ok(BigQueryField::new(name, bigquery_token(name, token)?)),
        SchemaNode::Struct(nested) => Ok(BigQueryField::record(name, from_canonical(nested)?)),
        SchemaNode::List(inner) => match inner.as_ref() {
            SchemaNode::Leaf(token) => {
                Ok(BigQueryField::repeated(name, bigquery_token(name, token)?))
            }
            SchemaNode::Struct(nested) => {
                let mut field = BigQueryField::record(name, from_canonical(nested)?);
                field.mode = FieldMode::Repeated;
                Ok(field)
            }
            // BigQuery has no array-of-array; the element must be a leaf or
            // a record.
            SchemaNode::List(_) => Err(SchemaError::UnsupportedType {
                field: name.to_string(),
                token: "array<array>".to_string(),
            }),
        },
    }
}

fn bigquery_token(field: &str, token: &str) -> Result<String> {
    if let Some(logical) = LogicalType::parse(token) {
        return Ok(equivalent_token(Representation::BigQuery, logical).to_string());
    }
    // Idempotent pass-through for a schema that is already in BigQuery form.
    if logical_for_token(Representation::BigQuery, token).is_some() || token == "RECORD" {
        return Ok(token.to_string());
    }
    Err(SchemaError::UnsupportedType {
        field: field.to_string(),
        token: token.to_string(),
    })
}

/// Convert a BigQuery field list back to canonical form.
pub fn to_canonical(fields: &[BigQueryField]) -> Result<TokenSchema> {
    let mut canonical = TokenSchema::new();
    for field in fields {
        let node = if field.is_record() {
            SchemaNode::Struct(to_canonical(&field.fields)?)
        } else {
            let logical = logical_for_token(Representation::BigQuery, &field.field_type)
                .ok_or_else(|| SchemaError::UnsupportedType {
                    field: field.name.clone(),
                    token: field.field_type.clone(),
                })?;
            SchemaNode::from(logical)
        };
        let node = if field.mode == FieldMode::Repeated {
            SchemaNode::List(Box::new(node))
        } else {
            node
        };
        canonical.insert(field.name.clone(), node);
    }
    Ok(canonical)
}
