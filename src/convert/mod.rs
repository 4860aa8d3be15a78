//! Bidirectional converters between the canonical string form and each of
//! the other representations.
//!
//! All conversion routes through the canonical form (origin to canonical,
//! canonical to target), which keeps the converter count linear in the
//! number of representations rather than quadratic. Every converter recurses
//! field-by-field: a nested struct converts by recursing the whole converter
//! on the sub-schema, and a single-element list converts by recursing on the
//! contained type and re-wrapping.

pub mod arrow;
pub mod bigquery;
pub mod native;
pub mod pandas;

use crate::dictionary::{LogicalType, Representation, equivalent_token, logical_for_token};
use crate::error::{Result, SchemaError};
use crate::model::{SchemaNode, TokenSchema};

/// Convert a string-token schema in `origin` dialect to canonical form.
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedType`] for a token with no entry in the
/// origin dictionary.
pub fn tokens_to_canonical(schema: &TokenSchema, origin: Representation) -> Result<TokenSchema> {
    let mut canonical = TokenSchema::new();
    for (name, node) in schema.iter() {
        canonical.insert(name.clone(), node_to_canonical(name, node, origin)?);
    }
    Ok(canonical)
}

fn node_to_canonical(field: &str, node: &SchemaNode, origin: Representation) -> Result<SchemaNode> {
    match node {
        SchemaNode::Leaf(token) => {
            let logical =
                logical_for_token(origin, token).ok_or_else(|| SchemaError::UnsupportedType {
                    field: field.to_string(),
                    token: token.clone(),
                })?;
            Ok(SchemaNode::from(logical))
        }
        SchemaNode::Struct(nested) => Ok(SchemaNode::Struct(tokens_to_canonical(nested, origin)?)),
        SchemaNode::List(inner) => Ok(SchemaNode::List(Box::new(node_to_canonical(
            field, inner, origin,
        )?))),
    }
}

/// Convert a canonical schema to the string-token dialect of `target`.
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedType`] for a token that is not a
/// canonical logical type.
pub fn tokens_from_canonical(schema: &TokenSchema, target: Representation) -> Result<TokenSchema> {
    let mut converted = TokenSchema::new();
    for (name, node) in schema.iter() {
        converted.insert(name.clone(), node_from_canonical(name, node, target)?);
    }
    Ok(converted)
}

fn node_from_canonical(
    field: &str,
    node: &SchemaNode,
    target: Representation,
) -> Result<SchemaNode> {
    match node {
        SchemaNode::Leaf(token) => {
            let logical = parse_canonical(field, token)?;
            Ok(SchemaNode::leaf(equivalent_token(target, logical)))
        }
        SchemaNode::Struct(nested) => {
            Ok(SchemaNode::Struct(tokens_from_canonical(nested, target)?))
        }
        SchemaNode::List(inner) => Ok(SchemaNode::List(Box::new(node_from_canonical(
            field, inner, target,
        )?))),
    }
}

/// Parse a token that must be a canonical logical type, naming the field in
/// the error.
pub(crate) fn parse_canonical(field: &str, token: &str) -> Result<LogicalType> {
    LogicalType::parse(token).ok_or_else(|| SchemaError::UnsupportedType {
        field: field.to_string(),
        token: token.to_string(),
    })
}
