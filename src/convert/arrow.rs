//! Canonical ↔ Arrow schemas.
//!
//! The `to_canonical` direction is structural: it matches on the
//! `DataType` itself rather than a string token. Nested structs map to
//! `DataType::Struct`, single-element lists to `DataType::List`.

use std::sync::Arc;

use arrow_schema::{DataType, Field, Fields, Schema as ArrowSchema};

use crate::dictionary::{arrow_type_for, dtype_name, logical_for_arrow};
use crate::error::{Result, SchemaError};
use crate::model::{SchemaNode, TokenSchema};

/// Convert a canonical schema to an Arrow schema.
pub fn from_canonical(schema: &TokenSchema) -> Result<ArrowSchema> {
    Ok(ArrowSchema::new(fields_from_canonical(schema)?))
}

fn fields_from_canonical(schema: &TokenSchema) -> Result<Fields> {
    let fields: Result<Vec<Field>> = schema
        .iter()
        .map(|(name, node)| Ok(Field::new(name, datatype_for_node(name, node)?, true)))
        .collect();
    Ok(fields?.into())
}

fn datatype_for_node(field: &str, node: &SchemaNode) -> Result<DataType> {
    match node {
        SchemaNode::Leaf(token) => {
            let logical = super::parse_canonical(field, token)?;
            arrow_type_for(logical).map_err(|_| SchemaError::UnsupportedType {
                field: field.to_string(),
                token: token.clone(),
            })
        }
        SchemaNode::Struct(nested) => Ok(DataType::Struct(fields_from_canonical(nested)?)),
        SchemaNode::List(inner) => {
            let item = datatype_for_node(field, inner)?;
            Ok(DataType::List(Arc::new(Field::new("item", item, true))))
        }
    }
}

/// Convert an Arrow schema back to canonical form.
#[must_use]
pub fn to_canonical(schema: &ArrowSchema) -> TokenSchema {
    let mut canonical = TokenSchema::new();
    for field in schema.fields() {
        canonical.insert(field.name().clone(), node_for_datatype(field.data_type()));
    }
    canonical
}

fn node_for_datatype(data_type: &DataType) -> SchemaNode {
    match data_type {
        DataType::Struct(fields) => {
            let mut nested = TokenSchema::new();
            for field in fields {
                nested.insert(field.name().clone(), node_for_datatype(field.data_type()));
            }
            SchemaNode::Struct(nested)
        }
        DataType::List(field) | DataType::LargeList(field) => {
            SchemaNode::List(Box::new(node_for_datatype(field.data_type())))
        }
        leaf => match logical_for_arrow(leaf) {
            Some(logical) => SchemaNode::from(logical),
            // Best-effort token for types outside the dictionary.
            None => SchemaNode::Leaf(dtype_name(leaf)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_schema::TimeUnit;

    #[test]
    fn test_from_canonical_leaf_types() {
        let schema = TokenSchema::new()
            .with("a", SchemaNode::leaf("int"))
            .with("b", SchemaNode::leaf("str"))
            .with("c", SchemaNode::leaf("float"))
            .with("d", SchemaNode::leaf("datetime"));
        let arrow = from_canonical(&schema).unwrap();
        let expected = ArrowSchema::new(vec![
            Field::new("a", DataType::Int64, true),
            Field::new("b", DataType::Utf8, true),
            Field::new("c", DataType::Float64, true),
            Field::new("d", DataType::Timestamp(TimeUnit::Nanosecond, None), true),
        ]);
        assert_eq!(arrow, expected);
    }

    #[test]
    fn test_nested_struct_round_trip() {
        let nested = TokenSchema::new().with("inner", SchemaNode::leaf("str"));
        let schema = TokenSchema::new()
            .with("outer", SchemaNode::leaf("int"))
            .with("nested", SchemaNode::Struct(nested));
        let arrow = from_canonical(&schema).unwrap();

        // Two-level struct on the arrow side.
        let DataType::Struct(fields) = arrow.field_with_name("nested").unwrap().data_type() else {
            panic!("expected struct field");
        };
        assert_eq!(fields.len(), 1);

        let back = to_canonical(&arrow);
        assert_eq!(back, schema);
    }

    #[test]
    fn test_list_round_trip() {
        let schema = TokenSchema::new().with(
            "tags",
            SchemaNode::List(Box::new(SchemaNode::leaf("str"))),
        );
        let back = to_canonical(&from_canonical(&schema).unwrap());
        assert_eq!(back, schema);
    }

    #[test]
    fn test_timestamp_reverses_to_datetime() {
        // timestamp and datetime share one arrow type; the reverse resolves
        // to datetime.
        let schema = TokenSchema::new().with("ts", SchemaNode::leaf("timestamp"));
        let back = to_canonical(&from_canonical(&schema).unwrap());
        assert_eq!(back.get("ts"), Some(&SchemaNode::leaf("datetime")));
    }

    #[test]
    fn test_unlisted_type_keeps_dtype_name() {
        let arrow = ArrowSchema::new(vec![Field::new(
            "d",
            DataType::Duration(TimeUnit::Millisecond),
            true,
        )]);
        let back = to_canonical(&arrow);
        assert!(matches!(back.get("d"), Some(SchemaNode::Leaf(_))));
    }
}
