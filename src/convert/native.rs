//! Canonical ↔ host-language types.
//!
//! The `to_canonical` direction is structural: leaves are [`NativeType`]
//! values, not strings, so conversion matches on the type itself.

use crate::dictionary::LogicalType;
use crate::error::Result;
use crate::model::{NativeNode, NativeSchema, NativeType, SchemaNode, TokenSchema};

/// Convert a canonical schema to host-language types.
pub fn from_canonical(schema: &TokenSchema) -> Result<NativeSchema> {
    let mut native = NativeSchema::new();
    for (name, node) in schema.iter() {
        native.insert(name.clone(), node_from_canonical(name, node)?);
    }
    Ok(native)
}

fn node_from_canonical(field: &str, node: &SchemaNode) -> Result<NativeNode> {
    match node {
        SchemaNode::Leaf(token) => {
            let logical = super::parse_canonical(field, token)?;
            Ok(NativeNode::Leaf(native_for_logical(logical)))
        }
        SchemaNode::Struct(nested) => Ok(NativeNode::Struct(from_canonical(nested)?)),
        SchemaNode::List(inner) => {
            Ok(NativeNode::List(Box::new(node_from_canonical(field, inner)?)))
        }
    }
}

/// Convert a host-language-type schema back to canonical form.
#[must_use]
pub fn to_canonical(schema: &NativeSchema) -> TokenSchema {
    let mut canonical = TokenSchema::new();
    for (name, node) in schema.iter() {
        canonical.insert(name.clone(), node_to_canonical(node));
    }
    canonical
}

fn node_to_canonical(node: &NativeNode) -> SchemaNode {
    match node {
        NativeNode::Leaf(native) => SchemaNode::from(logical_for_native(*native)),
        NativeNode::Struct(nested) => SchemaNode::Struct(to_canonical(nested)),
        NativeNode::List(inner) => SchemaNode::List(Box::new(node_to_canonical(inner))),
    }
}

fn native_for_logical(logical: LogicalType) -> NativeType {
    match logical {
        LogicalType::Int => NativeType::I64,
        LogicalType::Float => NativeType::F64,
        LogicalType::Str => NativeType::Str,
        LogicalType::Bool => NativeType::Bool,
        // timestamp and datetime collapse onto the same host type.
        LogicalType::Timestamp | LogicalType::Datetime => NativeType::DateTime,
        LogicalType::Date => NativeType::Date,
        LogicalType::Time => NativeType::Time,
        LogicalType::Bytes => NativeType::Bytes,
        LogicalType::Array => NativeType::List,
        LogicalType::Struct => NativeType::Map,
        LogicalType::Null => NativeType::Unit,
    }
}

fn logical_for_native(native: NativeType) -> LogicalType {
    match native {
        NativeType::I64 => LogicalType::Int,
        NativeType::F64 => LogicalType::Float,
        NativeType::Str => LogicalType::Str,
        NativeType::Bool => LogicalType::Bool,
        NativeType::DateTime => LogicalType::Datetime,
        NativeType::Date => LogicalType::Date,
        NativeType::Time => LogicalType::Time,
        NativeType::Bytes => LogicalType::Bytes,
        NativeType::List => LogicalType::Array,
        NativeType::Map => LogicalType::Struct,
        NativeType::Unit => LogicalType::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_canonical_leaves() {
        let schema = TokenSchema::new()
            .with("a", SchemaNode::leaf("int"))
            .with("b", SchemaNode::leaf("str"))
            .with("c", SchemaNode::leaf("float"));
        let native = from_canonical(&schema).unwrap();
        assert_eq!(native.get("a"), Some(&NativeNode::Leaf(NativeType::I64)));
        assert_eq!(native.get("b"), Some(&NativeNode::Leaf(NativeType::Str)));
        assert_eq!(native.get("c"), Some(&NativeNode::Leaf(NativeType::F64)));
    }

    #[test]
    fn test_round_trip_preserves_most_types() {
        let schema = TokenSchema::new()
            .with("a", SchemaNode::leaf("int"))
            .with("b", SchemaNode::leaf("date"))
            .with("c", SchemaNode::leaf("bytes"));
        let back = to_canonical(&from_canonical(&schema).unwrap());
        assert_eq!(back, schema);
    }

    #[test]
    fn test_timestamp_collapses_to_datetime() {
        let schema = TokenSchema::new().with("ts", SchemaNode::leaf("timestamp"));
        let back = to_canonical(&from_canonical(&schema).unwrap());
        assert_eq!(back.get("ts"), Some(&SchemaNode::leaf("datetime")));
    }

    #[test]
    fn test_nested_struct_round_trip() {
        let nested = TokenSchema::new().with("inner", SchemaNode::leaf("str"));
        let schema = TokenSchema::new()
            .with("outer", SchemaNode::leaf("int"))
            .with("nested", SchemaNode::Struct(nested));
        let back = to_canonical(&from_canonical(&schema).unwrap());
        assert_eq!(back, schema);
    }
}
