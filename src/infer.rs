//! Schema inference from raw data.
//!
//! Inference always produces the canonical string form; the façade never
//! derives any other representation directly from data.

use arrow::record_batch::RecordBatch;
use arrow_schema::DataType;
use serde_json::{Map, Value};

use crate::dictionary::{dtype_name, dtype_str_to_logical};
use crate::error::{Result, SchemaError};
use crate::model::{SchemaNode, TokenSchema};

/// Infer a canonical schema from a tabular data sample.
///
/// Each column's runtime dtype is rendered to its string name and mapped
/// through the coarse dtype lookup; nested struct and list columns recurse.
/// A dtype with no coarse mapping keeps its own name as a best-effort token.
#[must_use]
pub fn infer_from_batch(batch: &RecordBatch) -> TokenSchema {
    let mut schema = TokenSchema::new();
    for field in batch.schema().fields() {
        schema.insert(field.name().clone(), node_for_dtype(field.data_type()));
    }
    schema
}

fn node_for_dtype(data_type: &DataType) -> SchemaNode {
    match data_type {
        DataType::Struct(fields) => {
            let mut nested = TokenSchema::new();
            for field in fields {
                nested.insert(field.name().clone(), node_for_dtype(field.data_type()));
            }
            SchemaNode::Struct(nested)
        }
        DataType::List(field) | DataType::LargeList(field) => {
            SchemaNode::List(Box::new(node_for_dtype(field.data_type())))
        }
        leaf => {
            let name = dtype_name(leaf);
            match dtype_str_to_logical(&name) {
                Some(logical) => SchemaNode::from(logical),
                None => SchemaNode::Leaf(name),
            }
        }
    }
}

/// Infer a canonical schema from a nested record mapping of
/// field → value-or-values.
///
/// Nested objects recurse; otherwise the field's values are wrapped to a
/// list, nulls are skipped, and the first non-null sample is classified.
/// A field with no non-null sample gets the `null` marker.
#[must_use]
pub fn infer_from_records(records: &Map<String, Value>) -> TokenSchema {
    let mut schema = TokenSchema::new();
    for (name, values) in records {
        let node = match values {
            Value::Object(nested) => SchemaNode::Struct(infer_from_records(nested)),
            other => {
                let samples: Vec<&Value> = match other {
                    Value::Array(list) => list.iter().collect(),
                    scalar => vec![scalar],
                };
                let sample = samples.iter().find(|v| !v.is_null());
                match sample {
                    Some(value) => SchemaNode::leaf(classify_sample(value)),
                    None => SchemaNode::leaf("null"),
                }
            }
        };
        schema.insert(name.clone(), node);
    }
    schema
}

/// Unwrap the data value the façade accepts into a record mapping.
///
/// A one-element list of record objects counts as the record itself.
///
/// # Errors
///
/// Returns [`SchemaError::Inference`] when the value is neither a record
/// mapping nor a one-row list of one.
pub fn records_from_value(data: &Value) -> Result<&Map<String, Value>> {
    match data {
        Value::Object(map) => Ok(map),
        Value::Array(rows) if rows.len() == 1 => match &rows[0] {
            Value::Object(map) => Ok(map),
            other => Err(SchemaError::Inference(format!(
                "expected a record mapping, got {}",
                value_kind(other)
            ))),
        },
        other => Err(SchemaError::Inference(format!(
            "expected a record mapping or a one-row list of one, got {}",
            value_kind(other)
        ))),
    }
}

/// Classify a single non-null sample value.
///
/// `bool` is matched ahead of the numeric arms; the ordering is load-bearing
/// because some type systems treat booleans as integers.
fn classify_sample(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "array",
        Value::Object(_) => "struct",
        Value::Null => "null",
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn infer(value: Value) -> TokenSchema {
        let map = match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        };
        infer_from_records(&map)
    }

    #[test]
    fn test_infer_basic_columns() {
        let schema = infer(json!({
            "a": [1, 2, 3],
            "b": ["x", "y", "z"],
            "c": [1.0, 2.0, 3.0],
        }));
        assert_eq!(schema.get("a"), Some(&SchemaNode::leaf("int")));
        assert_eq!(schema.get("b"), Some(&SchemaNode::leaf("str")));
        assert_eq!(schema.get("c"), Some(&SchemaNode::leaf("float")));
    }

    #[test]
    fn test_infer_bool_before_int() {
        let schema = infer(json!({"flag": [true, false]}));
        assert_eq!(schema.get("flag"), Some(&SchemaNode::leaf("bool")));
    }

    #[test]
    fn test_infer_all_null_column() {
        let schema = infer(json!({"a": [null, null, null]}));
        assert_eq!(schema.get("a"), Some(&SchemaNode::leaf("null")));
    }

    #[test]
    fn test_infer_skips_leading_nulls() {
        let schema = infer(json!({"a": [null, 2, 3]}));
        assert_eq!(schema.get("a"), Some(&SchemaNode::leaf("int")));
    }

    #[test]
    fn test_infer_scalar_wraps_to_list() {
        let schema = infer(json!({"a": 1, "b": [2.0]}));
        assert_eq!(schema.get("a"), Some(&SchemaNode::leaf("int")));
        assert_eq!(schema.get("b"), Some(&SchemaNode::leaf("float")));
    }

    #[test]
    fn test_infer_nested_mapping_recurses() {
        let schema = infer(json!({
            "a": 1,
            "c": {"c1": ["w", "w"], "c2": [0, 1]},
        }));
        let expected = TokenSchema::new()
            .with("c1", SchemaNode::leaf("str"))
            .with("c2", SchemaNode::leaf("int"));
        assert_eq!(schema.get("c"), Some(&SchemaNode::Struct(expected)));
    }

    #[test]
    fn test_records_from_value_unwraps_one_row_list() {
        let data = json!([{"a": [1, 2]}]);
        let map = records_from_value(&data).unwrap();
        assert!(map.contains_key("a"));
    }

    #[test]
    fn test_records_from_value_rejects_multi_row() {
        let data = json!([{"a": 1}, {"a": 2}]);
        assert!(records_from_value(&data).is_err());
    }

    #[test]
    fn test_infer_from_batch_dtypes() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow_schema::{Field, Schema};
        use std::sync::Arc;

        let schema = Arc::new(Schema::new(vec![
            Field::new("a", DataType::Int64, false),
            Field::new("b", DataType::Utf8, false),
            Field::new("c", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2, 3])),
                Arc::new(StringArray::from(vec!["x", "y", "z"])),
                Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])),
            ],
        )
        .unwrap();

        let inferred = infer_from_batch(&batch);
        assert_eq!(inferred.get("a"), Some(&SchemaNode::leaf("int")));
        assert_eq!(inferred.get("b"), Some(&SchemaNode::leaf("str")));
        assert_eq!(inferred.get("c"), Some(&SchemaNode::leaf("float")));
    }
}
