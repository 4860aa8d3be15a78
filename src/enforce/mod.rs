//! Schema enforcement: applying a target schema or dtype mapping onto
//! in-memory data, column by column.
//!
//! The enforcer is independent of the [`Schema`](crate::Schema) façade: it
//! consumes a per-column rule mapping and a data value, either an Arrow
//! record batch or a column-oriented JSON table, and coerces each column
//! in turn.

pub mod batch;
pub mod cast;
pub mod columns;
pub mod dates;
pub mod rule;

pub use batch::enforce_on_batch;
pub use cast::{convert_array, create_null_array};
pub use columns::enforce_on_columns;
pub use dates::DateFormatConfig;
pub use rule::ColumnRule;

use crate::model::{SchemaNode, TokenSchema};

/// How per-column enforcement errors are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnError {
    /// Propagate the first column error
    #[default]
    Raise,
    /// Log the error and continue with the remaining columns
    Warn,
}

/// Merge fallback dtypes and the explicit schema into one ordered rule list.
///
/// Explicit schema entries win over fallback entries; fallback order is kept
/// for columns the schema does not mention.
#[must_use]
pub fn effective_schema(
    schema: &[(String, ColumnRule)],
    fallback_dtypes: &[(String, ColumnRule)],
) -> Vec<(String, ColumnRule)> {
    let mut merged: Vec<(String, ColumnRule)> = fallback_dtypes.to_vec();
    for (name, rule) in schema {
        if let Some(existing) = merged.iter_mut().find(|(n, _)| n == name) {
            existing.1 = rule.clone();
        } else {
            merged.push((name.clone(), rule.clone()));
        }
    }
    merged
}

/// Derive per-column cast rules from a token schema, one `CastToken` rule
/// per leaf column. Nested columns are skipped; casting nested batch
/// columns takes an explicit `Cast` rule with the full Arrow type.
#[must_use]
pub fn rules_from_schema(schema: &TokenSchema) -> Vec<(String, ColumnRule)> {
    schema
        .iter()
        .filter_map(|(name, node)| match node {
            SchemaNode::Leaf(token) => {
                Some((name.clone(), ColumnRule::CastToken(token.clone())))
            }
            SchemaNode::Struct(_) | SchemaNode::List(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_schema::DataType;

    #[test]
    fn test_effective_schema_explicit_wins() {
        let fallback = vec![
            ("a".to_string(), ColumnRule::Cast(DataType::Utf8)),
            ("b".to_string(), ColumnRule::Cast(DataType::Utf8)),
        ];
        let schema = vec![("a".to_string(), ColumnRule::Cast(DataType::Int64))];
        let merged = effective_schema(&schema, &fallback);
        assert_eq!(merged.len(), 2);
        assert!(matches!(merged[0].1, ColumnRule::Cast(DataType::Int64)));
        assert!(matches!(merged[1].1, ColumnRule::Cast(DataType::Utf8)));
    }

    #[test]
    fn test_rules_from_schema_covers_leaf_columns() {
        let schema = TokenSchema::new()
            .with("a", SchemaNode::leaf("int"))
            .with("nested", SchemaNode::Struct(TokenSchema::new()))
            .with("b", SchemaNode::leaf("str"));
        let rules = rules_from_schema(&schema);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].0, "a");
        assert!(matches!(&rules[1].1, ColumnRule::CastToken(t) if t == "str"));
    }
}
