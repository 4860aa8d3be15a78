//! Per-column enforcement rules.

use std::fmt;
use std::sync::Arc;

use arrow_schema::DataType;
use itertools::Itertools;
use serde_json::Value;

use crate::error::Result;

/// An element-wise callable applied to each value of a column.
pub type ApplyFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// What to do with one column.
///
/// `FirstOf` is an explicit ordered list of candidates: each is tried
/// left-to-right and the first that succeeds wins, as a `Result`-returning
/// validator chain rather than exception-driven control flow.
#[derive(Clone)]
pub enum ColumnRule {
    /// Cast the column to an Arrow data type
    Cast(DataType),
    /// Cast the column to a type named by a dtype string
    CastToken(String),
    /// Apply a callable to each element
    Apply(ApplyFn),
    /// Substitute listed values, leaving unmapped values unchanged
    MapValues(Vec<(Value, Value)>),
    /// Try each candidate rule in order; first success wins
    FirstOf(Vec<ColumnRule>),
}

impl ColumnRule {
    /// An element-wise callable rule.
    pub fn apply<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::Apply(Arc::new(f))
    }

    /// A literal value-substitution rule.
    pub fn map_values(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::MapValues(pairs.into_iter().collect())
    }

    /// An ordered fallback list of candidate rules.
    pub fn first_of(rules: impl IntoIterator<Item = ColumnRule>) -> Self {
        Self::FirstOf(rules.into_iter().collect())
    }

    /// Short description used in log lines and enforcement errors.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Cast(data_type) => format!("cast({data_type})"),
            Self::CastToken(token) => format!("cast('{token}')"),
            Self::Apply(_) => "apply(<fn>)".to_string(),
            Self::MapValues(pairs) => format!("map({} values)", pairs.len()),
            Self::FirstOf(rules) => {
                format!("first_of[{}]", rules.iter().map(ColumnRule::summary).join(", "))
            }
        }
    }
}

impl fmt::Debug for ColumnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_names_candidates() {
        let rule = ColumnRule::first_of([
            ColumnRule::Cast(DataType::Int64),
            ColumnRule::CastToken("str".to_string()),
        ]);
        assert_eq!(rule.summary(), "first_of[cast(Int64), cast('str')]");
    }
}
