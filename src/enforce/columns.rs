//! Rule enforcement over column tables of JSON values.
//!
//! A column table maps column names to equal-length value lists. This is
//! the record-oriented counterpart of [`super::batch::enforce_on_batch`]
//! and shares the same rule vocabulary.

use serde_json::{Map, Value};

use crate::dictionary::{LogicalType, dtype_str_to_logical};
use crate::error::{Result, SchemaError};

use super::OnError;
use super::rule::ColumnRule;

/// Coerce a single JSON value to the given logical type. Nulls pass
/// through untouched so that missing data survives enforcement.
pub(crate) fn coerce_value(value: &Value, target: LogicalType, column: &str) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let coerced = match target {
        LogicalType::Int => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
            Value::Number(n) => n.as_f64().map(|f| Value::from(f as i64)),
            Value::Bool(b) => Some(Value::from(i64::from(*b))),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        LogicalType::Float => match value {
            Value::Number(n) => n.as_f64().map(Value::from),
            Value::Bool(b) => Some(Value::from(f64::from(u8::from(*b)))),
            Value::String(s) => s.trim().parse::<f64>().ok().map(Value::from),
            _ => None,
        },
        LogicalType::Bool => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::Number(n) => n.as_i64().map(|i| Value::from(i != 0)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(Value::from(true)),
                "false" | "0" => Some(Value::from(false)),
                _ => None,
            },
            _ => None,
        },
        LogicalType::Str => match value {
            Value::String(_) => Some(value.clone()),
            Value::Number(n) => Some(Value::from(n.to_string())),
            Value::Bool(b) => Some(Value::from(b.to_string())),
            _ => None,
        },
        LogicalType::Null => Some(Value::Null),
        // Temporal and structural targets keep string and composite
        // values as-is; the batch path handles real temporal casts.
        _ => Some(value.clone()),
    };
    coerced.ok_or_else(|| SchemaError::Enforcement {
        column: column.to_string(),
        message: format!("cannot coerce {value} to {}", target.as_str()),
    })
}

/// Apply one rule to every value of a column. `FirstOf` tries each
/// alternative against the whole column and keeps the first that
/// succeeds for all values.
pub(crate) fn apply_rule(values: &[Value], rule: &ColumnRule, column: &str) -> Result<Vec<Value>> {
    match rule {
        ColumnRule::CastToken(token) => {
            // Accepts both canonical tokens and engine dtype spellings.
            let target = LogicalType::parse(token)
                .or_else(|| dtype_str_to_logical(token))
                .ok_or_else(|| SchemaError::UnsupportedType {
                    field: column.to_string(),
                    token: token.clone(),
                })?;
            values
                .iter()
                .map(|v| coerce_value(v, target, column))
                .collect()
        }
        ColumnRule::Cast(data_type) => {
            let array = super::cast::values_to_array(values)?;
            let converted =
                super::cast::convert_array(&array, data_type, &super::DateFormatConfig::default())?;
            super::cast::array_to_values(&converted)
        }
        ColumnRule::Apply(f) => values.iter().map(f.as_ref()).collect(),
        ColumnRule::MapValues(pairs) => Ok(values
            .iter()
            .map(|v| {
                pairs
                    .iter()
                    .find(|(from, _)| from == v)
                    .map_or_else(|| v.clone(), |(_, to)| to.clone())
            })
            .collect()),
        ColumnRule::FirstOf(alternatives) => {
            for alternative in alternatives {
                if let Ok(result) = apply_rule(values, alternative, column) {
                    return Ok(result);
                }
            }
            Err(SchemaError::Enforcement {
                column: column.to_string(),
                message: format!("no rule matched, tried: {}", rule.summary()),
            })
        }
    }
}

/// Enforce rules on a column table in place.
///
/// Columns the rules name but the table lacks are synthesized as null
/// columns before the rule runs. On failure, `OnError::Warn` logs and
/// keeps the original column while `OnError::Raise` propagates.
pub fn enforce_on_columns(
    table: &mut Map<String, Value>,
    rules: &[(String, ColumnRule)],
    on_error: OnError,
) -> Result<()> {
    let length = table
        .values()
        .find_map(|v| v.as_array().map(Vec::len))
        .unwrap_or(1);

    for (column, rule) in rules {
        let values: Vec<Value> = match table.get(column) {
            Some(Value::Array(items)) => items.clone(),
            Some(other) => vec![other.clone()],
            None => vec![Value::Null; length],
        };
        match apply_rule(&values, rule, column) {
            Ok(enforced) => {
                table.insert(column.clone(), Value::Array(enforced));
            }
            Err(err) => match on_error {
                OnError::Raise => {
                    log::error!("failed to enforce column {column}: {err}");
                    return Err(err);
                }
                OnError::Warn => {
                    log::warn!("failed to enforce column {column}: {err}");
                    table.entry(column.clone()).or_insert(Value::Array(values));
                }
            },
        }
    }
    Ok(())
}
