//! Rule enforcement over Arrow record batches.

use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch};
use arrow_schema::{Field, Schema as ArrowSchema};

use crate::dictionary::arrow_type_for;
use crate::error::{Result, SchemaError};

use super::cast::{array_to_values, convert_array, create_null_array, values_to_array};
use super::dates::DateFormatConfig;
use super::rule::ColumnRule;
use super::OnError;

/// Enforce rules on a record batch, producing a new batch.
///
/// Columns the rules name but the batch lacks are appended as null
/// columns of the rule's target type. Unnamed columns pass through
/// unchanged in their original position.
pub fn enforce_on_batch(
    batch: &RecordBatch,
    rules: &[(String, ColumnRule)],
    date_config: &DateFormatConfig,
    on_error: OnError,
) -> Result<RecordBatch> {
    let mut fields: Vec<Field> = Vec::new();
    let mut columns: Vec<ArrayRef> = Vec::new();

    for (i, field) in batch.schema().fields().iter().enumerate() {
        let array = batch.column(i).clone();
        let rule = rules
            .iter()
            .find(|(name, _)| name == field.name())
            .map(|(_, rule)| rule);
        let array = match rule {
            Some(rule) => match apply_batch_rule(&array, rule, date_config, field.name()) {
                Ok(converted) => converted,
                Err(err) => match on_error {
                    OnError::Raise => {
                        log::error!("failed to enforce column {}: {err}", field.name());
                        return Err(err);
                    }
                    OnError::Warn => {
                        log::warn!("failed to enforce column {}: {err}", field.name());
                        array
                    }
                },
            },
            None => array,
        };
        fields.push(Field::new(field.name(), array.data_type().clone(), true));
        columns.push(array);
    }

    for (name, rule) in rules {
        if batch.schema().column_with_name(name).is_some() {
            continue;
        }
        // The synthesized null column goes through the rule like any
        // present column, so element-wise rules see the placeholders.
        let data_type = rule_target_type(rule)?;
        let array = create_null_array(&data_type, batch.num_rows())?;
        let array = match apply_batch_rule(&array, rule, date_config, name) {
            Ok(converted) => converted,
            Err(err) => match on_error {
                OnError::Raise => {
                    log::error!("failed to enforce column {name}: {err}");
                    return Err(err);
                }
                OnError::Warn => {
                    log::warn!("failed to enforce column {name}: {err}");
                    array
                }
            },
        };
        fields.push(Field::new(name, array.data_type().clone(), true));
        columns.push(array);
    }

    let schema = Arc::new(ArrowSchema::new(fields));
    RecordBatch::try_new(schema, columns).map_err(SchemaError::Arrow)
}

fn apply_batch_rule(
    array: &ArrayRef,
    rule: &ColumnRule,
    date_config: &DateFormatConfig,
    column: &str,
) -> Result<ArrayRef> {
    match rule {
        ColumnRule::Cast(data_type) => convert_array(array, data_type, date_config),
        ColumnRule::CastToken(token) => {
            let data_type = token_target_type(token, column)?;
            convert_array(array, &data_type, date_config)
        }
        ColumnRule::Apply(_) | ColumnRule::MapValues(_) => {
            let values = array_to_values(array)?;
            let enforced = super::columns::apply_rule(&values, rule, column)?;
            values_to_array(&enforced)
        }
        ColumnRule::FirstOf(alternatives) => {
            for alternative in alternatives {
                if let Ok(converted) = apply_batch_rule(array, alternative, date_config, column) {
                    return Ok(converted);
                }
            }
            Err(SchemaError::Enforcement {
                column: column.to_string(),
                message: format!("no rule matched, tried: {}", rule.summary()),
            })
        }
    }
}

fn token_target_type(token: &str, column: &str) -> Result<arrow_schema::DataType> {
    // Accepts both canonical tokens and engine dtype spellings.
    let logical = crate::dictionary::LogicalType::parse(token)
        .or_else(|| crate::dictionary::dtype_str_to_logical(token))
        .ok_or_else(|| SchemaError::UnsupportedType {
            field: column.to_string(),
            token: token.to_string(),
        })?;
    arrow_type_for(logical)
}

/// The Arrow type a synthesized null column should carry for a rule.
fn rule_target_type(rule: &ColumnRule) -> Result<arrow_schema::DataType> {
    match rule {
        ColumnRule::Cast(data_type) => Ok(data_type.clone()),
        ColumnRule::CastToken(token) => token_target_type(token, ""),
        ColumnRule::FirstOf(alternatives) => alternatives
            .first()
            .map(rule_target_type)
            .unwrap_or(Ok(arrow_schema::DataType::Null)),
        ColumnRule::Apply(_) | ColumnRule::MapValues(_) => Ok(arrow_schema::DataType::Null),
    }
}
