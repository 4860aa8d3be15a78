//! Arrow array conversion for batch enforcement.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, NullArray, StringArray,
    TimestampNanosecondArray,
};
use arrow::compute::kernels::cast::{CastOptions, cast_with_options};
use arrow::util::display::FormatOptions;
use arrow_schema::{DataType, TimeUnit};
use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{Result, SchemaError};

use super::dates::{DateFormatConfig, parse_date_string, parse_datetime_string};

/// A cast that errors on unrepresentable values instead of nulling them.
/// Rule fallbacks rely on failed casts surfacing as errors.
fn strict_cast(array: &ArrayRef, target_type: &DataType) -> Result<ArrayRef> {
    let options = CastOptions {
        safe: false,
        format_options: FormatOptions::default(),
    };
    cast_with_options(array, target_type, &options).map_err(SchemaError::Arrow)
}

/// Convert an Arrow array to the target data type.
///
/// String-to-temporal conversions go through the configured date formats;
/// everything else falls back to Arrow's cast kernel. Unparseable temporal
/// strings become nulls rather than hard errors.
pub fn convert_array(
    array: &ArrayRef,
    target_type: &DataType,
    date_config: &DateFormatConfig,
) -> Result<ArrayRef> {
    let source_type = array.data_type();
    if source_type == target_type {
        return Ok(array.clone());
    }

    match (source_type, target_type) {
        (DataType::Utf8 | DataType::LargeUtf8, DataType::Date32) => {
            convert_string_to_date32(array, date_config)
        }
        (DataType::Utf8 | DataType::LargeUtf8, DataType::Timestamp(TimeUnit::Nanosecond, None)) => {
            convert_string_to_timestamp(array, date_config)
        }
        (DataType::Date32, DataType::Utf8) => convert_date32_to_string(array, date_config),
        (DataType::Boolean, DataType::Utf8) => convert_boolean_to_string(array),
        _ => strict_cast(array, target_type),
    }
}

/// A null-filled array of the given type and length, used to synthesize
/// columns the schema names but the data lacks.
pub fn create_null_array(data_type: &DataType, length: usize) -> Result<ArrayRef> {
    let nulls: ArrayRef = Arc::new(NullArray::new(length));
    if *data_type == DataType::Null {
        return Ok(nulls);
    }
    strict_cast(&nulls, data_type)
}

fn string_array(array: &ArrayRef) -> Result<&StringArray> {
    array
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| SchemaError::Enforcement {
            column: String::new(),
            message: format!("expected a string array, got {}", array.data_type()),
        })
}

fn convert_string_to_date32(array: &ArrayRef, config: &DateFormatConfig) -> Result<ArrayRef> {
    let strings = string_array(array)?;
    let epoch = NaiveDate::default();
    let mut builder = Date32Array::builder(strings.len());
    for i in 0..strings.len() {
        if strings.is_null(i) {
            builder.append_null();
            continue;
        }
        match parse_date_string(strings.value(i), config) {
            Some(date) => {
                let days = date.signed_duration_since(epoch).num_days() as i32;
                builder.append_value(days);
            }
            None => {
                log::warn!("could not parse '{}' as a date, using null", strings.value(i));
                builder.append_null();
            }
        }
    }
    Ok(Arc::new(builder.finish()) as ArrayRef)
}

fn convert_string_to_timestamp(array: &ArrayRef, config: &DateFormatConfig) -> Result<ArrayRef> {
    let strings = string_array(array)?;
    let mut builder = TimestampNanosecondArray::builder(strings.len());
    for i in 0..strings.len() {
        if strings.is_null(i) {
            builder.append_null();
            continue;
        }
        let nanos = parse_datetime_string(strings.value(i), config)
            .and_then(|dt| dt.and_utc().timestamp_nanos_opt());
        match nanos {
            Some(value) => builder.append_value(value),
            None => {
                log::warn!(
                    "could not parse '{}' as a timestamp, using null",
                    strings.value(i)
                );
                builder.append_null();
            }
        }
    }
    Ok(Arc::new(builder.finish()) as ArrayRef)
}

fn convert_date32_to_string(array: &ArrayRef, config: &DateFormatConfig) -> Result<ArrayRef> {
    let dates = array
        .as_any()
        .downcast_ref::<Date32Array>()
        .ok_or_else(|| SchemaError::Enforcement {
            column: String::new(),
            message: format!("expected a date32 array, got {}", array.data_type()),
        })?;
    let epoch = NaiveDate::default();
    let mut builder = arrow::array::StringBuilder::new();
    for i in 0..dates.len() {
        if dates.is_null(i) {
            builder.append_null();
            continue;
        }
        let days = dates.value(i);
        let date = epoch
            .checked_add_signed(chrono::Duration::days(i64::from(days)))
            .ok_or_else(|| SchemaError::Enforcement {
                column: String::new(),
                message: format!("invalid date value: {days}"),
            })?;
        builder.append_value(date.format(&config.default_format).to_string());
    }
    Ok(Arc::new(builder.finish()) as ArrayRef)
}

fn convert_boolean_to_string(array: &ArrayRef) -> Result<ArrayRef> {
    let bools = array
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| SchemaError::Enforcement {
            column: String::new(),
            message: format!("expected a boolean array, got {}", array.data_type()),
        })?;
    let mut builder = arrow::array::StringBuilder::new();
    for i in 0..bools.len() {
        if bools.is_null(i) {
            builder.append_null();
        } else {
            builder.append_value(if bools.value(i) { "true" } else { "false" });
        }
    }
    Ok(Arc::new(builder.finish()) as ArrayRef)
}

/// Read a primitive column out as JSON values for element-wise rules.
///
/// Integer columns are widened to `i64` and string-like columns to `Utf8`
/// first; non-primitive columns are not supported element-wise.
pub fn array_to_values(array: &ArrayRef) -> Result<Vec<Value>> {
    let values = match array.data_type() {
        DataType::Null => vec![Value::Null; array.len()],
        DataType::Boolean => {
            let bools = array.as_any().downcast_ref::<BooleanArray>().unwrap();
            (0..bools.len())
                .map(|i| {
                    if bools.is_null(i) {
                        Value::Null
                    } else {
                        Value::Bool(bools.value(i))
                    }
                })
                .collect()
        }
        t if t.is_integer() => {
            let ints = strict_cast(array, &DataType::Int64)?;
            let ints = ints.as_any().downcast_ref::<Int64Array>().unwrap();
            (0..ints.len())
                .map(|i| {
                    if ints.is_null(i) {
                        Value::Null
                    } else {
                        Value::from(ints.value(i))
                    }
                })
                .collect()
        }
        t if t.is_floating() => {
            let floats = strict_cast(array, &DataType::Float64)?;
            let floats = floats.as_any().downcast_ref::<Float64Array>().unwrap();
            (0..floats.len())
                .map(|i| {
                    if floats.is_null(i) {
                        Value::Null
                    } else {
                        Value::from(floats.value(i))
                    }
                })
                .collect()
        }
        DataType::Utf8 | DataType::LargeUtf8 => {
            let strings = strict_cast(array, &DataType::Utf8)?;
            let strings = strings.as_any().downcast_ref::<StringArray>().unwrap();
            (0..strings.len())
                .map(|i| {
                    if strings.is_null(i) {
                        Value::Null
                    } else {
                        Value::from(strings.value(i))
                    }
                })
                .collect()
        }
        other => {
            return Err(SchemaError::Enforcement {
                column: String::new(),
                message: format!("element-wise rules are not supported on {other} columns"),
            });
        }
    };
    Ok(values)
}

/// Build an array back from element-wise rule output.
///
/// The narrowest common type wins: all-bool → boolean, integers → int64,
/// any float → float64, any string → utf8 (numbers rendered), all-null →
/// null.
pub fn values_to_array(values: &[Value]) -> Result<ArrayRef> {
    let non_null = values.iter().filter(|v| !v.is_null());
    let mut has_bool = false;
    let mut has_int = false;
    let mut has_float = false;
    let mut has_string = false;
    for value in non_null {
        match value {
            Value::Bool(_) => has_bool = true,
            Value::Number(n) if n.is_i64() || n.is_u64() => has_int = true,
            Value::Number(_) => has_float = true,
            Value::String(_) => has_string = true,
            other => {
                return Err(SchemaError::Enforcement {
                    column: String::new(),
                    message: format!("cannot build a column from value {other}"),
                });
            }
        }
    }

    // Booleans mixed with numbers have no common Arrow numeric type;
    // render everything as strings rather than dropping the booleans.
    let array: ArrayRef = if has_string || (has_bool && (has_int || has_float)) {
        let strings: Vec<Option<String>> = values
            .iter()
            .map(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect();
        Arc::new(StringArray::from(strings))
    } else if has_float {
        let floats: Vec<Option<f64>> = values.iter().map(Value::as_f64).collect();
        Arc::new(Float64Array::from(floats))
    } else if has_int {
        let ints: Vec<Option<i64>> = values.iter().map(Value::as_i64).collect();
        Arc::new(Int64Array::from(ints))
    } else if has_bool {
        let bools: Vec<Option<bool>> = values.iter().map(Value::as_bool).collect();
        Arc::new(BooleanArray::from(bools))
    } else {
        Arc::new(NullArray::new(values.len()))
    };
    Ok(array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_to_date32_parses_and_nulls() {
        let array: ArrayRef = Arc::new(StringArray::from(vec![
            Some("2023-01-15"),
            Some("not a date"),
            None,
        ]));
        let config = DateFormatConfig::default();
        let converted = convert_array(&array, &DataType::Date32, &config).unwrap();
        let dates = converted.as_any().downcast_ref::<Date32Array>().unwrap();
        assert!(!dates.is_null(0));
        assert!(dates.is_null(1));
        assert!(dates.is_null(2));
    }

    #[test]
    fn test_create_null_array_is_all_null() {
        let array = create_null_array(&DataType::Int64, 3).unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.null_count(), 3);
    }

    #[test]
    fn test_values_round_trip_int_column() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), None, Some(3)]));
        let values = array_to_values(&array).unwrap();
        assert_eq!(values, vec![json!(1), Value::Null, json!(3)]);
        let rebuilt = values_to_array(&values).unwrap();
        assert_eq!(&rebuilt, &array);
    }

    #[test]
    fn test_mixed_bool_and_int_promotes_to_string() {
        let values = vec![json!(true), json!(2), Value::Null];
        let rebuilt = values_to_array(&values).unwrap();
        let strings = rebuilt.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(strings.value(0), "true");
        assert_eq!(strings.value(1), "2");
        assert!(strings.is_null(2));
    }

    #[test]
    fn test_values_to_array_promotes_to_string() {
        let values = vec![json!("one"), json!(2), Value::Null];
        let rebuilt = values_to_array(&values).unwrap();
        let strings = rebuilt.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(strings.value(0), "one");
        assert_eq!(strings.value(1), "2");
        assert!(strings.is_null(2));
    }
}
