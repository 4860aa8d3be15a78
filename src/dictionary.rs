//! Static type dictionaries for the five supported schema representations.
//!
//! Each dictionary maps the canonical logical types to one representation's
//! native type tokens. The tables are plain statics, never mutated after
//! initialization, so concurrent readers need no locking.

use arrow::datatypes::{DataType, TimeUnit};

use crate::error::{Result, SchemaError};

/// The canonical set of logical types all conversions pivot through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// Text value
    Str,
    /// Boolean value
    Bool,
    /// Point-in-time value
    Timestamp,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Combined date and time
    Datetime,
    /// Raw bytes
    Bytes,
    /// List of a single element type
    Array,
    /// Nested record
    Struct,
    /// No observed type (all samples null)
    Null,
}

impl LogicalType {
    /// Canonical string token for this logical type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Timestamp => "timestamp",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Bytes => "bytes",
            Self::Array => "array",
            Self::Struct => "struct",
            Self::Null => "null",
        }
    }

    /// Parse a canonical string token back into a logical type.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        ALL_LOGICAL_TYPES.iter().copied().find(|t| t.as_str() == token)
    }
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All logical types, in dictionary order.
pub const ALL_LOGICAL_TYPES: [LogicalType; 12] = [
    LogicalType::Int,
    LogicalType::Float,
    LogicalType::Str,
    LogicalType::Bool,
    LogicalType::Timestamp,
    LogicalType::Date,
    LogicalType::Time,
    LogicalType::Datetime,
    LogicalType::Bytes,
    LogicalType::Array,
    LogicalType::Struct,
    LogicalType::Null,
];

/// One of the five supported schema representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Canonical string tokens (`"int"`, `"float"`, ...)
    Str,
    /// Host-language types (`i64`, `String`, `NaiveDateTime`, ...)
    Native,
    /// BigQuery field types (`"INTEGER"`, `"RECORD"`, ...)
    BigQuery,
    /// Pandas dtype tokens (`"Int64"`, `"datetime64[ns]"`, ...)
    Pandas,
    /// Arrow schema objects
    Arrow,
}

/// All supported representations, in detection voting order.
pub const ALL_REPRESENTATIONS: [Representation; 5] = [
    Representation::BigQuery,
    Representation::Str,
    Representation::Native,
    Representation::Pandas,
    Representation::Arrow,
];

impl Representation {
    /// The representation's lookup name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Native => "native",
            Self::BigQuery => "bigquery",
            Self::Pandas => "pandas",
            Self::Arrow => "arrow",
        }
    }

    /// Resolve a representation by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedRepresentation`] for any name other
    /// than the five supported ones.
    pub fn from_name(name: &str) -> Result<Self> {
        ALL_REPRESENTATIONS
            .iter()
            .copied()
            .find(|r| r.as_str() == name)
            .ok_or_else(|| SchemaError::UnsupportedRepresentation(name.to_string()))
    }
}

impl std::fmt::Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forward type dictionary for one representation: logical type to native
/// string token, in a fixed order.
///
/// Entry order matters for the derived reverse lookup: when two logical types
/// share a native token, the *last* entry wins (see [`logical_for_token`]).
#[must_use]
pub fn token_table(rep: Representation) -> &'static [(LogicalType, &'static str)] {
    use LogicalType::{
        Array, Bool, Bytes, Date, Datetime, Float, Int, Null, Str, Struct, Time, Timestamp,
    };
    match rep {
        Representation::Str => &[
            (Int, "int"),
            (Float, "float"),
            (Str, "str"),
            (Bool, "bool"),
            (Timestamp, "timestamp"),
            (Date, "date"),
            (Time, "time"),
            (Datetime, "datetime"),
            (Bytes, "bytes"),
            (Array, "array"),
            (Struct, "struct"),
            (Null, "null"),
        ],
        Representation::Native => &[
            (Int, "i64"),
            (Float, "f64"),
            (Str, "String"),
            (Bool, "bool"),
            (Timestamp, "NaiveDateTime"),
            (Date, "NaiveDate"),
            (Time, "NaiveTime"),
            (Datetime, "NaiveDateTime"),
            (Bytes, "Vec<u8>"),
            (Array, "Vec"),
            (Struct, "BTreeMap"),
            (Null, "()"),
        ],
        // `null` maps to BOOLEAN first so that the reverse lookup resolves
        // BOOLEAN back to `bool`.
        Representation::BigQuery => &[
            (Null, "BOOLEAN"),
            (Int, "INTEGER"),
            (Float, "FLOAT"),
            (Str, "STRING"),
            (Bool, "BOOLEAN"),
            (Timestamp, "TIMESTAMP"),
            (Date, "DATE"),
            (Time, "TIME"),
            (Datetime, "DATETIME"),
            (Bytes, "BYTES"),
            (Array, "ARRAY"),
            (Struct, "STRUCT"),
        ],
        // Pandas collapses every temporal type to one dtype; the reverse
        // lookup resolves "datetime64[ns]" to `datetime`.
        Representation::Pandas => &[
            (Int, "Int64"),
            (Float, "Float64"),
            (Str, "string"),
            (Bool, "boolean"),
            (Timestamp, "datetime64[ns]"),
            (Date, "datetime64[ns]"),
            (Time, "datetime64[ns]"),
            (Datetime, "datetime64[ns]"),
            (Bytes, "bytes"),
            (Array, "list"),
            (Struct, "struct"),
            (Null, "object"),
        ],
        Representation::Arrow => &[
            (Int, "int64"),
            (Float, "double"),
            (Str, "string"),
            (Bool, "bool"),
            (Timestamp, "timestamp[ns]"),
            (Date, "date32"),
            (Time, "time64[ns]"),
            (Datetime, "timestamp[ns]"),
            (Bytes, "binary"),
            (Array, "list"),
            (Struct, "struct"),
            (Null, "null"),
        ],
    }
}

/// Forward lookup: the native string token for a logical type in the given
/// representation. Total over all logical types and representations.
#[must_use]
pub fn equivalent_token(rep: Representation, logical: LogicalType) -> &'static str {
    token_table(rep)
        .iter()
        .find(|(l, _)| *l == logical)
        .map(|(_, t)| *t)
        .unwrap_or_else(|| logical.as_str())
}

/// Reverse lookup: the logical type for a native string token.
///
/// The reverse mapping is derived by inverting [`token_table`]. Where the
/// forward mapping is not one-to-one the inversion is lossy: a warning is
/// logged and the last matching entry wins.
#[must_use]
pub fn logical_for_token(rep: Representation, token: &str) -> Option<LogicalType> {
    let matches: Vec<LogicalType> = token_table(rep)
        .iter()
        .filter(|(_, t)| *t == token)
        .map(|(l, _)| *l)
        .collect();
    if matches.len() > 1 {
        log::warn!(
            "Schema - type dictionary for '{rep}' is not one-to-one for token '{token}', \
             keeping the last entry"
        );
    }
    matches.last().copied()
}

/// Arrow `DataType` for a leaf logical type.
///
/// # Errors
///
/// `array` and `struct` have no leaf Arrow type (they are structural) and
/// produce [`SchemaError::UnsupportedType`].
pub fn arrow_type_for(logical: LogicalType) -> Result<DataType> {
    match logical {
        LogicalType::Int => Ok(DataType::Int64),
        LogicalType::Float => Ok(DataType::Float64),
        LogicalType::Str => Ok(DataType::Utf8),
        LogicalType::Bool => Ok(DataType::Boolean),
        LogicalType::Timestamp | LogicalType::Datetime => {
            Ok(DataType::Timestamp(TimeUnit::Nanosecond, None))
        }
        LogicalType::Date => Ok(DataType::Date32),
        LogicalType::Time => Ok(DataType::Time64(TimeUnit::Nanosecond)),
        LogicalType::Bytes => Ok(DataType::Binary),
        LogicalType::Null => Ok(DataType::Null),
        LogicalType::Array | LogicalType::Struct => Err(SchemaError::UnsupportedType {
            field: String::new(),
            token: logical.as_str().to_string(),
        }),
    }
}

/// Leaf logical type for an Arrow `DataType`, if it has one.
///
/// Structural types (`Struct`, `List`) return `None`; callers recurse into
/// them instead.
#[must_use]
pub fn logical_for_arrow(data_type: &DataType) -> Option<LogicalType> {
    match data_type {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => Some(LogicalType::Int),
        DataType::Float16 | DataType::Float32 | DataType::Float64 => Some(LogicalType::Float),
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Some(LogicalType::Str),
        DataType::Boolean => Some(LogicalType::Bool),
        DataType::Timestamp(_, _) => Some(LogicalType::Datetime),
        DataType::Date32 | DataType::Date64 => Some(LogicalType::Date),
        DataType::Time32(_) | DataType::Time64(_) => Some(LogicalType::Time),
        DataType::Binary | DataType::LargeBinary | DataType::FixedSizeBinary(_) => {
            Some(LogicalType::Bytes)
        }
        DataType::Null => Some(LogicalType::Null),
        _ => None,
    }
}

/// String name of an Arrow `DataType`, as used by the coarse runtime dtype
/// lookup and the inference fallback tokens.
#[must_use]
pub fn dtype_name(data_type: &DataType) -> String {
    match data_type {
        DataType::Int8 => "int8".into(),
        DataType::Int16 => "int16".into(),
        DataType::Int32 => "int32".into(),
        DataType::Int64 => "int64".into(),
        DataType::UInt8 => "uint8".into(),
        DataType::UInt16 => "uint16".into(),
        DataType::UInt32 => "uint32".into(),
        DataType::UInt64 => "uint64".into(),
        DataType::Float16 => "float16".into(),
        DataType::Float32 => "float32".into(),
        DataType::Float64 => "float64".into(),
        DataType::Utf8 | DataType::Utf8View => "utf8".into(),
        DataType::LargeUtf8 => "large_utf8".into(),
        DataType::Boolean => "boolean".into(),
        DataType::Timestamp(_, _) => "timestamp[ns]".into(),
        DataType::Date32 => "date32".into(),
        DataType::Date64 => "date64".into(),
        DataType::Time32(_) | DataType::Time64(_) => "time64[ns]".into(),
        DataType::Binary | DataType::LargeBinary | DataType::FixedSizeBinary(_) => "binary".into(),
        DataType::Null => "null".into(),
        DataType::List(_) | DataType::LargeList(_) => "list".into(),
        DataType::Struct(_) => "struct".into(),
        other => format!("{other:?}"),
    }
}

/// Coarse mapping from runtime dtype strings to logical types.
///
/// This is deliberately a separate, looser table from the type dictionaries:
/// runtime dtype names are engine-specific (`"int64"`, `"Int64"`, `"object"`)
/// and several spellings fold onto the same logical type.
#[must_use]
pub fn dtype_str_to_logical(dtype: &str) -> Option<LogicalType> {
    let logical = match dtype {
        "int" | "int8" | "int16" | "int32" | "int64" | "Int64" | "uint8" | "uint16" | "uint32"
        | "uint64" => LogicalType::Int,
        "float" | "float16" | "float32" | "float64" | "Float64" | "double" => LogicalType::Float,
        "str" | "string" | "utf8" | "large_utf8" | "object" => LogicalType::Str,
        "bool" | "boolean" => LogicalType::Bool,
        "datetime" | "datetime64[ns]" | "timestamp[ns]" => LogicalType::Datetime,
        "date" | "date32" | "date64" => LogicalType::Date,
        "time" | "time64[ns]" => LogicalType::Time,
        "bytes" | "binary" => LogicalType::Bytes,
        "list" => LogicalType::Array,
        "struct" => LogicalType::Struct,
        "null" => LogicalType::Null,
        _ => return None,
    };
    Some(logical)
}
