//! Schema value model: ordered token schemas, native-type schemas, BigQuery
//! field lists, and the tagged input union the façade accepts.

use arrow::record_batch::RecordBatch;
use arrow_schema::Schema as ArrowSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dictionary::LogicalType;


/// One field value inside a [`TokenSchema`]: a leaf type token, a nested
/// record, or a single-element list (array-of-type).
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Leaf type token (representation-specific string)
    Leaf(String),
    /// Nested record
    Struct(TokenSchema),
    /// Array of a single element type
    List(Box<SchemaNode>),
}

impl SchemaNode {
    /// Leaf node from any token-like value.
    pub fn leaf(token: impl Into<String>) -> Self {
        Self::Leaf(token.into())
    }

    /// Append this node's leaf tokens, depth first, to `out`.
    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Leaf(token) => out.push(token),
            Self::Struct(schema) => {
                for (_, node) in schema.iter() {
                    node.collect_leaves(out);
                }
            }
            Self::List(inner) => inner.collect_leaves(out),
        }
    }
}

impl std::fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(token) => write!(f, "\"{token}\""),
            Self::Struct(schema) => write!(f, "{schema}"),
            Self::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

impl From<LogicalType> for SchemaNode {
    fn from(logical: LogicalType) -> Self {
        Self::Leaf(logical.as_str().to_string())
    }
}

/// An ordered mapping from field name to [`SchemaNode`].
///
/// Field order is insertion order; it is irrelevant for conversion
/// correctness but preserved so that converted schemas read like their
/// source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSchema {
    fields: Vec<(String, SchemaNode)>,
}

impl TokenSchema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append or replace a field, preserving the position of an existing one.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<SchemaNode>) {
        let name = name.into();
        let node = node.into();
        if let Some(existing) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = node;
        } else {
            self.fields.push((name, node));
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Number of top-level fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, SchemaNode)> {
        self.fields.iter()
    }

    /// The multiset of leaf tokens, recursing through nested structs and
    /// lists, in field order.
    #[must_use]
    pub fn leaf_tokens(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for (_, node) in &self.fields {
            node.collect_leaves(&mut out);
        }
        out
    }
}

impl std::fmt::Display for TokenSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, node)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{name}\": {node}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(String, SchemaNode)> for TokenSchema {
    fn from_iter<I: IntoIterator<Item = (String, SchemaNode)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (name, node) in iter {
            schema.insert(name, node);
        }
        schema
    }
}


/// A host-language type standing in for a schema leaf, the Rust analogue of
/// a literal type object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeType {
    /// `i64`
    I64,
    /// `f64`
    F64,
    /// `String`
    Str,
    /// `bool`
    Bool,
    /// `chrono::NaiveDateTime`
    DateTime,
    /// `chrono::NaiveDate`
    Date,
    /// `chrono::NaiveTime`
    Time,
    /// `Vec<u8>`
    Bytes,
    /// `Vec<_>`
    List,
    /// `BTreeMap<_, _>`
    Map,
    /// `()`
    Unit,
}

impl NativeType {
    /// The type's canonical Rust name, used as its dictionary token.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::I64 => "i64",
            Self::F64 => "f64",
            Self::Str => "String",
            Self::Bool => "bool",
            Self::DateTime => "NaiveDateTime",
            Self::Date => "NaiveDate",
            Self::Time => "NaiveTime",
            Self::Bytes => "Vec<u8>",
            Self::List => "Vec",
            Self::Map => "BTreeMap",
            Self::Unit => "()",
        }
    }
}

impl std::fmt::Display for NativeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// One field value inside a [`NativeSchema`].
#[derive(Debug, Clone, PartialEq)]
pub enum NativeNode {
    /// Leaf host-language type
    Leaf(NativeType),
    /// Nested record
    Struct(NativeSchema),
    /// Array of a single element type
    List(Box<NativeNode>),
}

/// An ordered mapping from field name to host-language types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeSchema {
    fields: Vec<(String, NativeNode)>,
}

impl NativeSchema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field.
    pub fn insert(&mut self, name: impl Into<String>, node: NativeNode) {
        self.fields.push((name.into(), node));
    }

    /// Builder-style insert of a leaf type.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, native: NativeType) -> Self {
        self.insert(name, NativeNode::Leaf(native));
        self
    }

    /// Builder-style insert of a nested record.
    #[must_use]
    pub fn with_struct(mut self, name: impl Into<String>, nested: NativeSchema) -> Self {
        self.insert(name, NativeNode::Struct(nested));
        self
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NativeNode> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate over `(name, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, NativeNode)> {
        self.fields.iter()
    }

    /// Number of top-level fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}


/// Field mode for a [`BigQueryField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldMode {
    /// Value may be null
    Nullable,
    /// Value must be present
    Required,
    /// Array of values
    Repeated,
}

/// A single field of a BigQuery-style table schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigQueryField {
    /// Field name
    pub name: String,
    /// Field type token (`"INTEGER"`, `"RECORD"`, ...)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Field mode
    pub mode: FieldMode,
    /// Nested fields, non-empty only for RECORD types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<BigQueryField>,
}

impl BigQueryField {
    /// A plain nullable field.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            mode: FieldMode::Nullable,
            fields: Vec::new(),
        }
    }

    /// A nested RECORD field.
    pub fn record(name: impl Into<String>, fields: Vec<BigQueryField>) -> Self {
        Self {
            name: name.into(),
            field_type: "RECORD".to_string(),
            mode: FieldMode::Nullable,
            fields,
        }
    }

    /// A REPEATED (array) field of the given element type.
    pub fn repeated(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            mode: FieldMode::Repeated,
            fields: Vec::new(),
        }
    }

    /// Whether this field nests sub-fields.
    #[must_use]
    pub fn is_record(&self) -> bool {
        !self.fields.is_empty()
    }
}


/// A schema (or data sample) entering the engine, tagged with its concrete
/// form at the boundary.
///
/// Structural forms (`Arrow`, `BigQuery`, `Native`) carry their
/// representation in the tag itself; only `Tokens`, a dict of strings of
/// unknown dialect, still needs heuristic detection. `Batch` and `Records`
/// are raw data and always go through inference.
#[derive(Debug, Clone)]
pub enum SchemaInput {
    /// A string-token schema of unknown dialect
    Tokens(TokenSchema),
    /// A host-language-type schema
    Native(NativeSchema),
    /// A BigQuery field list
    BigQuery(Vec<BigQueryField>),
    /// An Arrow schema object
    Arrow(ArrowSchema),
    /// A tabular data sample; always treated as data
    Batch(RecordBatch),
    /// A nested record mapping (or one-row list of one), as raw data
    Records(Value),
}

impl From<TokenSchema> for SchemaInput {
    fn from(schema: TokenSchema) -> Self {
        Self::Tokens(schema)
    }
}

impl From<NativeSchema> for SchemaInput {
    fn from(schema: NativeSchema) -> Self {
        Self::Native(schema)
    }
}

impl From<Vec<BigQueryField>> for SchemaInput {
    fn from(fields: Vec<BigQueryField>) -> Self {
        Self::BigQuery(fields)
    }
}

impl From<ArrowSchema> for SchemaInput {
    fn from(schema: ArrowSchema) -> Self {
        Self::Arrow(schema)
    }
}

impl From<RecordBatch> for SchemaInput {
    fn from(batch: RecordBatch) -> Self {
        Self::Batch(batch)
    }
}
