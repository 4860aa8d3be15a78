use arrow_schema::{DataType, TimeUnit};
use schema_bridge::{
    BigQueryField, FieldMode, NativeNode, NativeSchema, NativeType, Representation, Schema,
    SchemaNode, TokenSchema,
};

fn person_tokens() -> TokenSchema {
    TokenSchema::new()
        .with("name", SchemaNode::leaf("str"))
        .with("age", SchemaNode::leaf("int"))
        .with("income", SchemaNode::leaf("float"))
        .with("is_student", SchemaNode::leaf("bool"))
}

#[test]
fn test_flat_schema_to_bigquery() {
    let schema = Schema::new(person_tokens()).unwrap();
    let fields = schema.bigquery().unwrap();

    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0].name, "name");
    assert_eq!(fields[0].field_type, "STRING");
    assert_eq!(fields[0].mode, FieldMode::Nullable);
    assert_eq!(fields[1].field_type, "INTEGER");
    assert_eq!(fields[2].field_type, "FLOAT");
    assert_eq!(fields[3].field_type, "BOOLEAN");
}

#[test]
fn test_flat_schema_to_arrow_and_back() -> anyhow::Result<()> {
    let schema = Schema::new(person_tokens())?;
    let arrow = schema.arrow()?;

    assert_eq!(arrow.field(0).data_type(), &DataType::Utf8);
    assert_eq!(arrow.field(1).data_type(), &DataType::Int64);
    assert_eq!(arrow.field(2).data_type(), &DataType::Float64);
    assert_eq!(arrow.field(3).data_type(), &DataType::Boolean);
    assert!(arrow.field(0).is_nullable());

    // The round trip back through the canonical form is lossless here.
    let back = Schema::new(arrow)?;
    assert_eq!(back.str_schema(), person_tokens());
    Ok(())
}

#[test]
fn test_flat_schema_to_native_and_back() {
    let schema = Schema::new(person_tokens()).unwrap();
    let native = schema.native().unwrap();

    assert_eq!(native.get("age"), Some(&NativeNode::Leaf(NativeType::I64)));
    assert_eq!(native.get("name"), Some(&NativeNode::Leaf(NativeType::Str)));

    let back = Schema::new(native).unwrap();
    assert_eq!(back.str_schema(), person_tokens());
}

#[test]
fn test_pandas_dialect_round_trip() {
    let schema = Schema::new(person_tokens()).unwrap();
    let pandas = schema.pandas().unwrap();

    assert_eq!(pandas.get("age"), Some(&SchemaNode::leaf("Int64")));
    assert_eq!(pandas.get("name"), Some(&SchemaNode::leaf("string")));
    assert_eq!(pandas.get("income"), Some(&SchemaNode::leaf("Float64")));

    let back = Schema::with_representation(pandas, Representation::Pandas).unwrap();
    assert_eq!(back.str_schema(), person_tokens());
}

#[test]
fn test_temporal_pandas_mapping_is_lossy() {
    let tokens = TokenSchema::new()
        .with("created", SchemaNode::leaf("timestamp"))
        .with("birthday", SchemaNode::leaf("date"));
    let schema = Schema::new(tokens).unwrap();
    let pandas = schema.pandas().unwrap();

    // Every temporal token renders to the same dtype, so the reverse
    // direction settles on "datetime".
    assert_eq!(pandas.get("created"), Some(&SchemaNode::leaf("datetime64[ns]")));
    assert_eq!(pandas.get("birthday"), Some(&SchemaNode::leaf("datetime64[ns]")));

    let back = Schema::with_representation(pandas, Representation::Pandas).unwrap();
    assert_eq!(back.str_schema().get("created"), Some(&SchemaNode::leaf("datetime")));
    assert_eq!(back.str_schema().get("birthday"), Some(&SchemaNode::leaf("datetime")));
}

#[test]
fn test_nested_struct_to_bigquery_record() {
    let tokens = TokenSchema::new().with(
        "address",
        SchemaNode::Struct(
            TokenSchema::new()
                .with("city", SchemaNode::leaf("str"))
                .with("zip", SchemaNode::leaf("int")),
        ),
    );
    let schema = Schema::new(tokens).unwrap();
    let fields = schema.bigquery().unwrap();

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_type, "RECORD");
    assert!(fields[0].is_record());
    assert_eq!(fields[0].fields.len(), 2);
    assert_eq!(fields[0].fields[0].name, "city");
    assert_eq!(fields[0].fields[0].field_type, "STRING");
}

#[test]
fn test_list_of_leaf_to_repeated_bigquery_field() {
    let tokens = TokenSchema::new().with(
        "scores",
        SchemaNode::List(Box::new(SchemaNode::leaf("float"))),
    );
    let schema = Schema::new(tokens).unwrap();
    let fields = schema.bigquery().unwrap();

    assert_eq!(fields[0].field_type, "FLOAT");
    assert_eq!(fields[0].mode, FieldMode::Repeated);

    let back = Schema::new(fields).unwrap();
    assert_eq!(back.str_schema(), tokens_list_of_float());
}

fn tokens_list_of_float() -> TokenSchema {
    TokenSchema::new().with(
        "scores",
        SchemaNode::List(Box::new(SchemaNode::leaf("float"))),
    )
}

#[test]
fn test_nested_list_to_arrow() {
    let tokens = TokenSchema::new().with(
        "tags",
        SchemaNode::List(Box::new(SchemaNode::leaf("str"))),
    );
    let schema = Schema::new(tokens.clone()).unwrap();
    let arrow = schema.arrow().unwrap();

    match arrow.field(0).data_type() {
        DataType::List(item) => assert_eq!(item.data_type(), &DataType::Utf8),
        other => panic!("expected a list type, got {other}"),
    }

    let back = Schema::new(arrow).unwrap();
    assert_eq!(back.str_schema(), tokens);
}

#[test]
fn test_temporal_tokens_to_arrow() {
    let tokens = TokenSchema::new()
        .with("at", SchemaNode::leaf("timestamp"))
        .with("day", SchemaNode::leaf("date"))
        .with("tod", SchemaNode::leaf("time"));
    let schema = Schema::new(tokens).unwrap();
    let arrow = schema.arrow().unwrap();

    assert_eq!(
        arrow.field(0).data_type(),
        &DataType::Timestamp(TimeUnit::Nanosecond, None)
    );
    assert_eq!(arrow.field(1).data_type(), &DataType::Date32);
    assert_eq!(
        arrow.field(2).data_type(),
        &DataType::Time64(TimeUnit::Nanosecond)
    );
}

#[test]
fn test_bigquery_fields_as_input() {
    let fields = vec![
        BigQueryField::new("name", "STRING"),
        BigQueryField::new("age", "INTEGER"),
    ];
    let schema = Schema::new(fields).unwrap();
    assert_eq!(
        schema.str_schema(),
        TokenSchema::new()
            .with("name", SchemaNode::leaf("str"))
            .with("age", SchemaNode::leaf("int"))
    );
}

#[test]
fn test_native_schema_as_input() {
    let native = NativeSchema::new()
        .with("id", NativeType::I64)
        .with("ratio", NativeType::F64);
    let schema = Schema::new(native).unwrap();
    assert_eq!(
        schema.str_schema(),
        TokenSchema::new()
            .with("id", SchemaNode::leaf("int"))
            .with("ratio", SchemaNode::leaf("float"))
    );
}

#[test]
fn test_field_order_is_preserved() {
    let tokens = TokenSchema::new()
        .with("z", SchemaNode::leaf("int"))
        .with("a", SchemaNode::leaf("str"))
        .with("m", SchemaNode::leaf("bool"));
    let schema = Schema::new(tokens).unwrap();

    let bq = schema.bigquery().unwrap();
    let names: Vec<&str> = bq
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, ["z", "a", "m"]);

    let arrow = schema.arrow().unwrap();
    let names: Vec<&String> = arrow.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["z", "a", "m"]);
}

#[test]
fn test_nested_array_rejected_by_bigquery() {
    let tokens = TokenSchema::new().with(
        "matrix",
        SchemaNode::List(Box::new(SchemaNode::List(Box::new(SchemaNode::leaf(
            "int",
        ))))),
    );
    let schema = Schema::new(tokens).unwrap();
    assert!(schema.bigquery().is_err());
}
