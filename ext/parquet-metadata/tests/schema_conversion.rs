use parquet::format;
use parquet_metadata::*;
use test_helpers::{bare_element, leaf_element, parent_element};


// ====== Round Trips ======

#[test]
fn test_schema_converter() {
    test_helpers::init_logging();
    let converter = MetadataConverter::new();
    let schema = test_helpers::paper_schema();

    let elements = converter.to_parquet_schema(&schema).unwrap();
    let rebuilt = converter.from_parquet_schema(&elements).unwrap();
    assert_eq!(rebuilt, schema);
}

#[test]
fn test_schema_converter_decimal() {
    let converter = MetadataConverter::new();
    let binary = SchemaNode::primitive(
        "aBinaryDecimal",
        Repetition::Required,
        PrimitiveTypeName::Binary,
    );
    let fixed = SchemaNode::primitive(
        "aFixedDecimal",
        Repetition::Optional,
        PrimitiveTypeName::FixedLenByteArray,
    );
    let schema = SchemaBuilder::new("Message")
        .field(binary.with_decimal(9, 2))
        .field(fixed.with_length(4).with_decimal(9, 2))
        .build()
        .unwrap();

    let elements = converter.to_parquet_schema(&schema).unwrap();

    let expected = vec![
        format::SchemaElement {
            num_children: Some(2),
            ..bare_element("Message")
        },
        format::SchemaElement {
            repetition_type: Some(format::FieldRepetitionType::REQUIRED),
            type_: Some(format::Type::BYTE_ARRAY),
            converted_type: Some(format::ConvertedType::DECIMAL),
            precision: Some(9),
            scale: Some(2),
            ..bare_element("aBinaryDecimal")
        },
        format::SchemaElement {
            repetition_type: Some(format::FieldRepetitionType::OPTIONAL),
            type_: Some(format::Type::FIXED_LEN_BYTE_ARRAY),
            type_length: Some(4),
            converted_type: Some(format::ConvertedType::DECIMAL),
            precision: Some(9),
            scale: Some(2),
            ..bare_element("aFixedDecimal")
        },
    ];
    assert_eq!(elements, expected);
    assert_eq!(converter.from_parquet_schema(&elements).unwrap(), schema);
}

#[test]
fn test_kitchen_sink_round_trip() {
    let converter = MetadataConverter::new();
    let schema = test_helpers::kitchen_sink_schema();

    let elements = converter.to_parquet_schema(&schema).unwrap();
    assert_eq!(elements.len(), schema.field_count());
    assert_eq!(converter.from_parquet_schema(&elements).unwrap(), schema);
}

#[test]
fn test_annotated_groups_keep_annotation() {
    let converter = MetadataConverter::new();
    let elements = converter
        .to_parquet_schema(&test_helpers::kitchen_sink_schema())
        .unwrap();

    let tags = elements.iter().find(|e| e.name == "tags").unwrap();
    assert_eq!(tags.converted_type, Some(format::ConvertedType::LIST));
    assert_eq!(tags.num_children, Some(1));
    assert!(tags.type_.is_none());

    let attributes = elements.iter().find(|e| e.name == "attributes").unwrap();
    assert_eq!(attributes.converted_type, Some(format::ConvertedType::MAP));
    assert_eq!(attributes.field_id, Some(42));
}

#[test]
fn test_unannotated_primitive_emits_no_annotation_fields() {
    let converter = MetadataConverter::new();
    let elements = converter
        .to_parquet_schema(&test_helpers::paper_schema())
        .unwrap();

    for element in &elements[1..] {
        assert!(element.converted_type.is_none(), "{}", element.name);
        assert!(element.precision.is_none(), "{}", element.name);
        assert!(element.scale.is_none(), "{}", element.name);
        assert!(element.type_length.is_none(), "{}", element.name);
        assert!(element.field_id.is_none(), "{}", element.name);
    }
}

#[test]
fn test_pre_order_layout() {
    let converter = MetadataConverter::new();
    let elements = converter
        .to_parquet_schema(&test_helpers::paper_schema())
        .unwrap();

    let layout: Vec<(&str, Option<i32>)> = elements
        .iter()
        .map(|e| (e.name.as_str(), e.num_children))
        .collect();
    assert_eq!(
        layout,
        vec![
            ("Document", Some(3)),
            ("DocId", None),
            ("Links", Some(2)),
            ("Backward", None),
            ("Forward", None),
            ("Name", Some(2)),
            ("Language", Some(2)),
            ("Code", None),
            ("Country", None),
            ("Url", None),
        ]
    );
}

#[test]
fn test_empty_message() {
    let converter = MetadataConverter::new();
    let schema = SchemaBuilder::new("empty").build().unwrap();

    let elements = converter.to_parquet_schema(&schema).unwrap();
    assert_eq!(
        elements,
        vec![format::SchemaElement {
            num_children: Some(0),
            ..bare_element("empty")
        }]
    );

    let rebuilt = converter.from_parquet_schema(&elements).unwrap();
    assert_eq!(rebuilt, schema);
    assert!(rebuilt.fields.is_empty());
}

#[test]
fn test_root_without_child_count_is_empty_message() {
    let converter = MetadataConverter::new();
    let schema = converter
        .from_parquet_schema(&[bare_element("root")])
        .unwrap();
    assert_eq!(schema, Schema::new("root", vec![]));
}

#[test]
fn test_flatten_is_deterministic() {
    let converter = MetadataConverter::new();
    let schema = test_helpers::kitchen_sink_schema();

    let first = converter.to_parquet_schema(&schema).unwrap();
    for _ in 0..5 {
        assert_eq!(converter.to_parquet_schema(&schema).unwrap(), first);
    }
    assert_eq!(
        converter.write_schema(&schema).unwrap(),
        converter.write_schema(&schema).unwrap()
    );
}

#[test]
fn test_rebuilt_leaf_without_scale_defaults_to_zero() {
    let converter = MetadataConverter::new();
    let elements = vec![
        parent_element("m", 1),
        format::SchemaElement {
            converted_type: Some(format::ConvertedType::DECIMAL),
            precision: Some(5),
            ..leaf_element("d")
        },
    ];

    let schema = converter.from_parquet_schema(&elements).unwrap();
    let expected = DecimalMetadata {
        precision: 5,
        scale: 0,
    };
    match &schema.fields[0] {
        SchemaNode::Primitive { decimal, .. } => assert_eq!(*decimal, Some(expected)),
        other => panic!("expected primitive, got {:?}", other),
    }
}

#[test]
fn test_schema_bytes_round_trip() {
    let converter = MetadataConverter::new();
    let schema = test_helpers::paper_schema();

    let bytes = converter.write_schema(&schema).unwrap();
    assert_eq!(converter.read_schema(&bytes).unwrap(), schema);
}

#[test]
fn test_logical_schema_serializes() {
    let schema = test_helpers::kitchen_sink_schema();
    let json = serde_json::to_string(&schema).unwrap();
    assert!(json.contains("\"kind\":\"group\""));

    let parsed: Schema = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, schema);
}

// ====== Malformed Input ======

#[test]
fn test_truncated_children() {
    let converter = MetadataConverter::new();
    let elements = vec![parent_element("Message", 2), leaf_element("only")];

    match converter.from_parquet_schema(&elements) {
        Err(MetadataError::MalformedSchema(msg)) => {
            assert!(msg.contains("declares 2 children"), "{}", msg);
        }
        other => panic!("expected malformed schema, got {:?}", other),
    }
}

#[test]
fn test_truncated_nested_children() {
    let converter = MetadataConverter::new();
    let elements = vec![
        parent_element("Message", 1),
        format::SchemaElement {
            repetition_type: Some(format::FieldRepetitionType::OPTIONAL),
            ..parent_element("inner", 3)
        },
        leaf_element("a"),
    ];

    assert!(matches!(
        converter.from_parquet_schema(&elements),
        Err(MetadataError::MalformedSchema(_))
    ));
}

#[test]
fn test_trailing_elements() {
    let converter = MetadataConverter::new();
    let elements = vec![
        parent_element("Message", 1),
        leaf_element("a"),
        leaf_element("b"),
    ];

    assert!(matches!(
        converter.from_parquet_schema(&elements),
        Err(MetadataError::MalformedSchema(_))
    ));
}

#[test]
fn test_empty_sequence() {
    let converter = MetadataConverter::new();
    assert!(matches!(
        converter.from_parquet_schema(&[]),
        Err(MetadataError::MalformedSchema(_))
    ));
}

#[test]
fn test_negative_child_count() {
    let converter = MetadataConverter::new();
    assert!(matches!(
        converter.from_parquet_schema(&[parent_element("Message", -1)]),
        Err(MetadataError::MalformedSchema(_))
    ));
}

#[test]
fn test_huge_child_count_fails_without_allocating() {
    let converter = MetadataConverter::new();
    let elements = vec![parent_element("Message", i32::MAX), leaf_element("a")];
    assert!(matches!(
        converter.from_parquet_schema(&elements),
        Err(MetadataError::MalformedSchema(_))
    ));
}

#[test]
fn test_missing_repetition() {
    let converter = MetadataConverter::new();
    let elements = vec![
        parent_element("Message", 1),
        format::SchemaElement {
            type_: Some(format::Type::INT64),
            ..bare_element("no_repetition")
        },
    ];

    assert!(matches!(
        converter.from_parquet_schema(&elements),
        Err(MetadataError::MalformedSchema(_))
    ));
}

#[test]
fn test_unknown_wire_enumerators() {
    let converter = MetadataConverter::new();

    let bad_type = vec![
        parent_element("Message", 1),
        format::SchemaElement {
            type_: Some(format::Type(99)),
            ..leaf_element("a")
        },
    ];
    assert!(matches!(
        converter.from_parquet_schema(&bad_type),
        Err(MetadataError::UnmappedEnumerator {
            family: "Type",
            value: 99,
        })
    ));

    let bad_converted = vec![
        parent_element("Message", 1),
        format::SchemaElement {
            converted_type: Some(format::ConvertedType(-5)),
            ..leaf_element("a")
        },
    ];
    assert!(matches!(
        converter.from_parquet_schema(&bad_converted),
        Err(MetadataError::UnmappedEnumerator { value: -5, .. })
    ));

    let bad_repetition = vec![
        parent_element("Message", 1),
        format::SchemaElement {
            repetition_type: Some(format::FieldRepetitionType(7)),
            ..leaf_element("a")
        },
    ];
    assert!(matches!(
        converter.from_parquet_schema(&bad_repetition),
        Err(MetadataError::UnmappedEnumerator { value: 7, .. })
    ));
}

#[test]
fn test_corrupt_schema_bytes() {
    let converter = MetadataConverter::new();
    let bytes = converter.write_schema(&test_helpers::paper_schema()).unwrap();

    assert!(matches!(
        converter.read_schema(&bytes[..bytes.len() / 2]),
        Err(MetadataError::Decoding(_))
    ));
}

#[test]
fn test_duplicate_sibling_names_on_the_wire() {
    let converter = MetadataConverter::new();
    let elements = vec![
        parent_element("m", 2),
        leaf_element("dup"),
        leaf_element("dup"),
    ];

    match converter.from_parquet_schema(&elements) {
        Err(MetadataError::MalformedSchema(msg)) => {
            assert!(msg.contains("'dup'"), "{}", msg);
        }
        other => panic!("expected malformed schema, got {:?}", other),
    }
}

#[test]
fn test_fixed_length_leaf_without_length_on_the_wire() {
    let converter = MetadataConverter::new();
    let elements = vec![
        parent_element("m", 1),
        format::SchemaElement {
            type_: Some(format::Type::FIXED_LEN_BYTE_ARRAY),
            ..leaf_element("f")
        },
    ];

    match converter.from_parquet_schema(&elements) {
        Err(MetadataError::MalformedSchema(msg)) => {
            assert!(msg.contains("FIXED_LEN_BYTE_ARRAY"), "{}", msg);
        }
        other => panic!("expected malformed schema, got {:?}", other),
    }
}

#[test]
fn test_decimal_annotated_group_on_the_wire() {
    let converter = MetadataConverter::new();
    let elements = vec![
        parent_element("m", 1),
        format::SchemaElement {
            repetition_type: Some(format::FieldRepetitionType::OPTIONAL),
            converted_type: Some(format::ConvertedType::DECIMAL),
            precision: Some(9),
            ..parent_element("g", 1)
        },
        leaf_element("a"),
    ];

    assert!(matches!(
        converter.from_parquet_schema(&elements),
        Err(MetadataError::MalformedSchema(_))
    ));
}

fn nested_elements(depth: usize) -> Vec<format::SchemaElement> {
    let mut elements = vec![parent_element("deep", 1)];
    for level in 1..depth {
        elements.push(format::SchemaElement {
            repetition_type: Some(format::FieldRepetitionType::REQUIRED),
            ..parent_element(&format!("g{level}"), 1)
        });
    }
    elements.push(leaf_element("leaf"));
    elements
}

#[test]
fn test_depth_limit_holds_in_both_directions() {
    let converter = MetadataConverter::new();

    let at_limit = converter.from_parquet_schema(&nested_elements(128)).unwrap();
    assert_eq!(at_limit.depth(), 128);
    assert_eq!(
        converter.to_parquet_schema(&at_limit).unwrap(),
        nested_elements(128)
    );

    assert!(matches!(
        converter.from_parquet_schema(&nested_elements(129)),
        Err(MetadataError::MalformedSchema(_))
    ));

    let wrapper = SchemaNode::group("extra", Repetition::Required, at_limit.fields);
    let too_deep = Schema::new("deep", vec![wrapper]);
    assert_eq!(too_deep.depth(), 129);
    assert!(matches!(
        converter.to_parquet_schema(&too_deep),
        Err(MetadataError::InvalidSchema(_))
    ));
}

// ====== Write-side Validation ======

#[test]
fn test_invalid_schema_rejected_before_flattening() {
    let converter = MetadataConverter::new();
    let schema = Schema::new(
        "m",
        vec![SchemaNode::primitive(
            "f",
            Repetition::Required,
            PrimitiveTypeName::FixedLenByteArray,
        )],
    );

    assert!(matches!(
        converter.to_parquet_schema(&schema),
        Err(MetadataError::InvalidSchema(_))
    ));
}

#[test]
fn test_primitive_annotation_on_group_rejected() {
    let converter = MetadataConverter::new();
    let group = SchemaNode::group("g", Repetition::Optional, vec![])
        .with_original_type(OriginalType::Decimal);
    let schema = Schema::new("m", vec![group]);

    assert!(matches!(
        converter.to_parquet_schema(&schema),
        Err(MetadataError::InvalidSchema(_))
    ));
    assert!(matches!(
        SchemaBuilder::new("m").fields(schema.fields.clone()).build(),
        Err(MetadataError::InvalidSchema(_))
    ));
}

#[test]
fn test_column_descriptors_after_round_trip() {
    let converter = MetadataConverter::new();
    let schema = test_helpers::kitchen_sink_schema();
    let rebuilt = converter
        .from_parquet_schema(&converter.to_parquet_schema(&schema).unwrap())
        .unwrap();

    let columns = rebuilt.columns();
    assert_eq!(columns, schema.columns());

    let element = columns
        .iter()
        .find(|c| c.dotted_path() == "tags.list.element")
        .unwrap();
    assert_eq!(element.max_repetition_level, 1);
    assert_eq!(element.max_definition_level, 2);

    let uuid = columns.iter().find(|c| c.dotted_path() == "uuid").unwrap();
    assert_eq!(uuid.type_length, Some(16));
}
