/*
 * test_json_errors.rs
 * Copyright (c) 2025 Posit, PBC
 */

use texfilter::readers::json::{JsonReadError, read};

fn read_str(input: &str) -> Result<texfilter::pandoc::Pandoc, JsonReadError> {
    let mut bytes = input.as_bytes();
    read(&mut bytes)
}

#[test]
fn test_truncated_document() {
    let result = read_str(r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":["#);
    assert!(matches!(result, Err(JsonReadError::InvalidJson(_))));
}

#[test]
fn test_missing_blocks() {
    match read_str(r#"{"pandoc-api-version":[1,23,1],"meta":{}}"#) {
        Err(JsonReadError::MissingField(field)) => assert_eq!(field, "blocks"),
        other => panic!("Expected MissingField, got {:?}", other),
    }
}

#[test]
fn test_node_without_tag() {
    let result = read_str(r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[{"c":[]}]}"#);
    assert!(matches!(result, Err(JsonReadError::MissingField(_))));
}

#[test]
fn test_unknown_inline() {
    let input = r#"{"pandoc-api-version":[1,23,1],"meta":{},
        "blocks":[{"t":"Para","c":[{"t":"Highlight","c":[]}]}]}"#;
    match read_str(input) {
        Err(JsonReadError::UnsupportedVariant(msg)) => assert_eq!(msg, "Inline: Highlight"),
        other => panic!("Expected UnsupportedVariant, got {:?}", other),
    }
}

#[test]
fn test_legacy_table_shape_is_rejected() {
    // API 1.20 tables have five fields
    let input = r#"{"pandoc-api-version":[1,23,1],"meta":{},
        "blocks":[{"t":"Table","c":[[],[],[],[],[]]}]}"#;
    assert!(matches!(read_str(input), Err(JsonReadError::InvalidType(_))));
}

#[test]
fn test_error_messages() {
    let err = read_str(r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[{"t":"Nope"}]}"#)
        .unwrap_err();
    assert_eq!(err.to_string(), "Unsupported variant: Block: Nope");
}
