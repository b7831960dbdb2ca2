//! Tests for reading documents from and writing ASTs to files.

use qshape_cli::{compile_document, read_input, write_output};
use serde_json::{json, Value};

#[test]
fn compile_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    let output = dir.path().join("ast.json");

    let document = json!({
        "order": [{ "attribute": "name", "direction": "asc" }],
        "limit": 20,
        "page": 2,
        "queryAST": {
            "type": "select",
            "columns": [{ "expr": { "type": "column_ref", "table": "u", "column": "name" }, "as": null }],
            "from": [{ "db": null, "table": "users", "as": "u" }],
            "where": null
        }
    });
    std::fs::write(&input, document.to_string()).unwrap();

    let compiled = compile_document(&read_input(Some(input.as_path())).unwrap(), false).unwrap();
    write_output(Some(output.as_path()), &compiled).unwrap();

    let ast: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        ast["orderby"],
        json!([{ "expr": { "type": "column_ref", "table": "u", "column": "name" }, "type": "ASC" }])
    );
    assert_eq!(
        ast["limit"],
        json!([{ "type": "number", "value": 20 }, { "type": "number", "value": 20 }])
    );
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_input(Some(dir.path().join("absent.json").as_path())).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
}
