//! End-to-end tests over the JSON document shape: configuration keys plus a
//! `queryAST`, compiled and serialized back.

use qshape_core::{compile, CompileError, QueryDocument};
use serde_json::{json, Value};

fn fixture_ast() -> Value {
    json!({
        "type": "select",
        "distinct": null,
        "columns": [
            { "expr": { "type": "column_ref", "table": "t", "column": "col1" }, "as": null },
            { "expr": { "type": "column_ref", "table": "t", "column": "col2" }, "as": null },
            { "expr": { "type": "column_ref", "table": "t", "column": "col3" }, "as": "columnAlias" }
        ],
        "from": [{ "db": null, "table": "t", "as": null }],
        "where": null,
        "groupby": null,
        "orderby": null,
        "limit": null
    })
}

fn compile_json(document: Value) -> Result<Value, CompileError> {
    compile_onto(document, fixture_ast())
}

fn compile_onto(mut document: Value, base: Value) -> Result<Value, CompileError> {
    document["queryAST"] = base;
    let QueryDocument {
        config,
        mut query_ast,
    } = serde_json::from_value(document).unwrap_or_else(|e| panic!("Bad document: {e}"));
    compile(&config, &mut query_ast)?;
    Ok(serde_json::to_value(&query_ast).unwrap())
}

#[test]
fn order_json() {
    let ast = compile_json(json!({
        "order": [{ "attribute": "columnAlias", "direction": "desc" }]
    }))
    .unwrap();
    assert_eq!(
        ast["orderby"],
        json!([{ "expr": { "type": "column_ref", "table": "t", "column": "col3" }, "type": "DESC" }])
    );
}

#[test]
fn limit_json() {
    let ast = compile_json(json!({ "limit": 10, "page": 3 })).unwrap();
    assert_eq!(
        ast["limit"],
        json!([{ "type": "number", "value": 20 }, { "type": "number", "value": 10 }])
    );
}

#[test]
fn composite_filter_json() {
    let ast = compile_json(json!({
        "filter": [[{ "attribute": ["col1", "col2"], "operator": "equal", "value": [[133962, 4], [133962, 22]] }]]
    }))
    .unwrap();

    let eq = |column: &str, value: i64| {
        json!({
            "type": "binary_expr",
            "operator": "=",
            "left": { "type": "column_ref", "table": "t", "column": column },
            "right": { "type": "number", "value": value }
        })
    };
    assert_eq!(
        ast["where"],
        json!({
            "type": "binary_expr",
            "operator": "OR",
            "left": {
                "type": "binary_expr",
                "operator": "AND",
                "left": eq("col1", 133_962),
                "right": eq("col2", 4)
            },
            "right": {
                "type": "binary_expr",
                "operator": "AND",
                "left": eq("col1", 133_962),
                "right": eq("col2", 22)
            },
            "parenthesized": true
        })
    );
}

#[test]
fn null_filter_json() {
    let ast = compile_json(json!({
        "filter": [[{ "attribute": "col1", "operator": "notEqual", "value": null }]]
    }))
    .unwrap();
    assert_eq!(ast["where"]["operator"], json!("IS NOT"));
    assert_eq!(ast["where"]["right"], json!({ "type": "null", "value": null }));
}

#[test]
fn search_with_filter_json() {
    let ast = compile_json(json!({
        "filter": [[{ "attribute": "col2", "operator": "equal", "value": 5 }]],
        "searchable": ["col1", "columnAlias"],
        "search": "foo_bar"
    }))
    .unwrap();

    let search = &ast["where"]["right"];
    assert_eq!(search["operator"], json!("OR"));
    assert_eq!(search["parenthesized"], json!(true));
    assert_eq!(search["left"]["right"], json!({ "type": "string", "value": "%foo\\_bar%" }));
    assert_eq!(search["right"]["left"]["column"], json!("col3"));
}

#[test]
fn limit_per_json() {
    let err = compile_json(json!({ "limitPer": "someId" })).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedFeature(_)));
}

#[test]
fn compiled_ast_parses_back() {
    let ast = compile_json(json!({
        "filter": [[{ "attribute": "col1", "operator": "greater", "value": 1 }]],
        "order": [{ "attribute": "col2", "direction": "ASC" }],
        "limit": 5
    }))
    .unwrap();

    let reparsed: qshape_core::SelectStatement = serde_json::from_value(ast.clone()).unwrap();
    assert_eq!(serde_json::to_value(&reparsed).unwrap(), ast);
}

#[test]
fn existing_parenthesized_where_keeps_its_mark() {
    let mut base = fixture_ast();
    base["where"] = json!({
        "type": "binary_expr",
        "operator": "OR",
        "left": {
            "type": "binary_expr",
            "operator": "=",
            "left": { "type": "column_ref", "table": "t", "column": "col1" },
            "right": { "type": "number", "value": 1 }
        },
        "right": {
            "type": "binary_expr",
            "operator": "=",
            "left": { "type": "column_ref", "table": "t", "column": "col2" },
            "right": { "type": "number", "value": 2 }
        },
        "paren": true
    });

    let ast = compile_onto(
        json!({ "filter": [[{ "attribute": "col3", "operator": "equal", "value": 3 }]] }),
        base,
    )
    .unwrap();

    assert_eq!(ast["where"]["operator"], json!("AND"));
    assert_eq!(ast["where"]["left"]["operator"], json!("OR"));
    assert_eq!(ast["where"]["left"]["parenthesized"], json!(true));
    assert_eq!(ast["where"]["right"]["left"]["column"], json!("col3"));
}

#[test]
fn existing_where_with_unknown_nodes_is_carried() {
    let in_list = json!({
        "type": "binary_expr",
        "operator": "IN",
        "left": { "type": "column_ref", "table": "t", "column": "col1" },
        "right": {
            "type": "expr_list",
            "value": [{ "type": "number", "value": 1 }, { "type": "number", "value": 2 }]
        }
    });
    let mut base = fixture_ast();
    base["where"] = in_list.clone();

    let ast = compile_onto(
        json!({ "searchable": ["col2"], "search": "x" }),
        base,
    )
    .unwrap();

    assert_eq!(ast["where"]["operator"], json!("AND"));
    assert_eq!(ast["where"]["left"], in_list);
    assert_eq!(ast["where"]["right"]["operator"], json!("LIKE"));
}

#[test]
fn parts_the_compiler_does_not_touch_are_carried() {
    let mut base = fixture_ast();
    base["distinct"] = json!("DISTINCT");
    base["from"] = json!([
        { "db": null, "table": "t", "as": null },
        {
            "db": null,
            "table": "u",
            "as": null,
            "join": "INNER JOIN",
            "on": {
                "type": "binary_expr",
                "operator": "=",
                "left": { "type": "column_ref", "table": "t", "column": "col1" },
                "right": { "type": "column_ref", "table": "u", "column": "id" }
            }
        }
    ]);
    base["groupby"] = json!([{ "type": "function", "name": "lower", "args": null }]);
    base["having"] = json!({ "type": "bool", "value": true });

    let ast = compile_onto(json!({ "limit": 3 }), base.clone()).unwrap();

    let mut expected = base;
    expected["limit"] = json!([{ "type": "number", "value": 0 }, { "type": "number", "value": 3 }]);
    assert_eq!(ast, expected);
}

#[test]
fn large_unsigned_filter_value_is_exact() {
    let ast = compile_json(json!({
        "filter": [[{ "attribute": "col1", "operator": "equal", "value": 18_446_744_073_709_551_615_u64 }]]
    }))
    .unwrap();
    assert_eq!(
        ast["where"]["right"],
        json!({ "type": "number", "value": u64::MAX })
    );
}
