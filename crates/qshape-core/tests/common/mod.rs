#![allow(dead_code)]

use qshape_core::ast::{
    BinaryExpr, BinaryOp, ColumnRef, Expr, SelectColumn, SelectStatement, TableRef,
};
use qshape_core::{compile, QueryConfig};

/// `SELECT t.col1, t.col2, t.col3 AS columnAlias FROM t`
pub fn fixture() -> SelectStatement {
    SelectStatement::from_table(TableRef::table("t"))
        .column(SelectColumn::new(col("col1")))
        .column(SelectColumn::new(col("col2")))
        .column(SelectColumn::with_alias(col("col3"), "columnAlias"))
}

/// A column of the fixture table.
pub fn col(name: &str) -> ColumnRef {
    ColumnRef::qualified("t", name)
}

pub fn column(name: &str) -> Expr {
    Expr::Column(col(name))
}

pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    left.binary(op, right)
}

pub fn compiled(config: &QueryConfig) -> SelectStatement {
    let mut ast = fixture();
    compile(config, &mut ast).unwrap_or_else(|e| panic!("Failed to compile: {e}"));
    ast
}

pub fn where_of(ast: &SelectStatement) -> &Expr {
    ast.where_clause
        .as_ref()
        .unwrap_or_else(|| panic!("Expected a WHERE clause in {ast:?}"))
}

pub fn as_binary(expr: &Expr) -> &BinaryExpr {
    expr.as_binary()
        .unwrap_or_else(|| panic!("Expected a binary expression, got {expr:?}"))
}
