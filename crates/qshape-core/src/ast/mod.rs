//! Abstract Syntax Tree (AST) types for the SELECT statements the compiler extends.

mod expression;
mod statement;

pub use expression::{BinaryExpr, BinaryOp, ColumnRef, Expr, Literal, LiteralKind};
pub(crate) use statement::null_as_default;
pub use statement::{
    InvalidDirection, LimitClause, OrderBy, OrderDirection, SelectColumn, SelectStatement,
    StatementKind, TableRef,
};
