//! # qshape-core
//!
//! Compiles a declarative query shape into an existing SELECT statement AST.
//!
//! This crate provides:
//! - A closed AST for the parts of a SELECT statement the compiler touches
//! - A [`QueryConfig`] describing ordering, pagination, filter groups and
//!   full-text search against attribute names or column aliases
//! - The [`compile`] entry point, which extends the statement's ORDER BY,
//!   LIMIT and WHERE parts without discarding existing conditions
//!
//! Parsing SQL into the base AST and rendering the result back to SQL are
//! left to the caller; every AST type round-trips through JSON with `serde`.
//!
//! ## Example
//!
//! ```rust
//! use qshape_core::ast::{ColumnRef, SelectColumn, SelectStatement, TableRef};
//! use qshape_core::config::{FilterCondition, Operator};
//! use qshape_core::{compile, QueryConfig};
//!
//! let mut ast = SelectStatement::from_table(TableRef::table("t"))
//!     .column(SelectColumn::with_alias(ColumnRef::qualified("t", "col3"), "label"));
//!
//! let config = QueryConfig::new()
//!     .filter_group(vec![FilterCondition::new("label", Operator::Equal, "x")])
//!     .search(["col1"], "50%")
//!     .limit(10)
//!     .page(2);
//!
//! compile(&config, &mut ast).unwrap();
//!
//! assert_eq!(ast.limit.map(|l| l.offset), Some(10));
//! assert!(ast.where_clause.is_some());
//! ```
//!
//! ## Unsupported features
//!
//! Per-group row limits (`limitPer`) are rejected with
//! [`CompileError::UnsupportedFeature`] before anything is modified:
//!
//! ```rust
//! use qshape_core::ast::{SelectStatement, TableRef};
//! use qshape_core::{compile, CompileError, QueryConfig};
//!
//! let mut ast = SelectStatement::from_table(TableRef::table("t"));
//! let err = compile(&QueryConfig::new().limit_per("someId"), &mut ast).unwrap_err();
//! assert!(matches!(err, CompileError::UnsupportedFeature(_)));
//! ```

pub mod ast;
pub mod compiler;
pub mod config;
pub mod error;

pub use ast::{Expr, SelectStatement};
pub use compiler::{compile, QueryCompiler};
pub use config::{QueryConfig, QueryDocument};
pub use error::{CompileError, Result};
