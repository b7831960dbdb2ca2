//! SQL statement AST types.

use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use super::expression::{ColumnRef, Expr, Literal};

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    /// Descending order.
    #[serde(rename = "DESC")]
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Error returned when a string names no order direction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order direction {0:?}, expected \"asc\" or \"desc\"")]
pub struct InvalidDirection(pub String);

impl FromStr for OrderDirection {
    type Err = InvalidDirection;

    /// Parses `asc`/`desc` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(InvalidDirection(s.to_string()))
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The column to order by.
    pub expr: ColumnRef,
    /// The direction (ASC or DESC).
    #[serde(rename = "type")]
    pub direction: OrderDirection,
}

/// A LIMIT clause, offset first.
///
/// On the wire this is a pair of number literals,
/// `[{"type": "number", "value": offset}, {"type": "number", "value": count}]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitClause {
    /// Number of rows to skip.
    pub offset: u64,
    /// Maximum number of rows to return.
    pub count: u64,
}

impl Serialize for LimitClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [
            Literal::Number(self.offset.into()),
            Literal::Number(self.count.into()),
        ]
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LimitClause {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [offset, count] = <[Literal; 2]>::deserialize(deserializer)?;
        Ok(Self {
            offset: limit_value(&offset).map_err(D::Error::custom)?,
            count: limit_value(&count).map_err(D::Error::custom)?,
        })
    }
}

fn limit_value(literal: &Literal) -> Result<u64, String> {
    match literal {
        Literal::Number(number) => number
            .as_u64()
            .ok_or_else(|| format!("LIMIT value {number} is not a non-negative integer")),
        other => Err(format!("LIMIT value must be a number, found {:?}", other.kind())),
    }
}

/// A table reference in FROM clause.
///
/// Only the name and alias are read; join types, join conditions and any
/// other keys are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    /// Database or schema name (optional).
    #[serde(default)]
    pub db: Option<String>,
    /// Table name, absent for derived tables.
    #[serde(default)]
    pub table: Option<String>,
    /// Alias.
    #[serde(default, rename = "as")]
    pub alias: Option<String>,
    /// Keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            db: None,
            table: Some(name.into()),
            alias: None,
            extra: Map::new(),
        }
    }

    /// Adds an alias to this table reference.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..self
        }
    }

    /// Returns the name columns of this table are qualified with: the alias,
    /// else the table name.
    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        self.alias.as_deref().or(self.table.as_deref())
    }
}

/// A column in SELECT clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectColumn {
    /// The selected column.
    pub expr: ColumnRef,
    /// Column alias.
    #[serde(default, rename = "as")]
    pub alias: Option<String>,
}

impl SelectColumn {
    /// Creates a new select column.
    #[must_use]
    pub const fn new(expr: ColumnRef) -> Self {
        Self { expr, alias: None }
    }

    /// Creates a select column with an alias.
    #[must_use]
    pub fn with_alias(expr: ColumnRef, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// Reads an explicit JSON `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `type` tag of a statement; only SELECT is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatementKind {
    /// A SELECT statement.
    #[default]
    #[serde(rename = "select")]
    Select,
}

/// A SELECT statement.
///
/// The compiler only rewrites `where`, `orderby` and `limit`. The DISTINCT
/// marker, GROUP BY entries and keys such as `having` are carried through
/// as they were parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectStatement {
    /// Statement type tag.
    #[serde(rename = "type")]
    pub kind: StatementKind,
    /// The DISTINCT marker, as produced by the parser.
    #[serde(default)]
    pub distinct: Value,
    /// The columns to select.
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<SelectColumn>,
    /// The FROM clause; the first entry is the primary table.
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: Vec<TableRef>,
    /// The WHERE clause.
    #[serde(default, rename = "where")]
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    #[serde(default, rename = "groupby")]
    pub group_by: Option<Vec<Expr>>,
    /// ORDER BY clauses.
    #[serde(default, rename = "orderby")]
    pub order_by: Option<Vec<OrderBy>>,
    /// LIMIT clause.
    #[serde(default)]
    pub limit: Option<LimitClause>,
    /// Keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SelectStatement {
    /// Creates an empty statement selecting from a single table.
    #[must_use]
    pub fn from_table(table: TableRef) -> Self {
        Self {
            from: vec![table],
            ..Self::default()
        }
    }

    /// Adds a column to the select list.
    #[must_use]
    pub fn column(mut self, column: SelectColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, expr: Expr) -> Self {
        self.where_clause = Some(expr);
        self
    }

    /// Returns the primary (first) table of the FROM clause.
    #[must_use]
    pub fn primary_table(&self) -> Option<&TableRef> {
        self.from.first()
    }
}
