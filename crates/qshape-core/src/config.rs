//! Query configuration.
//!
//! A [`QueryConfig`] describes the shape a caller wants the final query to
//! have: ordering, pagination, filter groups and full-text search. Every
//! field is optional and an unset field leaves the matching part of the AST
//! untouched. The config deserializes from the JSON shape used by request
//! pipelines (`order`, `limit`, `page`, `filter`, `searchable`, `search`,
//! `limitPer`) and can also be built fluently:
//!
//! ```rust
//! use qshape_core::ast::OrderDirection;
//! use qshape_core::config::{FilterCondition, Operator, QueryConfig};
//!
//! let config = QueryConfig::new()
//!     .order("name", OrderDirection::Asc)
//!     .limit(20)
//!     .page(2)
//!     .filter_group(vec![FilterCondition::new("age", Operator::Greater, 18)]);
//!
//! assert_eq!(config.filter.len(), 1);
//! ```

use std::num::NonZeroU32;

use serde::{Deserialize, Deserializer};
use serde_json::Number;

use crate::ast::{null_as_default, BinaryOp, Literal, OrderDirection, SelectStatement};

/// One sort key: an attribute and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderSpec {
    /// Attribute name or column alias.
    pub attribute: String,
    /// Sort direction, parsed from `asc`/`desc` in any letter case.
    #[serde(deserialize_with = "direction_from_str")]
    pub direction: OrderDirection,
}

fn direction_from_str<'de, D>(deserializer: D) -> Result<OrderDirection, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Abstract comparison operators accepted in filter conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    /// Equal (`=`, or `IS` against null)
    Equal,
    /// Not equal (`<>`, or `IS NOT` against null)
    NotEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterOrEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessOrEqual,
}

impl Operator {
    /// Maps the operator to its SQL operator.
    ///
    /// Equality tests against null become `IS` / `IS NOT`; the ordering
    /// operators are unaffected by a null right-hand side.
    #[must_use]
    pub const fn to_sql(self, value_is_null: bool) -> BinaryOp {
        match (self, value_is_null) {
            (Self::Equal, true) => BinaryOp::Is,
            (Self::NotEqual, true) => BinaryOp::IsNot,
            (Self::Equal, false) => BinaryOp::Eq,
            (Self::NotEqual, false) => BinaryOp::NotEq,
            (Self::Greater, _) => BinaryOp::Gt,
            (Self::GreaterOrEqual, _) => BinaryOp::GtEq,
            (Self::Less, _) => BinaryOp::Lt,
            (Self::LessOrEqual, _) => BinaryOp::LtEq,
        }
    }

    /// Returns the configuration name of the operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "notEqual",
            Self::Greater => "greater",
            Self::GreaterOrEqual => "greaterOrEqual",
            Self::Less => "less",
            Self::LessOrEqual => "lessOrEqual",
        }
    }
}

/// A scalar filter value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null.
    Null,
    /// Numeric value, kept exactly as written (signed, unsigned or float).
    Number(Number),
    /// Text value.
    String(String),
}

impl Value {
    /// Converts the value into an AST literal.
    #[must_use]
    pub fn to_literal(&self) -> Literal {
        match self {
            Self::Null => Literal::Null,
            Self::Number(n) => Literal::Number(n.clone()),
            Self::String(s) => Literal::String(s.clone()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// Non-finite floats have no SQL number representation and become null.
impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The attribute side of a filter condition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Attribute {
    /// A single attribute name or column alias.
    Single(String),
    /// A composite key: several attributes matched together as a tuple.
    Composite(Vec<String>),
}

impl Attribute {
    /// Creates a composite key attribute.
    #[must_use]
    pub fn composite<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Composite(names.into_iter().map(Into::into).collect())
    }

    /// Returns a printable name, comma-joining composite keys.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Single(name) => name.clone(),
            Self::Composite(names) => names.join(","),
        }
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Self::Single(name.to_string())
    }
}

impl From<String> for Attribute {
    fn from(name: String) -> Self {
        Self::Single(name)
    }
}

/// The value side of a filter condition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A single value, used with a single attribute.
    Scalar(Value),
    /// One value tuple per accepted key, used with a composite attribute.
    Tuples(Vec<Vec<Value>>),
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<Vec<Value>>> for FilterValue {
    fn from(tuples: Vec<Vec<Value>>) -> Self {
        Self::Tuples(tuples)
    }
}

/// One condition of an AND-group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterCondition {
    /// Attribute (or composite key) being compared.
    pub attribute: Attribute,
    /// Comparison operator.
    pub operator: Operator,
    /// Value (or value tuples) compared against.
    pub value: FilterValue,
}

impl FilterCondition {
    /// Creates a condition comparing a single attribute with a scalar value.
    #[must_use]
    pub fn new(attribute: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            attribute: Attribute::Single(attribute.into()),
            operator,
            value: FilterValue::Scalar(value.into()),
        }
    }

    /// Creates a composite key equality condition matching any of the tuples.
    #[must_use]
    pub fn composite<I, S>(attributes: I, tuples: Vec<Vec<Value>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attribute: Attribute::composite(attributes),
            operator: Operator::Equal,
            value: FilterValue::Tuples(tuples),
        }
    }
}

/// Declarative description of the query shape to compile onto an AST.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryConfig {
    /// Sort keys, primary key first. Empty leaves ORDER BY untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: Vec<OrderSpec>,
    /// Page size. Unset leaves LIMIT untouched.
    #[serde(default)]
    pub limit: Option<NonZeroU32>,
    /// 1-based page number, only meaningful together with `limit`.
    #[serde(default)]
    pub page: Option<NonZeroU32>,
    /// OR-groups of AND-conditions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub filter: Vec<Vec<FilterCondition>>,
    /// Attributes the search text is matched against.
    #[serde(default, deserialize_with = "null_as_default")]
    pub searchable: Vec<String>,
    /// Raw search text. Empty text counts as no search.
    #[serde(default)]
    pub search: Option<String>,
    /// Per-group row limit. Not supported; its presence rejects the config.
    #[serde(default)]
    pub limit_per: Option<serde_json::Value>,
}

impl QueryConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sort key.
    #[must_use]
    pub fn order(mut self, attribute: impl Into<String>, direction: OrderDirection) -> Self {
        self.order.push(OrderSpec {
            attribute: attribute.into(),
            direction,
        });
        self
    }

    /// Sets the page size. Zero clears it.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = NonZeroU32::new(limit);
        self
    }

    /// Sets the 1-based page number. Zero clears it.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = NonZeroU32::new(page);
        self
    }

    /// Appends an AND-group, OR-ed with the groups already present.
    #[must_use]
    pub fn filter_group(mut self, group: Vec<FilterCondition>) -> Self {
        self.filter.push(group);
        self
    }

    /// Sets the search text and the attributes it is matched against.
    #[must_use]
    pub fn search<I, S>(mut self, searchable: I, text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable = searchable.into_iter().map(Into::into).collect();
        self.search = Some(text.into());
        self
    }

    /// Requests a per-group row limit.
    #[must_use]
    pub fn limit_per(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.limit_per = Some(value.into());
        self
    }

    /// Returns the search text if a search was requested.
    #[must_use]
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|text| !text.is_empty())
    }
}

/// A configuration together with the AST it applies to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryDocument {
    /// The query shape.
    #[serde(flatten)]
    pub config: QueryConfig,
    /// The base SELECT statement.
    #[serde(rename = "queryAST")]
    pub query_ast: SelectStatement,
}
