//! Expression AST types.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// A reference to a source column, optionally qualified with a table name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "column_ref")]
pub struct ColumnRef {
    /// Table name or alias (optional).
    pub table: Option<String>,
    /// Column name.
    pub column: String,
}

impl ColumnRef {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    /// Creates a column reference qualified with a table name.
    #[must_use]
    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
        }
    }
}

/// The kind of a literal, as seen by a SQL stringifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    /// Integer or floating point number.
    Number,
    /// Quoted string.
    String,
    /// The NULL keyword.
    Null,
}

/// A literal value.
///
/// Serialized as `{"type": <kind>, "value": <value>}`; the NULL literal
/// carries `"value": null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Numeric literal.
    Number(Number),
    /// String literal.
    String(String),
    /// NULL literal.
    Null,
}

impl Literal {
    /// Returns the kind of this literal.
    #[must_use]
    pub const fn kind(&self) -> LiteralKind {
        match self {
            Self::Number(_) => LiteralKind::Number,
            Self::String(_) => LiteralKind::String,
            Self::Null => LiteralKind::Null,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawLiteral {
    #[serde(rename = "type")]
    kind: LiteralKind,
    #[serde(default)]
    value: Value,
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            Self::Number(number) => Value::Number(number.clone()),
            Self::String(string) => Value::String(string.clone()),
            Self::Null => Value::Null,
        };
        RawLiteral {
            kind: self.kind(),
            value,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawLiteral::deserialize(deserializer)?;
        match (raw.kind, raw.value) {
            (LiteralKind::Number, Value::Number(number)) => Ok(Self::Number(number)),
            (LiteralKind::String, Value::String(string)) => Ok(Self::String(string)),
            (LiteralKind::Null, _) => Ok(Self::Null),
            (kind, value) => Err(D::Error::custom(format!(
                "{kind:?} literal cannot hold {value}"
            ))),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Comparison
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<>")]
    NotEq,
    #[serde(rename = "IS")]
    Is,
    #[serde(rename = "IS NOT")]
    IsNot,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,

    // String
    #[serde(rename = "LIKE")]
    Like,

    // Logical
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Like => "LIKE",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "binary_expr")]
pub struct BinaryExpr {
    /// Operator.
    pub operator: BinaryOp,
    /// Left operand.
    pub left: Box<Expr>,
    /// Right operand.
    pub right: Box<Expr>,
    /// Forces parentheses around the expression when rendered. Parsers mark
    /// this as `paren` or `parentheses`; both are read.
    #[serde(
        default,
        alias = "paren",
        alias = "parentheses",
        skip_serializing_if = "is_false"
    )]
    pub parenthesized: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// An SQL expression.
///
/// The compiler only builds columns, literals and binary expressions. Other
/// nodes found in a parsed statement (`IN` lists, function calls, unary
/// operators, sub-selects) are kept as [`Expr::Other`] and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    /// A column reference.
    Column(ColumnRef),
    /// A literal value.
    Literal(Literal),
    /// A binary expression.
    Binary(BinaryExpr),
    /// Any other node, as parsed.
    Other(Value),
}

impl From<ColumnRef> for Expr {
    fn from(column: ColumnRef) -> Self {
        Self::Column(column)
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl Expr {
    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::new(name))
    }

    /// Creates a new qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::qualified(table, name))
    }

    /// Creates a new integer literal.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Literal(Literal::Number(Number::from(value)))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary(BinaryExpr {
            operator: op,
            left: Box::new(self),
            right: Box::new(right),
            parenthesized: false,
        })
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Creates a LIKE expression.
    #[must_use]
    pub fn like(self, right: Self) -> Self {
        self.binary(BinaryOp::Like, right)
    }

    /// Marks a binary expression as parenthesized.
    ///
    /// Leaves every other node unchanged.
    #[must_use]
    pub fn parenthesized(self) -> Self {
        match self {
            Self::Binary(binary) => Self::Binary(BinaryExpr {
                parenthesized: true,
                ..binary
            }),
            other => other,
        }
    }

    /// Returns whether the expression carries the parentheses mark.
    #[must_use]
    pub const fn is_parenthesized(&self) -> bool {
        matches!(
            self,
            Self::Binary(BinaryExpr {
                parenthesized: true,
                ..
            })
        )
    }

    /// Returns the binary expression, if this is one.
    #[must_use]
    pub const fn as_binary(&self) -> Option<&BinaryExpr> {
        match self {
            Self::Binary(binary) => Some(binary),
            _ => None,
        }
    }
}
