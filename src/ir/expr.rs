use serde::{Deserialize, Serialize};

use crate::ir::{Operator, Value};

/// A possibly-qualified identifier (`column` or `table.column`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    /// Table or schema qualifier, if any.
    #[serde(default)]
    pub qualifier: Option<String>,
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::new(name)
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::new(name)
    }
}

/// A general expression node.
///
/// Trees are immutable once built; translation only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A typed literal value
    Literal(Value),
    /// A column reference
    Ident(Ident),
    /// Function call (COALESCE, UPPER, ...)
    Function { name: String, args: Vec<Expr> },
    /// Binary expression (left op right)
    Binary {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary expression (prefix or postfix, depending on the operator)
    Unary { op: Operator, operand: Box<Expr> },
    /// N-ary expression for associative operators; folded left-to-right
    Nary { op: Operator, operands: Vec<Expr> },
    /// Raw SQL escape hatch, emitted verbatim
    Raw(String),
}

impl Expr {
    /// A column reference.
    pub fn col(name: impl Into<Ident>) -> Self {
        Expr::Ident(name.into())
    }

    /// A literal value.
    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// A bound parameter reference (1-based).
    pub fn param(n: usize) -> Self {
        Expr::Literal(Value::Param(n))
    }

    /// A function call.
    pub fn func(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    /// A binary expression.
    pub fn binary(op: Operator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// A unary expression.
    pub fn unary(op: Operator, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// An n-ary expression over an associative operator.
    pub fn nary(op: Operator, operands: Vec<Expr>) -> Self {
        Expr::Nary { op, operands }
    }

    /// `self = other`
    pub fn eq(self, other: Expr) -> Self {
        Expr::binary(Operator::Eq, self, other)
    }

    /// `self AND other`
    pub fn and(self, other: Expr) -> Self {
        Expr::binary(Operator::And, self, other)
    }

    /// `self OR other`
    pub fn or(self, other: Expr) -> Self {
        Expr::binary(Operator::Or, self, other)
    }
}
