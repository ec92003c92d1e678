use serde::{Deserialize, Serialize};

/// The fixed operator set the IR exposes.
///
/// Every member must either render natively or through a documented
/// emulation on each dialect; there is no silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// Logical AND
    And,
    /// Logical OR
    Or,
    /// Logical NOT (prefix)
    Not,
    /// Bitwise AND (&)
    BitAnd,
    /// Bitwise OR (|)
    BitOr,
    /// Bitwise XOR (^)
    BitXor,
    /// Bitwise complement (~, prefix)
    BitNot,
    /// Shift left (<<)
    Shl,
    /// Shift right (>>)
    Shr,
    /// LIKE pattern match
    Like,
    /// NOT LIKE pattern match
    NotLike,
    /// Case-insensitive LIKE
    ILike,
    /// Negated case-insensitive LIKE
    NotILike,
    /// IS TRUE (postfix)
    IsTrue,
    /// IS FALSE (postfix)
    IsFalse,
}

impl Operator {
    /// The native SQL spelling of this operator.
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::BitAnd => "&",
            Operator::BitOr => "|",
            Operator::BitXor => "^",
            Operator::BitNot => "~",
            Operator::Shl => "<<",
            Operator::Shr => ">>",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::ILike => "ILIKE",
            Operator::NotILike => "NOT ILIKE",
            Operator::IsTrue => "IS TRUE",
            Operator::IsFalse => "IS FALSE",
        }
    }

    /// True for operators written before their single operand.
    pub fn is_prefix(&self) -> bool {
        matches!(self, Operator::Not | Operator::BitNot)
    }

    /// True for operators written after their single operand.
    pub fn is_postfix(&self) -> bool {
        matches!(self, Operator::IsTrue | Operator::IsFalse)
    }

    /// True for operators that accept more than two operands and fold
    /// left-to-right.
    pub fn is_associative(&self) -> bool {
        matches!(
            self,
            Operator::And
                | Operator::Or
                | Operator::BitAnd
                | Operator::BitOr
                | Operator::BitXor
                | Operator::Shl
                | Operator::Shr
        )
    }
}

/// Sort order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// Set operation type for compound queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOp {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOp {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            SetOp::Union => "UNION",
            SetOp::UnionAll => "UNION ALL",
            SetOp::Intersect => "INTERSECT",
            SetOp::Except => "EXCEPT",
        }
    }
}

/// Row locking mode for SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockMode {
    Update,
    Share,
}

impl LockMode {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            LockMode::Update => "FOR UPDATE",
            LockMode::Share => "FOR SHARE",
        }
    }
}
