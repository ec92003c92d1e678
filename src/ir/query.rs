use serde::{Deserialize, Serialize};

use crate::ir::{Expr, Ident, JoinKind, LockMode, SetOp, SortOrder};

/// A table reference with an optional alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: Ident,
    #[serde(default)]
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<Ident>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

/// A join to another table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableRef,
    /// ON condition; absent for CROSS joins.
    #[serde(default)]
    pub on: Option<Expr>,
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ordering {
    pub expr: Expr,
    pub order: SortOrder,
}

impl Ordering {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            order: SortOrder::Desc,
        }
    }
}

/// A common table expression definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cte {
    pub name: String,
    /// Explicit column aliases. Some backends require these for
    /// recursive CTEs.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub recursive: bool,
    pub query: Box<Select>,
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Select {
    #[serde(default)]
    pub ctes: Vec<Cte>,
    #[serde(default)]
    pub distinct: bool,
    /// Projected expressions; empty means `*`.
    #[serde(default)]
    pub columns: Vec<Expr>,
    /// Source table; `None` renders a table-less SELECT (the dialect may
    /// substitute a single-row dummy FROM).
    #[serde(default)]
    pub from: Option<TableRef>,
    #[serde(default)]
    pub joins: Vec<Join>,
    #[serde(default)]
    pub filter: Option<Expr>,
    #[serde(default)]
    pub group_by: Vec<Expr>,
    #[serde(default)]
    pub having: Option<Expr>,
    /// Chained set operations (UNION, INTERSECT, EXCEPT).
    #[serde(default)]
    pub compounds: Vec<(SetOp, Box<Select>)>,
    #[serde(default)]
    pub order_by: Vec<Ordering>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub lock: Option<LockMode>,
}

impl Select {
    /// `SELECT * FROM <table>`
    pub fn from_table(table: impl Into<Ident>) -> Self {
        Self {
            from: Some(TableRef::new(table)),
            ..Default::default()
        }
    }

    /// A table-less SELECT over the given expressions.
    pub fn scalar(columns: Vec<Expr>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    pub fn columns(mut self, columns: Vec<Expr>) -> Self {
        self.columns = columns;
        self
    }

    pub fn filter(mut self, condition: Expr) -> Self {
        self.filter = Some(condition);
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn with(mut self, cte: Cte) -> Self {
        self.ctes.push(cte);
        self
    }

    pub fn order(mut self, ordering: Ordering) -> Self {
        self.order_by.push(ordering);
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub table: Ident,
    #[serde(default)]
    pub columns: Vec<String>,
    /// One inner vector per row.
    pub values: Vec<Vec<Expr>>,
}

impl Insert {
    pub fn new(table: impl Into<Ident>, columns: Vec<String>, row: Vec<Expr>) -> Self {
        Self {
            table: table.into(),
            columns,
            values: vec![row],
        }
    }
}
