use serde::{Deserialize, Serialize};

use crate::ir::{Expr, Ident, Select};

/// A column type with optional identity (auto-increment) semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Raw SQL type name, e.g. `integer` or `varchar(255)`.
    pub name: String,
    #[serde(default)]
    pub identity: bool,
    /// Identity sequence start. When absent, rendering starts the
    /// sequence at 1 rather than the backend default of 0.
    #[serde(default)]
    pub start_with: Option<i64>,
    #[serde(default)]
    pub increment_by: Option<i64>,
}

impl TypeDef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity: false,
            start_with: None,
            increment_by: None,
        }
    }

    pub fn identity(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity: true,
            start_with: None,
            increment_by: None,
        }
    }

    pub fn start_with(mut self, n: i64) -> Self {
        self.start_with = Some(n);
        self
    }

    pub fn increment_by(mut self, n: i64) -> Self {
        self.increment_by = Some(n);
        self
    }
}

/// A full column definition for ADD COLUMN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub type_def: TypeDef,
    #[serde(default)]
    pub null: bool,
    #[serde(default)]
    pub default: Option<Expr>,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, type_def: TypeDef) -> Self {
        Self {
            name: name.into(),
            type_def,
            null: true,
            default: None,
            primary_key: false,
            unique: false,
        }
    }
}

/// The kind of an alter-table operation, used for capability checks and
/// error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlterKind {
    RenameColumn,
    SetColumnType,
    SetColumnNull,
    AddColumn,
    DropColumn,
}

impl std::fmt::Display for AlterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlterKind::RenameColumn => write!(f, "RENAME COLUMN"),
            AlterKind::SetColumnType => write!(f, "SET COLUMN TYPE"),
            AlterKind::SetColumnNull => write!(f, "SET COLUMN NULL"),
            AlterKind::AddColumn => write!(f, "ADD COLUMN"),
            AlterKind::DropColumn => write!(f, "DROP COLUMN"),
        }
    }
}

/// One atomic alter-table operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlterOp {
    RenameColumn { name: String, new_name: String },
    SetColumnType { name: String, type_def: TypeDef },
    SetColumnNull { name: String, null: bool },
    AddColumn { column: ColumnDef },
    DropColumn { name: String },
}

impl AlterOp {
    pub fn kind(&self) -> AlterKind {
        match self {
            AlterOp::RenameColumn { .. } => AlterKind::RenameColumn,
            AlterOp::SetColumnType { .. } => AlterKind::SetColumnType,
            AlterOp::SetColumnNull { .. } => AlterKind::SetColumnNull,
            AlterOp::AddColumn { .. } => AlterKind::AddColumn,
            AlterOp::DropColumn { .. } => AlterKind::DropColumn,
        }
    }
}

/// ALTER TABLE with a single atomic operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterTable {
    pub table: Ident,
    pub op: AlterOp,
}

impl AlterTable {
    pub fn new(table: impl Into<Ident>, op: AlterOp) -> Self {
        Self {
            table: table.into(),
            op,
        }
    }
}

/// CREATE TABLE ... AS (SELECT ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableAs {
    pub table: Ident,
    pub query: Select,
    #[serde(default)]
    pub if_not_exists: bool,
}

/// DROP TABLE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTable {
    pub table: Ident,
    #[serde(default)]
    pub if_exists: bool,
}
