//! Vertica descriptor.
//!
//! Vertica is close to the baseline for expressions (native ILIKE,
//! bitwise operators, IS TRUE) and supports IF [NOT] EXISTS on table
//! DDL. Schema introspection reads the system catalog: `columns` joined
//! to `table_constraints` on the table id, with primary-key membership
//! detected by the well-known `C_PRIMARY` constraint name.

use crate::dialect::{Capabilities, Dialect};
use crate::error::DialectResult;
use crate::ir::{AlterOp, AlterTable, Expr, Ident, Join, JoinKind, Select, TableRef};

/// Primary-key constraints carry this name in the Vertica catalog.
pub const PRIMARY_KEY_CONSTRAINT: &str = "C_PRIMARY";

impl Dialect {
    /// The Vertica descriptor.
    pub fn vertica() -> Dialect {
        Dialect {
            name: "vertica",
            caps: Capabilities {
                ilike: true,
                create_table_if_not_exists: true,
                drop_table_if_exists: true,
                transaction_isolation_levels: true,
                ..Capabilities::default()
            },
            alter_table_hook: Some(alter_table),
            primary_key_constraint: Some(PRIMARY_KEY_CONSTRAINT),
            schema_query_hook: Some(schema_query),
            ..Dialect::ansi()
        }
    }
}

/// Vertica spells column renames `RENAME COLUMN old TO new`; everything
/// else uses the default renderings.
fn alter_table(dialect: &Dialect, stmt: &AlterTable) -> Option<DialectResult<String>> {
    match &stmt.op {
        AlterOp::RenameColumn { name, new_name } => Some(Ok(format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {}",
            dialect.quote_qualified(&stmt.table),
            dialect.quote_identifier(name),
            dialect.quote_identifier(new_name)
        ))),
        _ => None,
    }
}

/// Build the catalog query recovering column metadata for one table.
fn schema_query(table: &str) -> Select {
    Select {
        columns: vec![
            Expr::col("column_name"),
            Expr::col("constraint_name"),
            Expr::col("is_nullable"),
            Expr::col("column_default"),
            Expr::col("data_type"),
        ],
        from: Some(TableRef::new("columns")),
        joins: vec![Join {
            kind: JoinKind::Left,
            table: TableRef::new("table_constraints"),
            on: Some(
                Expr::col(Ident::qualified("columns", "table_id"))
                    .eq(Expr::col(Ident::qualified("table_constraints", "table_id"))),
            ),
        }],
        filter: Some(Expr::col("table_name").eq(Expr::lit(table))),
        ..Default::default()
    }
}
