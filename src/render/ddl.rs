//! DDL translation: ALTER TABLE, CREATE TABLE AS, DROP TABLE.
//!
//! Each alter operation renders as one standalone statement. Operations
//! an engine structurally cannot perform surface as capability errors
//! with the offending operation kind and dialect name; invalid SQL is
//! never emitted in their place.

use crate::dialect::Dialect;
use crate::error::{DialectError, DialectResult};
use crate::ir::{AlterOp, AlterTable, ColumnDef, CreateTableAs, DropTable, TypeDef};
use crate::render::clause::append_select;
use crate::render::expr::append_expr;
use crate::render::{Ctx, Rendered};

/// Render a single alter-table operation.
pub fn alter_table(stmt: &AlterTable, dialect: &Dialect) -> DialectResult<String> {
    let kind = stmt.op.kind();
    if dialect.unsupported_alter_ops.contains(&kind) {
        return Err(DialectError::unsupported(kind.to_string(), dialect.name));
    }
    if let Some(hook) = dialect.alter_table_hook {
        if let Some(result) = hook(dialect, stmt) {
            return result;
        }
    }

    let table = dialect.quote_qualified(&stmt.table);
    Ok(match &stmt.op {
        AlterOp::RenameColumn { name, new_name } => format!(
            "ALTER TABLE {} ALTER COLUMN {} RENAME TO {}",
            table,
            dialect.quote_identifier(name),
            dialect.quote_identifier(new_name)
        ),
        AlterOp::SetColumnType { name, type_def } => format!(
            "ALTER TABLE {} ALTER COLUMN {} SET DATA TYPE {}",
            table,
            dialect.quote_identifier(name),
            type_literal(type_def, dialect)
        ),
        AlterOp::SetColumnNull { name, null } => format!(
            "ALTER TABLE {} ALTER COLUMN {} SET {}",
            table,
            dialect.quote_identifier(name),
            if *null { "NULL" } else { "NOT NULL" }
        ),
        AlterOp::AddColumn { column } => format!(
            "ALTER TABLE {} ADD COLUMN {}",
            table,
            column_def(column, dialect)?
        ),
        AlterOp::DropColumn { name } => format!(
            "ALTER TABLE {} DROP COLUMN {}",
            table,
            dialect.quote_identifier(name)
        ),
    })
}

/// Render a column type, appending identity SQL when requested.
///
/// An identity column without an explicit start renders `START WITH 1`:
/// some engines default the sequence to start at 0, which is never what
/// a serial primary key wants.
pub fn type_literal(type_def: &TypeDef, dialect: &Dialect) -> String {
    let base = dialect
        .type_literal_hook
        .and_then(|hook| hook(dialect, type_def))
        .unwrap_or_else(|| type_def.name.clone());
    if !type_def.identity {
        return base;
    }

    let mut sql = format!(
        "{} GENERATED BY DEFAULT AS IDENTITY (START WITH {}",
        base,
        type_def.start_with.unwrap_or(1)
    );
    if let Some(increment) = type_def.increment_by {
        sql.push_str(&format!(" INCREMENT BY {}", increment));
    }
    sql.push(')');
    sql
}

fn column_def(column: &ColumnDef, dialect: &Dialect) -> DialectResult<String> {
    let mut sql = format!(
        "{} {}",
        dialect.quote_identifier(&column.name),
        type_literal(&column.type_def, dialect)
    );
    if !column.null {
        sql.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default {
        sql.push_str(" DEFAULT ");
        let mut ctx = Ctx::new(dialect);
        append_expr(default, &mut ctx, &mut sql)?;
    }
    if column.primary_key {
        sql.push_str(" PRIMARY KEY");
    }
    if column.unique {
        sql.push_str(" UNIQUE");
    }
    Ok(sql)
}

/// Render CREATE TABLE ... AS (SELECT ...).
pub fn create_table_as(stmt: &CreateTableAs, dialect: &Dialect) -> DialectResult<Rendered> {
    if stmt.if_not_exists && !dialect.caps.create_table_if_not_exists {
        return Err(DialectError::unsupported(
            "CREATE TABLE IF NOT EXISTS",
            dialect.name,
        ));
    }

    let mut ctx = Ctx::new(dialect);
    let mut sql = String::from("CREATE TABLE ");
    if stmt.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&dialect.quote_qualified(&stmt.table));
    sql.push_str(" AS ");
    if dialect.create_table_as_with_data {
        // Parens around the SELECT plus explicit materialization.
        sql.push('(');
        append_select(&stmt.query, &mut ctx, &mut sql)?;
        sql.push_str(") WITH DATA");
    } else {
        append_select(&stmt.query, &mut ctx, &mut sql)?;
    }
    Ok(ctx.into_rendered(sql))
}

/// Render DROP TABLE.
pub fn drop_table(stmt: &DropTable, dialect: &Dialect) -> DialectResult<String> {
    if stmt.if_exists && !dialect.caps.drop_table_if_exists {
        return Err(DialectError::unsupported("DROP TABLE IF EXISTS", dialect.name));
    }
    Ok(format!(
        "DROP TABLE {}{}",
        if stmt.if_exists { "IF EXISTS " } else { "" },
        dialect.quote_qualified(&stmt.table)
    ))
}
