//! Clause assembly for SELECT and INSERT statements.
//!
//! The dialect descriptor supplies an ordered clause list; only clauses
//! the statement actually populates are emitted, joined by single
//! spaces. Constructs the dialect cannot express fail here, before any
//! SQL is produced.

use crate::dialect::Clause;
use crate::error::{DialectError, DialectResult};
use crate::ir::{Cte, Insert, Select, TableRef};
use crate::render::expr::append_expr;
use crate::render::{Ctx, Rendered};

/// Render a SELECT statement.
pub fn select(stmt: &Select, dialect: &crate::dialect::Dialect) -> DialectResult<Rendered> {
    let mut ctx = Ctx::new(dialect);
    let mut sql = String::new();
    append_select(stmt, &mut ctx, &mut sql)?;
    Ok(ctx.into_rendered(sql))
}

/// Render an INSERT statement.
pub fn insert(stmt: &Insert, dialect: &crate::dialect::Dialect) -> DialectResult<Rendered> {
    if stmt.values.is_empty() {
        return Err(DialectError::Config(
            "INSERT requires at least one row of values".to_string(),
        ));
    }

    let mut ctx = Ctx::new(dialect);
    let mut sql = String::new();

    sql.push_str("INSERT INTO ");
    sql.push_str(&dialect.quote_qualified(&stmt.table));
    if !stmt.columns.is_empty() {
        let cols: Vec<String> = stmt
            .columns
            .iter()
            .map(|c| dialect.quote_identifier(c))
            .collect();
        sql.push_str(" (");
        sql.push_str(&cols.join(", "));
        sql.push(')');
    }
    sql.push_str(" VALUES ");
    for (i, row) in stmt.values.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                sql.push_str(", ");
            }
            append_expr(value, &mut ctx, &mut sql)?;
        }
        sql.push(')');
    }

    Ok(ctx.into_rendered(sql))
}

pub(crate) fn append_select(stmt: &Select, ctx: &mut Ctx, sql: &mut String) -> DialectResult<()> {
    check_ctes(stmt, ctx)?;

    let clauses = ctx.dialect.select_clauses;
    let mut first = true;
    for clause in clauses {
        let mut fragment = String::new();
        render_clause(*clause, stmt, ctx, &mut fragment)?;
        if fragment.is_empty() {
            continue;
        }
        if !first {
            sql.push(' ');
        }
        sql.push_str(&fragment);
        first = false;
    }
    Ok(())
}

/// Reject CTE shapes the dialect cannot express, before rendering.
fn check_ctes(stmt: &Select, ctx: &Ctx) -> DialectResult<()> {
    if stmt.ctes.is_empty() {
        return Ok(());
    }
    let caps = ctx.dialect.caps;
    if !caps.cte {
        return Err(DialectError::unsupported(
            "common table expressions",
            ctx.dialect.name,
        ));
    }
    for cte in &stmt.ctes {
        if cte.recursive && !caps.recursive_cte {
            return Err(DialectError::unsupported(
                "recursive common table expressions",
                ctx.dialect.name,
            ));
        }
        if cte.recursive && caps.recursive_cte_requires_column_aliases && cte.columns.is_empty() {
            return Err(DialectError::unsupported(
                "recursive common table expressions without column aliases",
                ctx.dialect.name,
            ));
        }
    }
    Ok(())
}

fn render_clause(
    clause: Clause,
    stmt: &Select,
    ctx: &mut Ctx,
    sql: &mut String,
) -> DialectResult<()> {
    match clause {
        Clause::With => {
            if !stmt.ctes.is_empty() {
                append_with(&stmt.ctes, ctx, sql)?;
            }
        }
        Clause::Select => sql.push_str("SELECT"),
        Clause::Distinct => {
            if stmt.distinct {
                sql.push_str("DISTINCT");
            }
        }
        Clause::Columns => {
            if stmt.columns.is_empty() {
                sql.push('*');
            } else {
                for (i, col) in stmt.columns.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    append_expr(col, ctx, sql)?;
                }
            }
        }
        Clause::From => match (&stmt.from, ctx.dialect.default_from) {
            (Some(table), _) => {
                sql.push_str("FROM ");
                append_table(table, ctx, sql);
            }
            (None, Some(dummy)) => {
                sql.push_str("FROM ");
                sql.push_str(dummy);
            }
            (None, None) => {}
        },
        Clause::Join => {
            for (i, join) in stmt.joins.iter().enumerate() {
                if i > 0 {
                    sql.push(' ');
                }
                sql.push_str(join.kind.sql_keyword());
                sql.push(' ');
                append_table(&join.table, ctx, sql);
                if let Some(on) = &join.on {
                    sql.push_str(" ON ");
                    append_expr(on, ctx, sql)?;
                }
            }
        }
        Clause::Where => {
            if let Some(filter) = &stmt.filter {
                sql.push_str("WHERE ");
                append_expr(filter, ctx, sql)?;
            }
        }
        Clause::Group => {
            if !stmt.group_by.is_empty() {
                sql.push_str("GROUP BY ");
                for (i, expr) in stmt.group_by.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    append_expr(expr, ctx, sql)?;
                }
            }
        }
        Clause::Having => {
            if let Some(having) = &stmt.having {
                sql.push_str("HAVING ");
                append_expr(having, ctx, sql)?;
            }
        }
        Clause::Compounds => {
            for (i, (op, query)) in stmt.compounds.iter().enumerate() {
                if i > 0 {
                    sql.push(' ');
                }
                sql.push_str(op.sql_keyword());
                sql.push_str(" (");
                append_select(query, ctx, sql)?;
                sql.push(')');
            }
        }
        Clause::Order => {
            if !stmt.order_by.is_empty() {
                sql.push_str("ORDER BY ");
                for (i, ordering) in stmt.order_by.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    append_expr(&ordering.expr, ctx, sql)?;
                    sql.push(' ');
                    sql.push_str(ordering.order.sql_keyword());
                }
            }
        }
        Clause::Limit => {
            if let Some(n) = stmt.limit {
                sql.push_str(&format!("LIMIT {}", n));
                if let Some(m) = stmt.offset {
                    sql.push_str(&format!(" OFFSET {}", m));
                }
            } else if let Some(m) = stmt.offset {
                sql.push_str(&format!("OFFSET {}", m));
            }
        }
        Clause::Lock => {
            if let Some(mode) = stmt.lock {
                sql.push_str(mode.sql_keyword());
            }
        }
    }
    Ok(())
}

/// `WITH [RECURSIVE] name(a, b) AS (...), ...`
///
/// If any CTE in the statement is recursive the whole clause renders
/// under the RECURSIVE keyword. Some backends accept nothing else; the
/// blanket keyword is a documented limitation, not a bug to fix.
fn append_with(ctes: &[Cte], ctx: &mut Ctx, sql: &mut String) -> DialectResult<()> {
    if ctes.iter().any(|c| c.recursive) {
        sql.push_str("WITH RECURSIVE ");
    } else {
        sql.push_str("WITH ");
    }
    for (i, cte) in ctes.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&ctx.dialect.quote_identifier(&cte.name));
        if !cte.columns.is_empty() {
            let cols: Vec<String> = cte
                .columns
                .iter()
                .map(|c| ctx.dialect.quote_identifier(c))
                .collect();
            sql.push('(');
            sql.push_str(&cols.join(", "));
            sql.push(')');
        }
        sql.push_str(" AS (");
        append_select(&cte.query, ctx, sql)?;
        sql.push(')');
    }
    Ok(())
}

fn append_table(table: &TableRef, ctx: &Ctx, sql: &mut String) {
    sql.push_str(&ctx.dialect.quote_qualified(&table.name));
    if let Some(alias) = &table.alias {
        sql.push_str(" AS ");
        sql.push_str(&ctx.dialect.quote_identifier(alias));
    }
}
