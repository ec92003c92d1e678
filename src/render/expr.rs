//! Expression translation.
//!
//! Maps abstract operators onto the active dialect's syntax, falling
//! back to documented emulations when an operator has no native form:
//!
//! * case-insensitive LIKE becomes `UPPER(a) LIKE UPPER(b)`, negation
//!   preserved;
//! * bitwise AND/OR/XOR become `BITAND`/`BITOR`/`BITXOR` calls, folded
//!   pairwise left-to-right over more than two operands;
//! * bitwise complement becomes the two's-complement identity
//!   `((0 - x) - 1)`;
//! * shifts become multiplication/division by `POWER(2, n)` — only
//!   valid for non-negative, non-overflowing operands; the inaccuracy
//!   is deliberate and matches the engines this emulation targets;
//! * `IS TRUE`/`IS FALSE` have no equivalent and are rejected.

use crate::error::{DialectError, DialectResult};
use crate::ir::{Expr, Operator, Value};
use crate::render::{Ctx, literal};

/// Append an expression to the output buffer.
pub(crate) fn append_expr(e: &Expr, ctx: &mut Ctx, sql: &mut String) -> DialectResult<()> {
    match e {
        Expr::Literal(Value::Param(n)) => {
            let placeholder = ctx.push_param(Value::Param(*n));
            sql.push_str(&placeholder);
        }
        Expr::Literal(v) => sql.push_str(&literal(v, ctx.dialect)),
        Expr::Ident(ident) => sql.push_str(&ctx.dialect.quote_qualified(ident)),
        Expr::Raw(text) => sql.push_str(text),
        Expr::Function { name, args } => {
            sql.push_str(name);
            sql.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                append_expr(arg, ctx, sql)?;
            }
            sql.push(')');
        }
        Expr::Binary { op, left, right } => {
            append_op(*op, &[left, right], ctx, sql)?;
        }
        Expr::Unary { op, operand } => {
            append_op(*op, &[operand], ctx, sql)?;
        }
        Expr::Nary { op, operands } => {
            let refs: Vec<&Expr> = operands.iter().collect();
            append_op(*op, &refs, ctx, sql)?;
        }
    }
    Ok(())
}

/// Render one expression into a standalone fragment.
fn fragment(e: &Expr, ctx: &mut Ctx) -> DialectResult<String> {
    let mut s = String::new();
    append_expr(e, ctx, &mut s)?;
    Ok(s)
}

fn check_arity(op: Operator, args: &[&Expr], ctx: &Ctx) -> DialectResult<()> {
    let ok = if op.is_prefix() || op.is_postfix() {
        args.len() == 1
    } else if op.is_associative() {
        args.len() >= 2
    } else {
        args.len() == 2
    };
    if ok {
        Ok(())
    } else {
        Err(DialectError::Config(format!(
            "operator {} applied to {} operand(s) on {}",
            op.sql_symbol(),
            args.len(),
            ctx.dialect.name
        )))
    }
}

fn append_op(op: Operator, args: &[&Expr], ctx: &mut Ctx, sql: &mut String) -> DialectResult<()> {
    check_arity(op, args, ctx)?;
    let caps = ctx.dialect.caps;

    match op {
        Operator::ILike | Operator::NotILike if !caps.ilike => {
            // Rewrite over upper-cased operands, preserving negation.
            let base = if op == Operator::ILike {
                Operator::Like
            } else {
                Operator::NotLike
            };
            let upper_args: Vec<Expr> = args
                .iter()
                .map(|a| Expr::func("UPPER", vec![(*a).clone()]))
                .collect();
            let refs: Vec<&Expr> = upper_args.iter().collect();
            append_infix(base, &refs, ctx, sql)
        }
        Operator::BitAnd | Operator::BitOr | Operator::BitXor if !caps.bitwise_ops => {
            let func = match op {
                Operator::BitAnd => "BITAND",
                Operator::BitOr => "BITOR",
                _ => "BITXOR",
            };
            // Binary reduction, left-to-right.
            let mut acc = fragment(args[0], ctx)?;
            for arg in &args[1..] {
                let rhs = fragment(arg, ctx)?;
                acc = format!("{}({}, {})", func, acc, rhs);
            }
            sql.push_str(&acc);
            Ok(())
        }
        Operator::BitNot if !caps.bitwise_ops => {
            sql.push_str("((0 - ");
            append_expr(args[0], ctx, sql)?;
            sql.push_str(") - 1)");
            Ok(())
        }
        Operator::Shl | Operator::Shr if !caps.shift_ops => {
            let sym = if op == Operator::Shl { '*' } else { '/' };
            let mut acc = fragment(args[0], ctx)?;
            for arg in &args[1..] {
                let rhs = fragment(arg, ctx)?;
                acc = format!("({} {} POWER(2, {}))", acc, sym, rhs);
            }
            sql.push_str(&acc);
            Ok(())
        }
        Operator::IsTrue | Operator::IsFalse if !caps.is_true => Err(DialectError::unsupported(
            op.sql_symbol(),
            ctx.dialect.name,
        )),
        op if op.is_prefix() => {
            let sym = op.sql_symbol();
            sql.push_str(sym);
            if sym.ends_with(|c: char| c.is_ascii_alphabetic()) {
                sql.push(' ');
            }
            sql.push('(');
            append_expr(args[0], ctx, sql)?;
            sql.push(')');
            Ok(())
        }
        op if op.is_postfix() => {
            sql.push('(');
            append_expr(args[0], ctx, sql)?;
            sql.push(' ');
            sql.push_str(op.sql_symbol());
            sql.push(')');
            Ok(())
        }
        op => append_infix(op, args, ctx, sql),
    }
}

/// `(a OP b [OP c ...])`
fn append_infix(op: Operator, args: &[&Expr], ctx: &mut Ctx, sql: &mut String) -> DialectResult<()> {
    sql.push('(');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            sql.push(' ');
            sql.push_str(op.sql_symbol());
            sql.push(' ');
        }
        append_expr(arg, ctx, sql)?;
    }
    sql.push(')');
    Ok(())
}
