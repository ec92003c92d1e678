//! Per-engine behavior: operator emulations, capability errors, and
//! dialect-specific clause assembly.

use pretty_assertions::assert_eq;

use crate::dialect::Dialect;
use crate::error::DialectError;
use crate::ir::{Cte, Expr, Operator, Select, Value};
use crate::render;

fn filter_sql(condition: Expr, dialect: &Dialect) -> String {
    let stmt = Select::from_table("t").filter(condition);
    render::select(&stmt, dialect).unwrap().sql
}

fn filter_err(condition: Expr, dialect: &Dialect) -> DialectError {
    let stmt = Select::from_table("t").filter(condition);
    render::select(&stmt, dialect).unwrap_err()
}

#[test]
fn test_hsqldb_emulates_ilike_with_upper() {
    let cond = Expr::binary(Operator::ILike, Expr::col("name"), Expr::lit("a%"));
    assert_eq!(
        filter_sql(cond, &Dialect::hsqldb()),
        "SELECT * FROM \"t\" WHERE (UPPER(\"name\") LIKE UPPER('a%'))"
    );
}

#[test]
fn test_hsqldb_emulated_not_ilike_preserves_negation() {
    let cond = Expr::binary(Operator::NotILike, Expr::col("name"), Expr::lit("a%"));
    assert_eq!(
        filter_sql(cond, &Dialect::hsqldb()),
        "SELECT * FROM \"t\" WHERE (UPPER(\"name\") NOT LIKE UPPER('a%'))"
    );
}

#[test]
fn test_vertica_renders_ilike_natively() {
    let cond = Expr::binary(Operator::ILike, Expr::col("name"), Expr::lit("a%"));
    assert_eq!(
        filter_sql(cond, &Dialect::vertica()),
        "SELECT * FROM \"t\" WHERE (\"name\" ILIKE 'a%')"
    );
}

#[test]
fn test_hsqldb_bitwise_functions_fold_left_to_right() {
    let cond = Expr::nary(
        Operator::BitAnd,
        vec![Expr::col("a"), Expr::col("b"), Expr::col("c")],
    );
    assert_eq!(
        filter_sql(cond, &Dialect::hsqldb()),
        "SELECT * FROM \"t\" WHERE BITAND(BITAND(\"a\", \"b\"), \"c\")"
    );
}

#[test]
fn test_hsqldb_bitor_and_bitxor() {
    let d = Dialect::hsqldb();
    let or = Expr::binary(Operator::BitOr, Expr::col("a"), Expr::col("b"));
    assert_eq!(
        filter_sql(or, &d),
        "SELECT * FROM \"t\" WHERE BITOR(\"a\", \"b\")"
    );
    let xor = Expr::binary(Operator::BitXor, Expr::col("a"), Expr::col("b"));
    assert_eq!(
        filter_sql(xor, &d),
        "SELECT * FROM \"t\" WHERE BITXOR(\"a\", \"b\")"
    );
}

#[test]
fn test_vertica_bitwise_is_native() {
    let cond = Expr::binary(Operator::BitAnd, Expr::col("a"), Expr::col("b"));
    assert_eq!(
        filter_sql(cond, &Dialect::vertica()),
        "SELECT * FROM \"t\" WHERE (\"a\" & \"b\")"
    );
}

#[test]
fn test_hsqldb_complement_uses_twos_complement_identity() {
    let cond = Expr::unary(Operator::BitNot, Expr::col("x"));
    assert_eq!(
        filter_sql(cond, &Dialect::hsqldb()),
        "SELECT * FROM \"t\" WHERE ((0 - \"x\") - 1)"
    );
}

#[test]
fn test_hsqldb_shifts_become_power_of_two_arithmetic() {
    let d = Dialect::hsqldb();
    let shl = Expr::binary(Operator::Shl, Expr::col("a"), Expr::lit(2i64));
    assert_eq!(
        filter_sql(shl, &d),
        "SELECT * FROM \"t\" WHERE (\"a\" * POWER(2, 2))"
    );
    let shr = Expr::binary(Operator::Shr, Expr::col("a"), Expr::lit(2i64));
    assert_eq!(
        filter_sql(shr, &d),
        "SELECT * FROM \"t\" WHERE (\"a\" / POWER(2, 2))"
    );
}

#[test]
fn test_hsqldb_rejects_is_true() {
    let err = filter_err(
        Expr::unary(Operator::IsTrue, Expr::col("a")),
        &Dialect::hsqldb(),
    );
    assert_eq!(err.to_string(), "IS TRUE is not supported on hsqldb");
}

#[test]
fn test_vertica_renders_is_true_natively() {
    let cond = Expr::unary(Operator::IsTrue, Expr::col("a"));
    assert_eq!(
        filter_sql(cond, &Dialect::vertica()),
        "SELECT * FROM \"t\" WHERE (\"a\" IS TRUE)"
    );
}

#[test]
fn test_hsqldb_rejects_ctes() {
    let stmt = Select::from_table("recent").with(Cte {
        name: "recent".to_string(),
        columns: vec![],
        recursive: false,
        query: Box::new(Select::from_table("events")),
    });
    let err = render::select(&stmt, &Dialect::hsqldb()).unwrap_err();
    assert!(matches!(
        err,
        DialectError::Unsupported { ref feature, dialect: "hsqldb" }
            if feature.contains("common table expressions")
    ));
}

#[test]
fn test_recursive_cte_without_aliases_rejected_when_required() {
    let mut d = Dialect::ansi();
    d.caps.recursive_cte_requires_column_aliases = true;
    let stmt = Select::from_table("walk").with(Cte {
        name: "walk".to_string(),
        columns: vec![],
        recursive: true,
        query: Box::new(Select::scalar(vec![Expr::lit(1i64)])),
    });
    assert!(render::select(&stmt, &d).is_err());
}

#[test]
fn test_hsqldb_table_less_select_gets_dummy_from() {
    let stmt = Select::scalar(vec![Expr::lit(1i64)]);
    assert_eq!(
        render::select(&stmt, &Dialect::hsqldb()).unwrap().sql,
        "SELECT 1 FROM (VALUES (0))"
    );
}

#[test]
fn test_hsqldb_explicit_from_wins_over_dummy() {
    let stmt = Select::from_table("users").columns(vec![Expr::lit(1i64)]);
    assert_eq!(
        render::select(&stmt, &Dialect::hsqldb()).unwrap().sql,
        "SELECT 1 FROM \"users\""
    );
}

#[test]
fn test_hsqldb_boolean_literals() {
    let d = Dialect::hsqldb();
    assert_eq!(render::literal(&Value::Bool(true), &d), "TRUE");
    assert_eq!(render::literal(&Value::Bool(false), &d), "FALSE");
}

#[test]
fn test_boolean_tokens_come_from_the_descriptor() {
    let mut d = Dialect::ansi();
    d.bool_true = "1";
    d.bool_false = "0";
    assert_eq!(render::literal(&Value::Bool(true), &d), "1");
    assert_eq!(render::literal(&Value::Bool(false), &d), "0");
}

#[test]
fn test_hsqldb_time_literal_drops_fractional_seconds() {
    let d = Dialect::hsqldb();
    let time = chrono::NaiveTime::from_hms_micro_opt(12, 30, 45, 500_000).unwrap();
    assert_eq!(render::literal(&Value::from(time), &d), "'12:30:45'");

    // Timestamps keep them.
    let ts = chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_micro_opt(12, 30, 45, 500_000)
        .unwrap();
    assert_eq!(
        render::literal(&Value::from(ts), &d),
        "'2024-01-15 12:30:45.500000'"
    );
}

#[test]
fn test_emulation_error_carries_no_sql() {
    let err = filter_err(
        Expr::unary(Operator::IsFalse, Expr::col("a")),
        &Dialect::hsqldb(),
    );
    // Capability errors are raised before rendering completes, so
    // attaching SQL later must leave them untouched.
    let err = err.with_sql("SELECT 1");
    assert!(matches!(err, DialectError::Unsupported { .. }));
}
