//! Dialect descriptors.
//!
//! A [`Dialect`] is an immutable bundle of capability flags and rendering
//! overrides for one backend engine. Descriptors are built once at
//! registration time and shared read-only across all translations, so no
//! locking is ever needed around them. New engines are added by composing
//! a descriptor, not by overriding behavior in shared logic.

pub mod hsqldb;
pub mod vertica;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DialectError, DialectResult};
use crate::ir::{AlterKind, AlterTable, Ident, Select, TypeDef};

/// The clause slots a SELECT statement can render, in no particular
/// order; each dialect supplies its own ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    With,
    Select,
    Distinct,
    Columns,
    From,
    Join,
    Where,
    Group,
    Having,
    Compounds,
    Order,
    Limit,
    Lock,
}

/// The standard clause order, WITH first.
pub const DEFAULT_SELECT_CLAUSES: &[Clause] = &[
    Clause::With,
    Clause::Select,
    Clause::Distinct,
    Clause::Columns,
    Clause::From,
    Clause::Join,
    Clause::Where,
    Clause::Group,
    Clause::Having,
    Clause::Compounds,
    Clause::Order,
    Clause::Limit,
    Clause::Lock,
];

/// Capability flags. A flag set to `false` either routes the construct
/// through its documented emulation or raises a capability error; it
/// never silently drops anything.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    /// Native `x IS TRUE` / `x IS FALSE`. No emulation exists; when
    /// false the construct is rejected.
    pub is_true: bool,
    /// Common table expressions.
    pub cte: bool,
    /// Recursive common table expressions.
    pub recursive_cte: bool,
    /// Recursive CTEs must carry explicit column-alias lists.
    pub recursive_cte_requires_column_aliases: bool,
    /// Native `&`, `|`, `^`, `~` operators.
    pub bitwise_ops: bool,
    /// Native `<<` / `>>` operators.
    pub shift_ops: bool,
    /// Native ILIKE.
    pub ilike: bool,
    /// Fractional seconds in a pure time type.
    pub fractional_seconds_in_time: bool,
    /// Fractional seconds in timestamps.
    pub fractional_seconds_in_timestamp: bool,
    /// CREATE TABLE IF NOT EXISTS.
    pub create_table_if_not_exists: bool,
    /// DROP TABLE IF EXISTS.
    pub drop_table_if_exists: bool,
    /// SET TRANSACTION ISOLATION LEVEL.
    pub transaction_isolation_levels: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            is_true: true,
            cte: true,
            recursive_cte: true,
            recursive_cte_requires_column_aliases: false,
            bitwise_ops: true,
            shift_ops: true,
            ilike: false,
            fractional_seconds_in_time: true,
            fractional_seconds_in_timestamp: true,
            create_table_if_not_exists: false,
            drop_table_if_exists: false,
            transaction_isolation_levels: false,
        }
    }
}

/// Override hook for alter-table rendering. Returning `None` falls back
/// to the default rendering for that operation.
pub type AlterTableHook = fn(&Dialect, &AlterTable) -> Option<DialectResult<String>>;

/// Override hook for the base type literal (identity clauses are
/// appended by the DDL translator, not the hook).
pub type TypeLiteralHook = fn(&Dialect, &TypeDef) -> Option<String>;

/// Builder for the dialect's schema-introspection catalog query.
pub type SchemaQueryHook = fn(&str) -> Select;

/// An immutable per-engine descriptor.
#[derive(Debug, Clone)]
pub struct Dialect {
    pub name: &'static str,
    /// Identifier quote character; escaped by doubling.
    pub quote: char,
    pub caps: Capabilities,
    pub bool_true: &'static str,
    pub bool_false: &'static str,
    /// Blob literal delimiters wrapping uppercase hex, e.g. `X'DEAD'`.
    pub blob_open: &'static str,
    pub blob_close: &'static str,
    /// Bound-parameter placeholder for the n-th parameter (1-based).
    pub placeholder: fn(usize) -> String,
    /// Ordered clause list for SELECT statements.
    pub select_clauses: &'static [Clause],
    /// FROM fragment substituted when a SELECT has no table, keeping
    /// scalar selects syntactically valid (e.g. `(VALUES (0))`).
    pub default_from: Option<&'static str>,
    /// CREATE TABLE AS requires parens around the SELECT plus an
    /// explicit `WITH DATA` marker.
    pub create_table_as_with_data: bool,
    /// Alter operations the engine structurally cannot perform.
    pub unsupported_alter_ops: &'static [AlterKind],
    pub alter_table_hook: Option<AlterTableHook>,
    pub type_literal_hook: Option<TypeLiteralHook>,
    /// Index-name prefix identifying primary-key indexes, matched
    /// case-insensitively. Adapter-specific heuristic, not a general
    /// algorithm.
    pub primary_key_index_prefix: Option<&'static str>,
    /// Constraint name identifying primary-key membership in catalog
    /// rows. Adapter-specific heuristic.
    pub primary_key_constraint: Option<&'static str>,
    /// Statement fetching the last inserted identity value, issued on
    /// the same connection immediately after an insert.
    pub identity_fetch_sql: Option<&'static str>,
    pub schema_query_hook: Option<SchemaQueryHook>,
}

impl Dialect {
    /// A neutral ANSI-leaning baseline descriptor. Engine descriptors
    /// are built by adjusting a copy of this.
    pub fn ansi() -> Self {
        Self {
            name: "ansi",
            quote: '"',
            caps: Capabilities::default(),
            bool_true: "TRUE",
            bool_false: "FALSE",
            blob_open: "X'",
            blob_close: "'",
            placeholder: |_| "?".to_string(),
            select_clauses: DEFAULT_SELECT_CLAUSES,
            default_from: None,
            create_table_as_with_data: false,
            unsupported_alter_ops: &[],
            alter_table_hook: None,
            type_literal_hook: None,
            primary_key_index_prefix: None,
            primary_key_constraint: None,
            identity_fetch_sql: None,
            schema_query_hook: None,
        }
    }

    /// Quote a bare identifier.
    pub fn quote_identifier(&self, name: &str) -> String {
        let escaped = name.replace(self.quote, &format!("{}{}", self.quote, self.quote));
        format!("{}{}{}", self.quote, escaped, self.quote)
    }

    /// Quote a possibly-qualified identifier.
    pub fn quote_qualified(&self, ident: &Ident) -> String {
        match &ident.qualifier {
            Some(q) => format!(
                "{}.{}",
                self.quote_identifier(q),
                self.quote_identifier(&ident.name)
            ),
            None => self.quote_identifier(&ident.name),
        }
    }

    /// Whether an index name marks a primary-key index on this engine.
    pub fn is_primary_key_index(&self, index_name: &str) -> bool {
        match self.primary_key_index_prefix {
            Some(prefix) => {
                // Byte-wise comparison; slicing the &str could split a
                // multibyte character and panic.
                index_name.len() >= prefix.len()
                    && index_name.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
            }
            None => false,
        }
    }

    /// The column type used for serial primary keys: an integer identity
    /// starting at 1 (never the backend's zero-based default).
    pub fn serial_primary_key(&self) -> TypeDef {
        TypeDef::identity("integer").start_with(1)
    }
}

/// Parse an engine version string into a comparable integer:
/// `major * 10000 + minor * 100 + patch`, e.g. `2.2.5` -> `20205`.
/// Returns `None` when no `x.y.z` triplet occurs in the string.
pub fn version_integer(version: &str) -> Option<u32> {
    fn leading_number(s: &str) -> Option<(u32, usize)> {
        let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok().map(|n| (n, digits.len()))
    }

    let bytes = version.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let rest = &version[i..];
            if let Some((major, len1)) = leading_number(rest) {
                let after_major = &rest[len1..];
                if let Some(tail) = after_major.strip_prefix('.') {
                    if let Some((minor, len2)) = leading_number(tail) {
                        let after_minor = &tail[len2..];
                        if let Some(tail2) = after_minor.strip_prefix('.') {
                            if let Some((patch, _)) = leading_number(tail2) {
                                let combined =
                                    major as u64 * 10000 + minor as u64 * 100 + patch as u64;
                                return u32::try_from(combined).ok();
                            }
                        }
                    }
                }
                i += len1;
                continue;
            }
        }
        i += 1;
    }
    None
}

/// Named collection of registered dialect descriptors. Descriptors are
/// wrapped in `Arc` so translations on many threads share one copy.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    dialects: HashMap<&'static str, Arc<Dialect>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the built-in engine descriptors.
    pub fn with_builtin_dialects() -> Self {
        let mut registry = Self::new();
        registry.register(Dialect::ansi());
        registry.register(Dialect::hsqldb());
        registry.register(Dialect::vertica());
        registry
    }

    /// Register a descriptor under its own name, returning the shared
    /// handle.
    pub fn register(&mut self, dialect: Dialect) -> Arc<Dialect> {
        let shared = Arc::new(dialect);
        self.dialects.insert(shared.name, shared.clone());
        shared
    }

    pub fn get(&self, name: &str) -> DialectResult<Arc<Dialect>> {
        self.dialects
            .get(name)
            .cloned()
            .ok_or_else(|| DialectError::UnknownDialect(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_integer() {
        assert_eq!(version_integer("2.2.5"), Some(20205));
        assert_eq!(version_integer("HSQL Database Engine 2.7.1"), Some(20701));
        assert_eq!(version_integer("10.0.0"), Some(100000));
        assert_eq!(version_integer("2.2"), None);
        assert_eq!(version_integer("garbage"), None);
    }

    #[test]
    fn test_version_integer_rejects_out_of_range_versions() {
        // 430000 * 10000 exceeds u32; must yield None, not overflow.
        assert_eq!(version_integer("430000.0.0"), None);
        assert_eq!(version_integer("429496.72.95"), Some(4294967295));
    }

    #[test]
    fn test_quote_identifier_escapes_by_doubling() {
        let d = Dialect::ansi();
        assert_eq!(d.quote_identifier("order"), "\"order\"");
        assert_eq!(d.quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_quote_qualified() {
        let d = Dialect::ansi();
        assert_eq!(
            d.quote_qualified(&Ident::qualified("users", "id")),
            "\"users\".\"id\""
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry = Registry::with_builtin_dialects();
        assert_eq!(registry.get("hsqldb").unwrap().name, "hsqldb");
        assert_eq!(registry.get("vertica").unwrap().name, "vertica");
        assert!(matches!(
            registry.get("sybase"),
            Err(DialectError::UnknownDialect(_))
        ));
    }

    #[test]
    fn test_primary_key_index_matching_is_case_insensitive() {
        let d = Dialect::hsqldb();
        assert!(d.is_primary_key_index("SYS_IDX_SYS_PK_10092"));
        assert!(d.is_primary_key_index("sys_idx_sys_pk_10092"));
        assert!(!d.is_primary_key_index("sys_idx_users_email"));
    }

    #[test]
    fn test_primary_key_index_matching_handles_multibyte_names() {
        let d = Dialect::hsqldb();
        // A multibyte character straddling the prefix length must not
        // panic; it simply fails the match.
        assert!(!d.is_primary_key_index("sys_idx_sys_pk\u{e9}x"));
        assert!(!d.is_primary_key_index("s\u{e9}"));
        assert!(d.is_primary_key_index("sys_idx_sys_pk_caf\u{e9}"));
    }
}
