//! HSQLDB descriptor.
//!
//! HSQLDB quotes with double quotes and uses TRUE/FALSE literals, but
//! diverges from the baseline in a few places: no native bitwise or
//! shift operators, no ILIKE, no IS TRUE, and no usable common table
//! expressions. HSQLDB does nominally accept CTEs, but the support is
//! broken: CTEs behave like temporary tables or views and outlive the
//! statement, and a CTE from an earlier query can shadow a later one of
//! the same name. The descriptor therefore disables them outright.

use crate::dialect::{Capabilities, Clause, Dialect};

/// SELECT clause order without a WITH slot.
const SELECT_CLAUSES: &[Clause] = &[
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

/// Primary-key indexes start with this prefix on HSQLDB.
pub const PRIMARY_KEY_INDEX_PREFIX: &str = "sys_idx_sys_pk_";

/// Fetches the last inserted identity value on the current connection.
pub const IDENTITY_FETCH_SQL: &str = "CALL IDENTITY()";

impl Dialect {
    /// The HSQLDB descriptor.
    pub fn hsqldb() -> Dialect {
        Dialect {
            name: "hsqldb",
            caps: Capabilities {
                is_true: false,
                cte: false,
                recursive_cte: false,
                recursive_cte_requires_column_aliases: true,
                bitwise_ops: false,
                shift_ops: false,
                ilike: false,
                // Fractional seconds work in timestamps but not in times.
                fractional_seconds_in_time: false,
                fractional_seconds_in_timestamp: true,
                create_table_if_not_exists: false,
                drop_table_if_exists: true,
                transaction_isolation_levels: true,
            },
            select_clauses: SELECT_CLAUSES,
            // Keeps table-less selects valid, e.g. SELECT 1 FROM (VALUES (0)).
            default_from: Some("(VALUES (0))"),
            create_table_as_with_data: true,
            primary_key_index_prefix: Some(PRIMARY_KEY_INDEX_PREFIX),
            identity_fetch_sql: Some(IDENTITY_FETCH_SQL),
            ..Dialect::ansi()
        }
    }
}
