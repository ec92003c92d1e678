//! Dialect translation: IR trees in, SQL text out.
//!
//! Translation is a pure function of the statement and the active
//! [`Dialect`](crate::dialect::Dialect) descriptor: no I/O, no shared
//! mutable state, deterministic output for identical inputs. Capability
//! mismatches surface here as errors before any SQL could reach a
//! backend.

pub mod clause;
pub mod ddl;
pub mod expr;
pub mod literal;

#[cfg(test)]
mod tests;

pub use clause::{insert, select};
pub use ddl::{alter_table, create_table_as, drop_table, type_literal};
pub use literal::literal;

use crate::dialect::Dialect;
use crate::ir::Value;

/// A rendered statement: the SQL text plus the bound-parameter
/// references encountered, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Shared state for one translation call.
pub(crate) struct Ctx<'a> {
    pub dialect: &'a Dialect,
    params: Vec<Value>,
    index: usize,
}

impl<'a> Ctx<'a> {
    pub(crate) fn new(dialect: &'a Dialect) -> Self {
        Self {
            dialect,
            params: Vec::new(),
            index: 0,
        }
    }

    /// Record a bound parameter and return its placeholder text.
    pub(crate) fn push_param(&mut self, value: Value) -> String {
        self.index += 1;
        self.params.push(value);
        (self.dialect.placeholder)(self.index)
    }

    pub(crate) fn into_rendered(self, sql: String) -> Rendered {
        Rendered {
            sql,
            params: self.params,
        }
    }
}
