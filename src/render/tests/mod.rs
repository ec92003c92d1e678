//! Translation test modules.
//!
//! Tests are organized by category:
//! - `core`: clause assembly, literals, parameters
//! - `dialects`: per-engine behavior (emulations, capability errors)
//! - `ddl`: ALTER TABLE, CREATE TABLE AS, DROP TABLE

mod dialects;
