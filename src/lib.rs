//! Engine-agnostic SQL IR and dialect translation core.
//!
//! Statements are built as immutable [`ir`] trees, translated into
//! backend-specific SQL text by [`render`] against a [`dialect`]
//! descriptor, and optionally executed through an [`engine::Executor`]
//! implementation. Translation is pure and deterministic; capability
//! mismatches fail before any SQL reaches a backend.

pub mod dialect;
pub mod engine;
pub mod error;
pub mod ir;
pub mod render;
pub mod schema;

pub use dialect::{Dialect, Registry};
pub use error::{DialectError, DialectResult};
pub use render::Rendered;

pub mod prelude {
    pub use crate::dialect::{Dialect, Registry};
    pub use crate::engine::{Engine, Executor, Row};
    pub use crate::error::{DialectError, DialectResult};
    pub use crate::ir::*;
    pub use crate::render::Rendered;
}
