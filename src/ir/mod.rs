//! Engine-agnostic query and schema IR.
//!
//! Statements are plain immutable trees of typed nodes. Translation into
//! dialect SQL only ever reads them, so a tree can be shared across
//! threads and rendered against any number of dialects.

pub mod ddl;
pub mod expr;
pub mod operators;
pub mod query;
pub mod values;

pub use self::ddl::{
    AlterKind, AlterOp, AlterTable, ColumnDef, CreateTableAs, DropTable, TypeDef,
};
pub use self::expr::{Expr, Ident};
pub use self::operators::{JoinKind, LockMode, Operator, SetOp, SortOrder};
pub use self::query::{Cte, Insert, Join, Ordering, Select, TableRef};
pub use self::values::Value;
