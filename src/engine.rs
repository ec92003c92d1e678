//! Execution shim.
//!
//! The translation core never talks to a backend itself. Callers supply
//! an [`Executor`] — a synchronous execute/stream contract over one live
//! connection — and an [`Engine`] couples it with a dialect descriptor:
//! render, log, execute, annotate failures with the SQL that produced
//! them. Retries, pooling and transport belong to the Executor
//! implementation, never here; DDL and DML are not assumed idempotent.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::Dialect;
use crate::error::{DialectError, DialectResult};
use crate::ir::{AlterTable, CreateTableAs, DropTable, Insert, Select, Value};
use crate::render;
use crate::schema::{self, ColumnInfo};

/// Connection configuration. Absent keys default per dialect inside the
/// Executor implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectOptions {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub ssl: bool,
}

/// One decoded result row: parallel column-name and value vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Look up a value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    /// The value at the given position.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn set(&mut self, column: &str, value: Value) {
        if let Some(i) = self.columns.iter().position(|c| c == column) {
            self.values[i] = value;
        } else {
            self.columns.push(column.to_string());
            self.values.push(value);
        }
    }
}

/// Synchronous single-connection execution contract.
///
/// `execute` returns a finite, lazy, non-restartable row iterator; the
/// caller must drain or drop it before issuing another statement on the
/// same connection. One statement is in flight per connection at a
/// time. Cancellation, if needed, is the implementation's concern.
pub trait Executor {
    type Rows: Iterator<Item = DialectResult<Row>>;

    fn execute(&mut self, sql: &str, params: &[Value]) -> DialectResult<Self::Rows>;

    /// Execute an INSERT. Defaults to plain execution.
    fn execute_insert(&mut self, sql: &str, params: &[Value]) -> DialectResult<Self::Rows> {
        self.execute(sql, params)
    }

    /// Execute a data-changing statement (UPDATE/DELETE/DDL).
    fn execute_dui(&mut self, sql: &str, params: &[Value]) -> DialectResult<Self::Rows> {
        self.execute(sql, params)
    }
}

/// A dialect descriptor paired with a live connection.
pub struct Engine<E: Executor> {
    dialect: Arc<Dialect>,
    executor: E,
}

impl<E: Executor> Engine<E> {
    pub fn new(dialect: Arc<Dialect>, executor: E) -> Self {
        Self { dialect, executor }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Render and execute a SELECT, returning the lazy row iterator.
    pub fn select(&mut self, stmt: &Select) -> DialectResult<E::Rows> {
        let rendered = render::select(stmt, &self.dialect)?;
        debug!(dialect = self.dialect.name, sql = %rendered.sql, "executing");
        self.executor
            .execute(&rendered.sql, &rendered.params)
            .map_err(|e| e.with_sql(&rendered.sql))
    }

    /// Render and execute an INSERT. When the dialect retrieves identity
    /// values through a dedicated statement (e.g. `CALL IDENTITY()`),
    /// issue it immediately afterwards on the same connection and return
    /// the value.
    pub fn insert(&mut self, stmt: &Insert) -> DialectResult<Option<i64>> {
        let rendered = render::insert(stmt, &self.dialect)?;
        debug!(dialect = self.dialect.name, sql = %rendered.sql, "executing");
        let rows = self
            .executor
            .execute_insert(&rendered.sql, &rendered.params)
            .map_err(|e| e.with_sql(&rendered.sql))?;
        drop(rows);

        let Some(fetch_sql) = self.dialect.identity_fetch_sql else {
            return Ok(None);
        };
        debug!(dialect = self.dialect.name, sql = fetch_sql, "executing");
        let mut rows = self
            .executor
            .execute(fetch_sql, &[])
            .map_err(|e| e.with_sql(fetch_sql))?;
        match rows.next() {
            Some(Ok(row)) => match row.at(0) {
                Some(Value::Int(id)) => Ok(Some(*id)),
                _ => Ok(None),
            },
            Some(Err(e)) => Err(e.with_sql(fetch_sql)),
            None => Ok(None),
        }
    }

    /// Render and execute one alter-table operation.
    pub fn alter_table(&mut self, stmt: &AlterTable) -> DialectResult<()> {
        let sql = render::alter_table(stmt, &self.dialect)?;
        self.run_ddl(&sql)
    }

    /// Render and execute CREATE TABLE AS.
    pub fn create_table_as(&mut self, stmt: &CreateTableAs) -> DialectResult<()> {
        let rendered = render::create_table_as(stmt, &self.dialect)?;
        debug!(dialect = self.dialect.name, sql = %rendered.sql, "executing");
        self.executor
            .execute_dui(&rendered.sql, &rendered.params)
            .map(|_| ())
            .map_err(|e| e.with_sql(&rendered.sql))
    }

    /// Render and execute DROP TABLE.
    pub fn drop_table(&mut self, stmt: &DropTable) -> DialectResult<()> {
        let sql = render::drop_table(stmt, &self.dialect)?;
        self.run_ddl(&sql)
    }

    /// Introspect one table through the dialect's catalog query.
    pub fn table_schema(&mut self, table: &str) -> DialectResult<Vec<(String, ColumnInfo)>> {
        let Some(build_query) = self.dialect.schema_query_hook else {
            return Err(DialectError::unsupported(
                "schema introspection",
                self.dialect.name,
            ));
        };
        let query = build_query(table);
        let dialect = self.dialect.clone();
        let rows = self.select(&query)?;
        let mut columns = Vec::new();
        for row in rows {
            columns.push(schema::column_info_from_row(&row?, &dialect)?);
        }
        Ok(columns)
    }

    fn run_ddl(&mut self, sql: &str) -> DialectResult<()> {
        debug!(dialect = self.dialect.name, sql, "executing");
        self.executor
            .execute_dui(sql, &[])
            .map(|_| ())
            .map_err(|e| e.with_sql(sql))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    use super::*;
    use crate::ir::{AlterKind, AlterOp, Expr};

    /// Scripted executor: records every statement, replays canned rows.
    struct MockExecutor {
        executed: Vec<String>,
        rows: Vec<Vec<Row>>,
    }

    impl MockExecutor {
        fn new(rows: Vec<Vec<Row>>) -> Self {
            Self {
                executed: Vec::new(),
                rows,
            }
        }
    }

    impl Executor for MockExecutor {
        type Rows = std::vec::IntoIter<DialectResult<Row>>;

        fn execute(&mut self, sql: &str, _params: &[Value]) -> DialectResult<Self::Rows> {
            self.executed.push(sql.to_string());
            let batch = if self.rows.is_empty() {
                Vec::new()
            } else {
                self.rows.remove(0)
            };
            Ok(batch.into_iter().map(Ok).collect::<Vec<_>>().into_iter())
        }
    }

    #[test]
    fn test_insert_fetches_identity_on_hsqldb() {
        let identity_row = Row::new(vec!["id".to_string()], vec![Value::Int(42)]);
        let executor = MockExecutor::new(vec![vec![], vec![identity_row]]);
        let mut engine = Engine::new(Arc::new(Dialect::hsqldb()), executor);

        let stmt = Insert::new(
            "items",
            vec!["name".to_string()],
            vec![Expr::lit("widget")],
        );
        let id = engine.insert(&stmt).unwrap();
        assert_eq!(id, Some(42));
        assert_eq!(
            engine.executor.executed,
            vec![
                "INSERT INTO \"items\" (\"name\") VALUES ('widget')".to_string(),
                "CALL IDENTITY()".to_string(),
            ]
        );
    }

    #[test]
    fn test_insert_without_identity_fetch() {
        let executor = MockExecutor::new(vec![vec![]]);
        let mut engine = Engine::new(Arc::new(Dialect::vertica()), executor);

        let stmt = Insert::new("items", vec![], vec![Expr::lit(1i64)]);
        assert_eq!(engine.insert(&stmt).unwrap(), None);
        assert_eq!(engine.executor.executed.len(), 1);
    }

    #[test]
    fn test_capability_error_reaches_no_connection() {
        let mut no_drop = Dialect::ansi();
        no_drop.name = "columnar";
        no_drop.unsupported_alter_ops = &[AlterKind::DropColumn];
        let executor = MockExecutor::new(vec![]);
        let mut engine = Engine::new(Arc::new(no_drop), executor);

        let stmt = AlterTable::new(
            "items",
            AlterOp::DropColumn {
                name: "legacy".to_string(),
            },
        );
        let err = engine.alter_table(&stmt).unwrap_err();
        assert_eq!(err.to_string(), "DROP COLUMN is not supported on columnar");
        assert!(engine.executor.executed.is_empty());
    }

    #[test]
    fn test_table_schema_decodes_catalog_rows() {
        let rows = vec![
            Row::new(
                vec![
                    "column_name".to_string(),
                    "constraint_name".to_string(),
                    "is_nullable".to_string(),
                    "column_default".to_string(),
                    "data_type".to_string(),
                ],
                vec![
                    Value::String("value".to_string()),
                    Value::Null,
                    Value::Bool(true),
                    Value::Null,
                    Value::String("int".to_string()),
                ],
            ),
            Row::new(
                vec![
                    "column_name".to_string(),
                    "constraint_name".to_string(),
                    "is_nullable".to_string(),
                    "column_default".to_string(),
                    "data_type".to_string(),
                ],
                vec![
                    Value::String("time".to_string()),
                    Value::Null,
                    Value::Bool(true),
                    Value::Null,
                    Value::String("timestamp".to_string()),
                ],
            ),
        ];
        let executor = MockExecutor::new(vec![rows]);
        let mut engine = Engine::new(Arc::new(Dialect::vertica()), executor);

        let schema = engine.table_schema("metrics").unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema[0].0, "value");
        assert_eq!(schema[0].1.typ, crate::schema::SemanticType::Integer);
        assert!(!schema[0].1.primary_key);
        assert_eq!(schema[1].0, "time");
        assert_eq!(schema[1].1.typ, crate::schema::SemanticType::Datetime);
        assert!(!schema[1].1.primary_key);
    }

    #[test]
    fn test_schema_introspection_requires_hook() {
        let executor = MockExecutor::new(vec![]);
        let mut engine = Engine::new(Arc::new(Dialect::ansi()), executor);
        let err = engine.table_schema("metrics").unwrap_err();
        assert!(matches!(err, DialectError::Unsupported { .. }));
    }
}
