//! Schema introspection results.
//!
//! Backends report raw catalog rows; this module normalizes them into
//! [`ColumnInfo`] records with a semantic type tag derived from the raw
//! engine type name. Output is deterministic for identical inputs, so
//! callers may memoize it freely.

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::engine::Row;
use crate::error::{DialectError, DialectResult};
use crate::ir::Value;

/// Normalized semantic type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    String,
    Integer,
    Float,
    Decimal,
    Boolean,
    Datetime,
    Date,
    Time,
    Blob,
    Uuid,
    Json,
}

/// One introspected column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Normalized semantic type.
    #[serde(rename = "type")]
    pub typ: SemanticType,
    pub allow_null: bool,
    /// Raw default expression text; blank catalog defaults normalize to
    /// `None`.
    pub default: Option<String>,
    /// Raw engine type name, e.g. `varchar(20)`.
    pub db_type: String,
    pub primary_key: bool,
}

/// Classify a raw engine type name into a semantic tag.
///
/// Parenthesized arguments and case are ignored: `varchar(20)` and
/// `VARCHAR(20)` both classify as strings. Names outside the known set
/// fall back to [`SemanticType::String`].
pub fn classify_db_type(db_type: &str) -> SemanticType {
    let base = db_type
        .split('(')
        .next()
        .unwrap_or(db_type)
        .trim()
        .to_ascii_lowercase();
    match base.as_str() {
        "int" | "integer" | "smallint" | "bigint" | "tinyint" | "serial" | "bigserial" => {
            SemanticType::Integer
        }
        "float" | "real" | "double" | "double precision" => SemanticType::Float,
        "decimal" | "numeric" | "money" => SemanticType::Decimal,
        "boolean" | "bool" | "bit" => SemanticType::Boolean,
        "timestamp" | "timestamptz" | "datetime" => SemanticType::Datetime,
        "date" => SemanticType::Date,
        "time" | "timetz" => SemanticType::Time,
        "bytea" | "blob" | "binary" | "varbinary" => SemanticType::Blob,
        "uuid" => SemanticType::Uuid,
        "json" | "jsonb" => SemanticType::Json,
        _ => SemanticType::String,
    }
}

/// Decode one catalog row into a named [`ColumnInfo`].
///
/// Expects the column layout produced by the dialect's schema query:
/// `column_name`, `constraint_name`, `is_nullable`, `column_default`,
/// `data_type`. Primary-key membership is detected by matching the
/// dialect's well-known constraint name; when nothing matches the
/// column reports `primary_key: false`, not unknown.
pub fn column_info_from_row(row: &Row, dialect: &Dialect) -> DialectResult<(String, ColumnInfo)> {
    let name = match row.get("column_name") {
        Some(Value::String(s)) => s.clone(),
        other => {
            return Err(DialectError::Config(format!(
                "catalog row missing column_name (got {:?})",
                other
            )));
        }
    };
    let db_type = match row.get("data_type") {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    let allow_null = is_truthy(row.get("is_nullable"));
    let default = match row.get("column_default") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    };
    let primary_key = match (dialect.primary_key_constraint, row.get("constraint_name")) {
        (Some(expected), Some(Value::String(actual))) => actual == expected,
        _ => false,
    };

    Ok((
        name,
        ColumnInfo {
            typ: classify_db_type(&db_type),
            allow_null,
            default,
            db_type,
            primary_key,
        },
    ))
}

/// Catalogs report nullability as booleans or as t/f, YES/NO strings
/// depending on the engine.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            matches!(s.to_ascii_lowercase().as_str(), "t" | "true" | "yes" | "y" | "1")
        }
        Some(Value::Int(n)) => *n != 0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dialect::Dialect;
    use crate::engine::Row;
    use crate::ir::Value;

    fn catalog_row(name: &str, db_type: &str, constraint: Option<&str>) -> Row {
        Row::new(
            vec![
                "column_name".to_string(),
                "constraint_name".to_string(),
                "is_nullable".to_string(),
                "column_default".to_string(),
                "data_type".to_string(),
            ],
            vec![
                Value::String(name.to_string()),
                constraint
                    .map(|c| Value::String(c.to_string()))
                    .unwrap_or(Value::Null),
                Value::String("true".to_string()),
                Value::Null,
                Value::String(db_type.to_string()),
            ],
        )
    }

    #[test]
    fn test_classify_db_type() {
        assert_eq!(classify_db_type("int"), SemanticType::Integer);
        assert_eq!(classify_db_type("varchar(20)"), SemanticType::String);
        assert_eq!(classify_db_type("TIMESTAMP"), SemanticType::Datetime);
        assert_eq!(classify_db_type("numeric(10,2)"), SemanticType::Decimal);
        assert_eq!(classify_db_type("bytea"), SemanticType::Blob);
    }

    #[test]
    fn test_column_info_from_rows() {
        let dialect = Dialect::vertica();
        let rows = vec![
            catalog_row("value", "int", None),
            catalog_row("time", "timestamp", None),
        ];
        let decoded: Vec<(String, ColumnInfo)> = rows
            .iter()
            .map(|r| column_info_from_row(r, &dialect).unwrap())
            .collect();

        assert_eq!(decoded[0].0, "value");
        assert_eq!(decoded[0].1.typ, SemanticType::Integer);
        assert!(!decoded[0].1.primary_key);
        assert_eq!(decoded[1].0, "time");
        assert_eq!(decoded[1].1.typ, SemanticType::Datetime);
        assert!(!decoded[1].1.primary_key);
    }

    #[test]
    fn test_primary_key_constraint_match() {
        let dialect = Dialect::vertica();
        let row = catalog_row("id", "int", Some("C_PRIMARY"));
        let (_, info) = column_info_from_row(&row, &dialect).unwrap();
        assert!(info.primary_key);

        // Any other constraint name does not mark a primary key.
        let row = catalog_row("id", "int", Some("C_UNIQUE"));
        let (_, info) = column_info_from_row(&row, &dialect).unwrap();
        assert!(!info.primary_key);
    }

    #[test]
    fn test_blank_default_normalizes_to_none() {
        let dialect = Dialect::vertica();
        let mut row = catalog_row("name", "varchar(80)", None);
        row.set("column_default", Value::String("  ".to_string()));
        let (_, info) = column_info_from_row(&row, &dialect).unwrap();
        assert_eq!(info.default, None);
    }

    #[test]
    fn test_serde_round_trip_uses_type_key() {
        let info = ColumnInfo {
            typ: SemanticType::Integer,
            allow_null: true,
            default: None,
            db_type: "int".to_string(),
            primary_key: false,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"type\":\"integer\""));
        let back: ColumnInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
