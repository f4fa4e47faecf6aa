use duckds_connectors_base::interface::QueryRunner;
use duckds_core::{
    data::DataFrame,
    err::{Context, Result},
};
use duckds_logging::warn;
use itertools::Itertools;
use serde::Serialize;

use crate::{get_field_config, RaqbFieldType};

/// Schemas which are never listed by the table lookup
pub const DEFAULT_EXCLUDED_SCHEMAS: [&str; 8] = [
    "information_schema",
    "pg_catalog",
    "_timescaledb_cache",
    "_timescaledb_catalog",
    "_timescaledb_internal",
    "_timescaledb_config",
    "timescaledb_information",
    "timescaledb_experimental",
];

/// Controls which schemas are searched for tables
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFilter {
    pub excluded_schemas: Vec<String>,
}

impl Default for SchemaFilter {
    fn default() -> Self {
        Self {
            excluded_schemas: DEFAULT_EXCLUDED_SCHEMAS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A column offered by the query builder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlSelectableValue {
    pub label: String,
    pub value: String,
    pub r#type: String,
    pub raqb_field_type: RaqbFieldType,
    pub icon: &'static str,
}

/// Wraps a value in single quotes, doubling any embedded quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Restricts `table_schema` to the schemas on the active search path.
/// quote_ident keeps hyphenated schema names comparable.
pub fn build_schema_constraint() -> String {
    r#"
          quote_ident(table_schema) IN (
          SELECT
            CASE WHEN trim(s[i]) = '"$user"' THEN user ELSE trim(s[i]) END
          FROM
            generate_series(
              array_lower(string_to_array(current_setting('search_path'),','),1),
              array_upper(string_to_array(current_setting('search_path'),','),1)
            ) as i,
            string_to_array(current_setting('search_path'),',') s
          )"#
    .to_string()
}

/// Lists the tables visible on the search path
pub fn show_tables(filter: &SchemaFilter) -> String {
    let mut sql = r#"select distinct quote_ident(table_name) as "table" from information_schema.tables
    where "#
        .to_string();

    if !filter.excluded_schemas.is_empty() {
        sql += &format!(
            "quote_ident(table_schema) not in ({})\n      and ",
            filter
                .excluded_schemas
                .iter()
                .map(|s| quote_literal(s))
                .join(",\n                             ")
        );
    }

    sql + &build_schema_constraint()
}

/// Lists the columns and their declared types of a single table
pub fn get_schema(table: &str) -> String {
    format!(
        r#"select quote_ident(column_name) as "column", data_type as "type"
    from information_schema.columns
    where quote_ident(table_name) = {};
    "#,
        quote_literal(table)
    )
}

/// Maps a type name as reported by duckdb (`DOUBLE`, `DECIMAL(18,3)`, ...)
/// onto the lower-case information-schema name the field mapper expects
pub fn information_schema_type(r#type: &str) -> String {
    let lower = r#type.trim().to_lowercase();

    // lists, structs and maps stay as they are and fall back to text
    if lower.ends_with(']') || (lower.ends_with(')') && !lower.starts_with("decimal")) {
        return lower;
    }

    match lower.split('(').next().unwrap_or_default().trim() {
        "tinyint" | "utinyint" | "usmallint" | "int2" | "short" => "smallint".into(),
        "uinteger" | "int4" | "int" | "signed" => "integer".into(),
        "ubigint" | "hugeint" | "uhugeint" | "int8" | "long" => "bigint".into(),
        "float" | "float4" => "real".into(),
        "double" | "float8" => "double precision".into(),
        "decimal" => "decimal".into(),
        "varchar" | "string" => "character varying".into(),
        "bool" | "logical" => "boolean".into(),
        "timetz" => "time with time zone".into(),
        _ => lower,
    }
}

/// Discovers tables and columns through the host's query channel
pub struct DuckDbEntitySearcher {}

impl DuckDbEntitySearcher {
    pub fn discover_tables(runner: impl QueryRunner, filter: &SchemaFilter) -> Result<Vec<String>> {
        let frame = runner
            .run_sql(&show_tables(filter), "tables")
            .context("Failed to list tables")?;

        Ok(frame
            .field("table")
            .map(|f| f.text_values())
            .unwrap_or_default())
    }

    pub fn discover_fields(runner: impl QueryRunner, table: &str) -> Result<Vec<SqlSelectableValue>> {
        let frame = runner
            .run_sql(&get_schema(table), "columns")
            .with_context(|| format!("Failed to retrieve columns of table \"{}\"", table))?;

        Ok(Self::parse_fields(table, &frame))
    }

    fn parse_fields(table: &str, frame: &DataFrame) -> Vec<SqlSelectableValue> {
        let (columns, types) = match (frame.field("column"), frame.field("type")) {
            (Some(c), Some(t)) => (c.text_values(), t.text_values()),
            _ => {
                if !frame.is_empty() {
                    warn!(
                        "Schema of table \"{}\" is missing the column or type field, ignoring",
                        table
                    );
                }
                return vec![];
            }
        };

        columns
            .into_iter()
            .zip(types)
            .map(|(column, r#type)| {
                let conf = get_field_config(&information_schema_type(&r#type));

                SqlSelectableValue {
                    label: column.clone(),
                    value: column,
                    r#type,
                    raqb_field_type: conf.raqb_field_type,
                    icon: conf.icon,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use duckds_core::data::{DataValue, Field};
    use pretty_assertions::assert_eq;

    use super::*;

    struct MockRunner {
        frame: DataFrame,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockRunner {
        fn new(frame: DataFrame) -> Self {
            Self {
                frame,
                calls: Mutex::new(vec![]),
            }
        }
    }

    impl QueryRunner for MockRunner {
        fn run_sql(&self, sql: &str, ref_id: &str) -> Result<DataFrame> {
            self.calls
                .lock()
                .unwrap()
                .push((sql.to_string(), ref_id.to_string()));
            Ok(self.frame.clone())
        }
    }

    fn text_field(name: &str, values: &[&str]) -> Field {
        Field::new(name, values.iter().map(|v| DataValue::from(*v)).collect())
    }

    #[test]
    fn test_get_schema_escapes_quotes() {
        let sql = get_schema("o'brien");

        assert!(sql.contains("where quote_ident(table_name) = 'o''brien';"));
        assert!(sql.starts_with(
            r#"select quote_ident(column_name) as "column", data_type as "type""#
        ));
        assert!(sql.contains("from information_schema.columns"));
    }

    #[test]
    fn test_get_schema_plain_table() {
        assert_eq!(
            get_schema("ducks"),
            "select quote_ident(column_name) as \"column\", data_type as \"type\"\n    from information_schema.columns\n    where quote_ident(table_name) = 'ducks';\n    "
        );
    }

    #[test]
    fn test_show_tables_default_filter() {
        let sql = show_tables(&SchemaFilter::default());

        assert!(sql.starts_with(
            r#"select distinct quote_ident(table_name) as "table" from information_schema.tables"#
        ));
        for schema in DEFAULT_EXCLUDED_SCHEMAS {
            assert!(sql.contains(&format!("'{}'", schema)), "missing {schema}");
        }
        assert!(sql.contains("quote_ident(table_schema) not in ('information_schema',"));
        assert!(sql.ends_with(&build_schema_constraint()));
    }

    #[test]
    fn test_show_tables_custom_filter() {
        let sql = show_tables(&SchemaFilter {
            excluded_schemas: vec!["secret".into()],
        });

        assert!(sql.contains("not in ('secret')"));
        assert!(!sql.contains("pg_catalog"));
    }

    #[test]
    fn test_show_tables_empty_filter() {
        let sql = show_tables(&SchemaFilter {
            excluded_schemas: vec![],
        });

        assert!(!sql.contains("not in"));
        assert!(sql.contains("quote_ident(table_schema) IN ("));
    }

    #[test]
    fn test_build_schema_constraint() {
        let sql = build_schema_constraint();

        assert!(sql.contains(r#"CASE WHEN trim(s[i]) = '"$user"' THEN user ELSE trim(s[i]) END"#));
        assert!(sql.contains("string_to_array(current_setting('search_path'),',') s"));
    }

    #[test]
    fn test_discover_tables() {
        let runner = MockRunner::new(DataFrame::new(vec![text_field("table", &["a", "b"])]));

        let tables = DuckDbEntitySearcher::discover_tables(&runner, &SchemaFilter::default()).unwrap();

        assert_eq!(tables, vec!["a".to_string(), "b".to_string()]);
        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].1, "tables");
        assert_eq!(calls[0].0, show_tables(&SchemaFilter::default()));
    }

    #[test]
    fn test_discover_tables_missing_field() {
        let runner = MockRunner::new(DataFrame::default());

        let tables = DuckDbEntitySearcher::discover_tables(&runner, &SchemaFilter::default()).unwrap();

        assert_eq!(tables, Vec::<String>::new());
    }

    #[test]
    fn test_discover_fields() {
        let runner = MockRunner::new(DataFrame::new(vec![
            text_field("column", &["id", "name", "created"]),
            text_field("type", &["integer", "character varying", "timestamp"]),
        ]));

        let fields = DuckDbEntitySearcher::discover_fields(&runner, "ducks").unwrap();

        assert_eq!(
            fields,
            vec![
                SqlSelectableValue {
                    label: "id".into(),
                    value: "id".into(),
                    r#type: "integer".into(),
                    raqb_field_type: RaqbFieldType::Number,
                    icon: "calculator-alt",
                },
                SqlSelectableValue {
                    label: "name".into(),
                    value: "name".into(),
                    r#type: "character varying".into(),
                    raqb_field_type: RaqbFieldType::Text,
                    icon: "text",
                },
                SqlSelectableValue {
                    label: "created".into(),
                    value: "created".into(),
                    r#type: "timestamp".into(),
                    raqb_field_type: RaqbFieldType::Text,
                    icon: "text",
                },
            ]
        );
        assert_eq!(runner.calls.lock().unwrap()[0].1, "columns");
    }

    #[test]
    fn test_discover_fields_duckdb_type_names() {
        let runner = MockRunner::new(DataFrame::new(vec![
            text_field("column", &["name", "weight", "ringed", "hatched"]),
            text_field("type", &["VARCHAR", "DOUBLE", "BOOLEAN", "DATE"]),
        ]));

        let fields = DuckDbEntitySearcher::discover_fields(&runner, "ducks").unwrap();

        assert_eq!(
            fields
                .iter()
                .map(|f| (f.r#type.as_str(), f.raqb_field_type, f.icon))
                .collect::<Vec<_>>(),
            vec![
                ("VARCHAR", RaqbFieldType::Text, "text"),
                ("DOUBLE", RaqbFieldType::Number, "calculator-alt"),
                ("BOOLEAN", RaqbFieldType::Boolean, "toggle-off"),
                ("DATE", RaqbFieldType::Date, "clock-nine"),
            ]
        );
    }

    #[test]
    fn test_information_schema_type() {
        assert_eq!(information_schema_type("DOUBLE"), "double precision");
        assert_eq!(information_schema_type("DECIMAL(18,3)"), "decimal");
        assert_eq!(information_schema_type("HUGEINT"), "bigint");
        assert_eq!(information_schema_type("VARCHAR"), "character varying");
        assert_eq!(information_schema_type("TIME WITH TIME ZONE"), "time with time zone");
        assert_eq!(
            information_schema_type("TIMESTAMP WITH TIME ZONE"),
            "timestamp with time zone"
        );
        assert_eq!(information_schema_type("INTEGER[]"), "integer[]");
        assert_eq!(
            information_schema_type("STRUCT(a INTEGER)"),
            "struct(a integer)"
        );
    }
}
