use duckds_connectors_base::interface::{HealthChecker, QueryRunner};
use duckds_core::sqlil::SqlQuery;
use duckds_logging::warn;
use serde::{Deserialize, Serialize};

use crate::DuckDbDataSource;

/// A table offered by the code editor's autocompletion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
}

/// The table the cursor is positioned in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// A column offered by the code editor's autocompletion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Resolves tables and columns for the host's SQL language completion.
/// Lookup failures resolve to no suggestions.
pub struct SqlCompletionProvider<'a, H> {
    ds: &'a DuckDbDataSource<H>,
}

impl<'a, H: QueryRunner + HealthChecker> SqlCompletionProvider<'a, H> {
    pub fn new(ds: &'a DuckDbDataSource<H>) -> Self {
        Self { ds }
    }

    pub fn tables(&self) -> Vec<TableDefinition> {
        match self.ds.lookup() {
            Ok(tables) => tables
                .into_iter()
                .map(|t| TableDefinition {
                    name: t.name,
                    completion: Some(t.completion),
                })
                .collect(),
            Err(err) => {
                warn!("Failed to resolve tables for completion: {:?}", err);
                vec![]
            }
        }
    }

    pub fn columns(&self, table: Option<&TableIdentifier>) -> Vec<ColumnDefinition> {
        let query = SqlQuery {
            table: table.and_then(|t| t.table.clone()),
            ..SqlQuery::new("A")
        };

        match self.ds.fields(&query) {
            Ok(fields) => fields
                .into_iter()
                .map(|f| ColumnDefinition {
                    description: Some(f.value.clone()),
                    r#type: Some(f.r#type),
                    name: f.value,
                })
                .collect(),
            Err(err) => {
                warn!(
                    "Failed to resolve columns of table {:?} for completion: {:?}",
                    query.table, err
                );
                vec![]
            }
        }
    }
}
