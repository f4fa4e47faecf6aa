use serde::{Deserialize, Serialize};

use super::{
    QueryEditorArrayExpression, QueryEditorFunctionExpression, QueryEditorGroupByExpression,
    QueryEditorPropertyExpression,
};

/// How the query is edited in the host's query editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    Builder,
    Code,
}

/// The shape the host renders the query results into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryFormat {
    #[serde(rename = "time_series")]
    Timeseries,
    #[serde(rename = "table")]
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderByDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl OrderByDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderByDirection::Asc => "ASC",
            OrderByDirection::Desc => "DESC",
        }
    }
}

/// The structured (visual builder) representation of a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SqlExpression {
    /// The selected columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<QueryEditorFunctionExpression>>,
    /// The source table chosen in the builder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// The where condition tree as edited by the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_json_tree: Option<serde_json::Value>,
    /// The where condition, pre-rendered by the host's condition builder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<QueryEditorArrayExpression>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<Vec<QueryEditorGroupByExpression>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<QueryEditorPropertyExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by_direction: Option<OrderByDirection>,
    /// Row limit, negative values are ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// A query as stored on a dashboard panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SqlQuery {
    /// Identifies the query within its panel
    #[serde(default)]
    pub ref_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<QueryFormat>,
    /// The literal SQL, either typed in code mode or generated by the builder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<SqlExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_mode: Option<EditorMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_query: Option<bool>,
}

impl SqlQuery {
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            ..Default::default()
        }
    }

    /// Parses a query from the host's json representation
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        serde_json::from_str(json).context("Failed to parse query json")
    }

    /// The raw SQL, when it is set to something non-empty
    pub fn raw_sql(&self) -> Option<&str> {
        self.raw_sql.as_deref().filter(|s| !s.is_empty())
    }

    /// The selected table, when it is set to something non-empty
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref().filter(|s| !s.is_empty())
    }
}
