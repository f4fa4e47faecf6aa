use duckds_core::sqlil::{
    EditorMode, QueryEditorFunctionExpression, QueryEditorGroupByExpression, QueryFormat,
    SqlExpression, SqlQuery,
};

/// Values filled into queries which do not specify them
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDefaults {
    pub ref_id: String,
    pub dataset: String,
    /// Row limit of the initial builder query
    pub limit: i64,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            ref_id: "A".into(),
            dataset: "default".into(),
            limit: 50,
        }
    }
}

impl QueryDefaults {
    /// The initial builder query, a single empty column and group by
    pub fn default_sql(&self) -> SqlExpression {
        SqlExpression {
            columns: Some(vec![QueryEditorFunctionExpression::function(None)]),
            group_by: Some(vec![QueryEditorGroupByExpression::field(None)]),
            limit: Some(self.limit),
            ..Default::default()
        }
    }
}

/// Fills in every unset property of the query.
///
/// Queries without an editor mode which already carry raw SQL predate the
/// visual builder, so they are opened in code mode.
pub fn apply_query_defaults(query: Option<&SqlQuery>, defaults: &QueryDefaults) -> SqlQuery {
    let mut query = query.cloned().unwrap_or_default();

    if query.editor_mode.is_none() {
        query.editor_mode = Some(match query.raw_sql() {
            Some(_) => EditorMode::Code,
            None => EditorMode::Builder,
        });
    }

    if query.ref_id.is_empty() {
        query.ref_id = defaults.ref_id.clone();
    }

    query.format.get_or_insert(QueryFormat::Table);
    query.raw_sql.get_or_insert_with(String::new);
    query.dataset = Some(defaults.dataset.clone());

    if query.sql.is_none() {
        query.sql = Some(defaults.default_sql());
    }

    query
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults_for_missing_query() {
        let query = apply_query_defaults(None, &QueryDefaults::default());

        assert_eq!(
            query,
            SqlQuery {
                ref_id: "A".into(),
                format: Some(QueryFormat::Table),
                raw_sql: Some("".into()),
                dataset: Some("default".into()),
                editor_mode: Some(EditorMode::Builder),
                sql: Some(SqlExpression {
                    columns: Some(vec![QueryEditorFunctionExpression::function(None)]),
                    group_by: Some(vec![QueryEditorGroupByExpression::field(None)]),
                    limit: Some(50),
                    ..Default::default()
                }),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_defaults_for_empty_query() {
        let query = apply_query_defaults(Some(&SqlQuery::default()), &QueryDefaults::default());
        let sql = query.sql.unwrap();

        assert_eq!(query.editor_mode, Some(EditorMode::Builder));
        assert_eq!(query.format, Some(QueryFormat::Table));
        assert_eq!(sql.limit, Some(50));
        assert_eq!(sql.columns.unwrap().len(), 1);
    }

    #[test]
    fn test_legacy_raw_sql_query_uses_code_mode() {
        let query = SqlQuery {
            raw_sql: Some("select 1".into()),
            ..SqlQuery::new("B")
        };

        let query = apply_query_defaults(Some(&query), &QueryDefaults::default());

        assert_eq!(query.editor_mode, Some(EditorMode::Code));
        assert_eq!(query.ref_id, "B");
        assert_eq!(query.raw_sql, Some("select 1".into()));
    }

    #[test]
    fn test_empty_raw_sql_uses_builder_mode() {
        let query = SqlQuery {
            raw_sql: Some("".into()),
            ..SqlQuery::new("A")
        };

        let query = apply_query_defaults(Some(&query), &QueryDefaults::default());

        assert_eq!(query.editor_mode, Some(EditorMode::Builder));
    }

    #[test]
    fn test_explicit_editor_mode_is_kept() {
        let query = SqlQuery {
            raw_sql: Some("select 1".into()),
            editor_mode: Some(EditorMode::Builder),
            format: Some(QueryFormat::Timeseries),
            dataset: Some("other".into()),
            ..SqlQuery::new("C")
        };

        let query = apply_query_defaults(Some(&query), &QueryDefaults::default());

        assert_eq!(query.editor_mode, Some(EditorMode::Builder));
        assert_eq!(query.format, Some(QueryFormat::Timeseries));
        assert_eq!(query.dataset, Some("default".into()));
    }

    #[test]
    fn test_existing_sql_is_kept() {
        let sql = SqlExpression {
            columns: Some(vec![QueryEditorFunctionExpression::column("a")]),
            ..Default::default()
        };
        let query = SqlQuery {
            sql: Some(sql.clone()),
            table: Some("t".into()),
            ..SqlQuery::new("A")
        };

        let query = apply_query_defaults(Some(&query), &QueryDefaults::default());

        assert_eq!(query.sql, Some(sql));
        assert_eq!(query.table, Some("t".into()));
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = QueryDefaults {
            ref_id: "Z".into(),
            dataset: "main".into(),
            limit: 10,
        };

        let query = apply_query_defaults(None, &defaults);

        assert_eq!(query.ref_id, "Z");
        assert_eq!(query.dataset, Some("main".into()));
        assert_eq!(query.sql.unwrap().limit, Some(10));
    }

    #[test]
    fn test_defaults_are_idempotent() {
        let defaults = QueryDefaults::default();
        let queries = vec![
            None,
            Some(SqlQuery::default()),
            Some(SqlQuery {
                raw_sql: Some("select 1".into()),
                ..SqlQuery::new("B")
            }),
            Some(SqlQuery {
                editor_mode: Some(EditorMode::Code),
                format: Some(QueryFormat::Timeseries),
                ..SqlQuery::new("C")
            }),
        ];

        for query in queries {
            let once = apply_query_defaults(query.as_ref(), &defaults);
            let twice = apply_query_defaults(Some(&once), &defaults);

            assert_eq!(once, twice);
        }
    }
}
