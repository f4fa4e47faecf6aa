use duckds_connectors_base::interface::{ScopedVars, TemplateSrv, VariableFormat};
use duckds_core::sqlil::SqlQuery;

use crate::{apply_query_defaults, entity_searcher, QueryDefaults};

/// A query bound to the template variables it is interpolated with
pub struct DuckDbQueryModel<'a> {
    pub target: SqlQuery,
    template_srv: Option<&'a dyn TemplateSrv>,
    scoped_vars: Option<&'a ScopedVars>,
}

impl<'a> DuckDbQueryModel<'a> {
    pub fn new(
        target: Option<&SqlQuery>,
        template_srv: Option<&'a dyn TemplateSrv>,
        scoped_vars: Option<&'a ScopedVars>,
    ) -> Self {
        Self {
            target: apply_query_defaults(target, &QueryDefaults::default()),
            template_srv,
            scoped_vars,
        }
    }

    /// Replaces the variables in the raw sql, quoting their values as sql strings.
    /// Without a template service there is nothing to interpolate with.
    pub fn interpolate(&self) -> String {
        let srv = match self.template_srv {
            Some(srv) => srv,
            None => return String::new(),
        };

        let empty = ScopedVars::new();

        srv.replace(
            self.target.raw_sql.as_deref().unwrap_or(""),
            self.scoped_vars.unwrap_or(&empty),
            VariableFormat::SqlString,
        )
    }

    pub fn quote_literal(&self, value: &str) -> String {
        entity_searcher::quote_literal(value)
    }
}

#[cfg(test)]
mod tests {
    use duckds_connectors_base::{common::template::ScopedVarsTemplateSrv, interface::ScopedVar};
    use duckds_core::sqlil::EditorMode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn raw_query(sql: &str) -> SqlQuery {
        SqlQuery {
            raw_sql: Some(sql.into()),
            ..SqlQuery::new("A")
        }
    }

    #[test]
    fn test_query_model_defaults_target() {
        let model = DuckDbQueryModel::new(None, None, None);

        assert_eq!(model.target.ref_id, "A");
        assert_eq!(model.target.editor_mode, Some(EditorMode::Builder));
    }

    #[test]
    fn test_interpolate_without_template_srv() {
        let query = raw_query("select 1");
        let model = DuckDbQueryModel::new(Some(&query), None, None);

        assert_eq!(model.interpolate(), "");
    }

    #[test]
    fn test_interpolate_scoped_vars() {
        let srv = ScopedVarsTemplateSrv::default();
        let vars = ScopedVars::from([
            ("species".to_string(), ScopedVar::new("o'neil")),
            ("ids".to_string(), ScopedVar::new(json!(["1", "2"]))),
        ]);
        let query = raw_query("select * from ducks where species = $species and id in (${ids})");
        let model = DuckDbQueryModel::new(Some(&query), Some(&srv), Some(&vars));

        assert_eq!(
            model.interpolate(),
            "select * from ducks where species = 'o''neil' and id in ('1','2')"
        );
    }

    #[test]
    fn test_interpolate_dashboard_vars() {
        let srv = ScopedVarsTemplateSrv::default().with_variable("t", ScopedVar::new("ducks"));
        let query = raw_query("select '$t'");
        let model = DuckDbQueryModel::new(Some(&query), Some(&srv), None);

        assert_eq!(model.interpolate(), "select ''ducks''");
    }

    #[test]
    fn test_quote_literal() {
        let model = DuckDbQueryModel::new(None, None, None);

        assert_eq!(model.quote_literal("abc"), "'abc'");
        assert_eq!(model.quote_literal("it's"), "'it''s'");
        assert_eq!(model.quote_literal(""), "''");
    }
}
