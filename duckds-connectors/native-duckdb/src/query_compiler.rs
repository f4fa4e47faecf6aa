use duckds_core::sqlil::{
    OrderByDirection, QueryEditorFunctionExpression, QueryEditorGroupByExpression,
    QueryEditorPropertyExpression, SqlExpression, SqlQuery,
};
use itertools::Itertools;

/// Compiles queries edited in the visual builder into DuckDB SQL
pub struct DuckDbQueryCompiler {}

impl DuckDbQueryCompiler {
    /// Renders the structured query as SQL text.
    ///
    /// Every clause carries a trailing space. An empty string is returned
    /// while there is not yet enough information to select anything.
    pub fn compile(query: &SqlQuery) -> String {
        let sql = match &query.sql {
            Some(sql) => sql,
            None => return String::new(),
        };

        let columns = match &sql.columns {
            Some(columns) if Self::have_columns(columns) => columns,
            _ => return String::new(),
        };

        [
            Self::create_select_clause(columns),
            Self::compile_from(query.table()),
            Self::compile_where(sql),
            Self::compile_group_by(sql.group_by.as_deref()),
            Self::compile_order_by(sql.order_by.as_ref(), sql.order_by_direction),
            Self::compile_limit(sql.limit),
        ]
        .concat()
    }

    /// Whether any column selects something, either a function or a parameter
    pub fn have_columns(columns: &[QueryEditorFunctionExpression]) -> bool {
        columns
            .iter()
            .any(|c| c.name().is_some() || c.parameters().iter().any(|p| p.name().is_some()))
    }

    pub fn create_select_clause(columns: &[QueryEditorFunctionExpression]) -> String {
        let columns = columns
            .iter()
            .map(|c| {
                let params = c
                    .parameters()
                    .iter()
                    .map(|p| p.name.as_deref().unwrap_or(""))
                    .join(", ");

                match c.name() {
                    Some(name) => format!("{}({})", name, params),
                    None => params,
                }
            })
            .join(", ");

        format!("SELECT {} ", columns)
    }

    fn compile_from(table: Option<&str>) -> String {
        match table {
            Some(table) => format!("FROM {} ", table),
            None => String::new(),
        }
    }

    fn compile_where(sql: &SqlExpression) -> String {
        match sql.where_string.as_deref().filter(|w| !w.is_empty()) {
            Some(cond) => format!("WHERE {} ", cond),
            None => String::new(),
        }
    }

    fn compile_group_by(group_by: Option<&[QueryEditorGroupByExpression]>) -> String {
        let group_by = match group_by {
            Some(g) if g.first().and_then(|g| g.property.name()).is_some() => g,
            _ => return String::new(),
        };

        format!(
            "GROUP BY {} ",
            group_by.iter().filter_map(|g| g.property.name()).join(", ")
        )
    }

    fn compile_order_by(
        order_by: Option<&QueryEditorPropertyExpression>,
        direction: Option<OrderByDirection>,
    ) -> String {
        // a direction without a property has nothing to apply to
        let prop = match order_by.and_then(|o| o.property.name()) {
            Some(prop) => prop,
            None => return String::new(),
        };

        match direction {
            Some(dir) => format!("ORDER BY {} {} ", prop, dir.as_str()),
            None => format!("ORDER BY {} ", prop),
        }
    }

    fn compile_limit(limit: Option<i64>) -> String {
        match limit {
            Some(limit) if limit >= 0 => format!("LIMIT {} ", limit),
            _ => String::new(),
        }
    }
}

/// Renders the query built in the visual editor as SQL text
pub fn to_raw_sql(query: &SqlQuery) -> String {
    DuckDbQueryCompiler::compile(query)
}
