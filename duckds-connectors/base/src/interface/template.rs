use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The value of a dashboard variable in scope of a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedVar {
    #[serde(default)]
    pub text: String,
    /// A single value or a list of values for multi-value variables
    pub value: serde_json::Value,
}

impl ScopedVar {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        let value = value.into();

        Self {
            text: match &value {
                serde_json::Value::String(s) => s.clone(),
                v => v.to_string(),
            },
            value,
        }
    }
}

pub type ScopedVars = HashMap<String, ScopedVar>;

/// Formats applied to variable values when interpolating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableFormat {
    /// Values are substituted as-is, multi values joined with ','
    Raw,
    /// Each value is single-quoted with embedded quotes doubled, joined with ','
    SqlString,
    /// Multi values rendered as `{a,b}`
    Glob,
}

/// Replaces dashboard variable references in query text
pub trait TemplateSrv {
    fn replace(&self, target: &str, scoped_vars: &ScopedVars, format: VariableFormat) -> String;
}
