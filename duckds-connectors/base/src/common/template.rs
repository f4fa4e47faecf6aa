use std::mem;

use itertools::Itertools;

use crate::interface::{ScopedVar, ScopedVars, TemplateSrv, VariableFormat};

/// Template service which interpolates `$var`, `${var}`, `${var:format}`,
/// `[[var]]` and `[[var:format]]` references from scoped and dashboard-wide
/// variables. Unknown variables are left in place.
#[derive(Debug, Clone, Default)]
pub struct ScopedVarsTemplateSrv {
    /// Dashboard-wide variables, overridden by scoped variables
    variables: ScopedVars,
}

/// A parsed piece of template text
#[derive(Debug, PartialEq, Clone)]
enum Segment {
    Text(String),
    Variable {
        raw: String,
        name: String,
        format: Option<String>,
    },
}

impl ScopedVarsTemplateSrv {
    pub fn new(variables: ScopedVars) -> Self {
        Self { variables }
    }

    pub fn with_variable(mut self, name: impl Into<String>, var: ScopedVar) -> Self {
        self.variables.insert(name.into(), var);
        self
    }

    fn lookup<'a>(&'a self, scoped_vars: &'a ScopedVars, name: &str) -> Option<&'a ScopedVar> {
        scoped_vars.get(name).or_else(|| self.variables.get(name))
    }
}

impl TemplateSrv for ScopedVarsTemplateSrv {
    fn replace(&self, target: &str, scoped_vars: &ScopedVars, format: VariableFormat) -> String {
        parse(target)
            .into_iter()
            .map(|seg| match seg {
                Segment::Text(text) => text,
                Segment::Variable { raw, name, format: fmt } => {
                    match self.lookup(scoped_vars, &name) {
                        Some(var) => {
                            let fmt = fmt.as_deref().and_then(parse_format).unwrap_or(format);
                            format_value(&var.value, fmt)
                        }
                        None => raw,
                    }
                }
            })
            .collect()
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits template text into literal text and variable references
fn parse(target: &str) -> Vec<Segment> {
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum State {
        Text,
        // after "$"
        Simple,
        // within "${...}"
        Braced,
        // within "[[...]]"
        Bracketed,
    }

    let chars = target.chars().collect::<Vec<char>>();
    let mut segments = vec![];
    let mut text = String::new();
    let mut name = String::new();
    let mut state = State::Text;
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match (state, c, next) {
            (State::Text, '$', Some('{')) => {
                state = State::Braced;
                start = i;
                i += 1;
            }
            (State::Text, '$', Some(n)) if is_name_char(n) => {
                state = State::Simple;
                start = i;
            }
            (State::Text, '[', Some('[')) => {
                state = State::Bracketed;
                start = i;
                i += 1;
            }
            (State::Text, c, _) => text.push(c),
            (State::Simple, c, _) if is_name_char(c) => name.push(c),
            (State::Simple, _, _) => {
                segments.push(Segment::Text(mem::take(&mut text)));
                segments.push(variable(&chars[start..i], mem::take(&mut name)));
                state = State::Text;
                // reprocess the terminating character as text
                continue;
            }
            (State::Braced, '}', _) => {
                segments.push(Segment::Text(mem::take(&mut text)));
                segments.push(variable(&chars[start..=i], mem::take(&mut name)));
                state = State::Text;
            }
            (State::Bracketed, ']', Some(']')) => {
                segments.push(Segment::Text(mem::take(&mut text)));
                segments.push(variable(&chars[start..=i + 1], mem::take(&mut name)));
                state = State::Text;
                i += 1;
            }
            (State::Braced | State::Bracketed, c, _) => name.push(c),
        }

        i += 1;
    }

    match state {
        State::Text => {}
        State::Simple => {
            segments.push(Segment::Text(mem::take(&mut text)));
            segments.push(variable(&chars[start..], name));
        }
        // unterminated reference, keep verbatim
        State::Braced | State::Bracketed => {
            text.extend(chars[start..].iter());
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }

    segments
        .into_iter()
        .filter(|s| !matches!(s, Segment::Text(t) if t.is_empty()))
        .collect()
}

fn variable(raw: &[char], inner: String) -> Segment {
    let (name, format) = match inner.split_once(':') {
        Some((name, format)) => (name.to_string(), Some(format.to_string())),
        None => (inner, None),
    };

    Segment::Variable {
        raw: raw.iter().collect(),
        name,
        format,
    }
}

fn parse_format(format: &str) -> Option<VariableFormat> {
    match format {
        "raw" => Some(VariableFormat::Raw),
        "sqlstring" => Some(VariableFormat::SqlString),
        "glob" => Some(VariableFormat::Glob),
        _ => None,
    }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        v => v.to_string(),
    }
}

fn format_value(value: &serde_json::Value, format: VariableFormat) -> String {
    let (values, multi) = match value {
        serde_json::Value::Array(vals) => (vals.iter().map(value_text).collect_vec(), true),
        v => (vec![value_text(v)], false),
    };

    match format {
        VariableFormat::Raw => values.join(","),
        VariableFormat::SqlString => values
            .iter()
            .map(|v| format!("'{}'", v.replace('\'', "''")))
            .join(","),
        VariableFormat::Glob if multi && values.len() > 1 => format!("{{{}}}", values.join(",")),
        VariableFormat::Glob => values.join(","),
    }
}
