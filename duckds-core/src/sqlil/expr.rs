use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};

/// A node of the visual query builder's expression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumAsInner)]
#[serde(tag = "type")]
pub enum QueryEditorExpression {
    #[serde(rename = "property")]
    Property(QueryEditorPropertyExpression),
    #[serde(rename = "operator")]
    Operator(QueryEditorOperatorExpression),
    #[serde(rename = "and")]
    And(QueryEditorArrayExpression),
    #[serde(rename = "or")]
    Or(QueryEditorArrayExpression),
    #[serde(rename = "groupBy")]
    GroupBy(QueryEditorGroupByExpression),
    #[serde(rename = "function")]
    Function(QueryEditorFunctionExpression),
    #[serde(rename = "functionParameter")]
    FunctionParameter(QueryEditorFunctionParameterExpression),
}

/// Type of a referenced property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryEditorPropertyType {
    #[default]
    String,
}

/// A reference to a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryEditorProperty {
    #[serde(default)]
    pub r#type: QueryEditorPropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl QueryEditorProperty {
    pub fn new(name: Option<String>) -> Self {
        Self {
            r#type: QueryEditorPropertyType::String,
            name,
        }
    }

    /// The property name, when it is set to something non-empty
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Operand of a comparison operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryEditorOperatorValue {
    String(String),
    Boolean(bool),
    Number(f64),
    List(Vec<QueryEditorOperatorValue>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryEditorOperator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<QueryEditorOperatorValue>,
}

/// Comparison of a property against a value, eg `val > 5`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEditorOperatorExpression {
    pub property: QueryEditorProperty,
    pub operator: QueryEditorOperator,
}

/// Conjunction or disjunction of sub expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryEditorArrayExpression {
    #[serde(default)]
    pub expressions: Vec<QueryEditorExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryEditorPropertyExpression {
    pub property: QueryEditorProperty,
}

impl QueryEditorPropertyExpression {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            property: QueryEditorProperty::new(Some(name.into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryEditorGroupByExpression {
    pub property: QueryEditorProperty,
}

impl QueryEditorGroupByExpression {
    /// Creates a group by expression for the supplied field
    pub fn field(field: Option<String>) -> Self {
        Self {
            property: QueryEditorProperty::new(field),
        }
    }
}

/// A selected column, optionally wrapped in a (aggregate) function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryEditorFunctionExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<QueryEditorFunctionParameterExpression>>,
}

impl QueryEditorFunctionExpression {
    /// Creates a function column with no parameters
    pub fn function(name: Option<String>) -> Self {
        Self {
            name,
            parameters: Some(vec![]),
        }
    }

    /// Creates a function column over the supplied parameter names
    pub fn call(name: impl Into<String>, params: &[&str]) -> Self {
        Self {
            name: Some(name.into()),
            parameters: Some(
                params
                    .iter()
                    .map(|p| QueryEditorFunctionParameterExpression::new(*p))
                    .collect(),
            ),
        }
    }

    /// Creates a plain column selection without a function
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            name: None,
            parameters: Some(vec![QueryEditorFunctionParameterExpression::new(name)]),
        }
    }

    /// The function name, when it is set to something non-empty
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn parameters(&self) -> &[QueryEditorFunctionParameterExpression] {
        self.parameters.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryEditorFunctionParameterExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl QueryEditorFunctionParameterExpression {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}
