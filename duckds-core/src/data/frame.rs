use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use super::{DataType, DataValue};

/// A column of values within a data frame
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Field {
    /// The name of the column
    pub name: String,
    /// The type of the values, nulls aside
    pub r#type: DataType,
    /// The column values, one per row
    pub values: Vec<DataValue>,
}

impl Field {
    pub fn new(name: impl Into<String>, values: Vec<DataValue>) -> Self {
        let r#type = values
            .iter()
            .fold(DataType::Null, |t, v| t.merge(&DataType::from(v)));

        Self {
            name: name.into(),
            r#type,
            values,
        }
    }

    /// Values rendered as text, used when the host flattens a column into names
    pub fn text_values(&self) -> Vec<String> {
        self.values.iter().map(|v| v.to_text()).collect()
    }
}

/// Tabular result of a query, stored column-wise
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataFrame {
    /// The ref id of the query which produced this frame
    pub ref_id: Option<String>,
    /// The fields (columns) of the frame
    pub fields: Vec<Field>,
}

impl DataFrame {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            ref_id: None,
            fields,
        }
    }

    /// Builds a frame from column names and row-oriented values
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<DataValue>>) -> Result<Self> {
        let mut cols: Vec<Vec<DataValue>> = columns.iter().map(|_| vec![]).collect();

        for row in rows.into_iter() {
            ensure!(
                row.len() == columns.len(),
                "Row width {} does not match column count {}",
                row.len(),
                columns.len()
            );

            for (idx, val) in row.into_iter().enumerate() {
                cols[idx].push(val);
            }
        }

        Ok(Self::new(
            columns
                .into_iter()
                .zip(cols.into_iter())
                .map(|(name, values)| Field::new(name, values))
                .collect(),
        ))
    }

    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    /// Gets the field with the supplied name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The number of rows in the frame
    pub fn len(&self) -> usize {
        self.fields.first().map(|f| f.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts the frame into row-oriented json objects
    pub fn to_json_rows(&self) -> Vec<serde_json::Value> {
        (0..self.len())
            .map(|i| {
                serde_json::Value::Object(
                    self.fields
                        .iter()
                        .map(|f| (f.name.clone(), f.values[i].to_json()))
                        .collect(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_frame_from_rows() {
        let frame = DataFrame::from_rows(
            vec!["column".into(), "type".into()],
            vec![
                vec!["id".into(), "integer".into()],
                vec!["name".into(), "text".into()],
            ],
        )
        .unwrap();

        assert_eq!(frame.len(), 2);
        assert_eq!(
            frame.field("column").unwrap().text_values(),
            vec!["id".to_string(), "name".to_string()]
        );
        assert_eq!(frame.field("type").unwrap().r#type, DataType::Utf8String);
        assert_eq!(frame.field("missing"), None);
    }

    #[test]
    fn test_frame_from_rows_width_mismatch() {
        let res = DataFrame::from_rows(vec!["a".into()], vec![vec![DataValue::Int32(1), DataValue::Null]]);

        assert!(res.is_err());
    }

    #[test]
    fn test_frame_empty() {
        let frame = DataFrame::default();

        assert!(frame.is_empty());
        assert_eq!(frame.to_json_rows(), Vec::<serde_json::Value>::new());
    }

    #[test]
    fn test_frame_to_json_rows() {
        let frame = DataFrame::new(vec![
            Field::new("a", vec![DataValue::Int64(1), DataValue::Null]),
            Field::new("b", vec!["x".into(), "y".into()]),
        ]);

        assert_eq!(
            frame.to_json_rows(),
            vec![
                serde_json::json!({"a": 1, "b": "x"}),
                serde_json::json!({"a": null, "b": "y"}),
            ]
        );
        assert_eq!(frame.field("a").unwrap().r#type, DataType::Int64);
    }
}
