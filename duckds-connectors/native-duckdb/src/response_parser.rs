use duckds_core::data::DataFrame;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An option of a query variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricFindValue {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Converts query results into the shapes the host's variable editor expects
#[derive(Debug, Clone, Default)]
pub struct DuckDbResponseParser {}

impl DuckDbResponseParser {
    /// Reads variable options from a frame.
    ///
    /// Frames with `__text` and `__value` fields are paired up row by row,
    /// otherwise every value of every field becomes an option.
    /// Options are de-duplicated on their text.
    pub fn transform_metric_find_response(&self, frame: &DataFrame) -> Vec<MetricFindValue> {
        let values = match (frame.field("__text"), frame.field("__value")) {
            (Some(text), Some(value)) => text
                .text_values()
                .into_iter()
                .zip(value.text_values())
                .map(|(text, value)| MetricFindValue {
                    text,
                    value: Some(value),
                })
                .collect_vec(),
            _ => frame
                .fields
                .iter()
                .flat_map(|f| f.text_values())
                .map(|text| MetricFindValue { text, value: None })
                .collect_vec(),
        };

        values.into_iter().unique_by(|v| v.text.clone()).collect()
    }
}
