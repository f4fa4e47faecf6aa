use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Data container for respective types
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum DataValue {
    Null,
    Utf8String(String),
    Binary(Vec<u8>),
    Boolean(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(rust_decimal::Decimal),
    JSON(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateTimeWithTZ(DateTime<Utc>),
}

impl DataValue {
    pub fn is_null(&self) -> bool {
        *self == DataValue::Null
    }

    /// Renders the value as display text, nulls render as "null"
    pub fn to_text(&self) -> String {
        match self {
            DataValue::Null => "null".into(),
            DataValue::Utf8String(s) => s.clone(),
            DataValue::Binary(b) => String::from_utf8_lossy(b).into_owned(),
            DataValue::Boolean(v) => v.to_string(),
            DataValue::Int8(v) => v.to_string(),
            DataValue::UInt8(v) => v.to_string(),
            DataValue::Int16(v) => v.to_string(),
            DataValue::UInt16(v) => v.to_string(),
            DataValue::Int32(v) => v.to_string(),
            DataValue::UInt32(v) => v.to_string(),
            DataValue::Int64(v) => v.to_string(),
            DataValue::UInt64(v) => v.to_string(),
            DataValue::Float32(v) => v.to_string(),
            DataValue::Float64(v) => v.to_string(),
            DataValue::Decimal(v) => v.to_string(),
            DataValue::JSON(v) => v.clone(),
            DataValue::Date(v) => v.to_string(),
            DataValue::Time(v) => v.to_string(),
            DataValue::DateTime(v) => v.to_string(),
            DataValue::DateTimeWithTZ(v) => v.to_rfc3339(),
        }
    }

    /// Converts the value into plain json, as returned to the host
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;

        match self {
            DataValue::Null => J::Null,
            DataValue::Boolean(v) => J::Bool(*v),
            DataValue::Int8(v) => J::from(*v),
            DataValue::UInt8(v) => J::from(*v),
            DataValue::Int16(v) => J::from(*v),
            DataValue::UInt16(v) => J::from(*v),
            DataValue::Int32(v) => J::from(*v),
            DataValue::UInt32(v) => J::from(*v),
            DataValue::Int64(v) => J::from(*v),
            DataValue::UInt64(v) => J::from(*v),
            DataValue::Float32(v) => J::from(*v),
            DataValue::Float64(v) => J::from(*v),
            DataValue::JSON(v) => serde_json::from_str(v).unwrap_or_else(|_| J::String(v.clone())),
            other => J::String(other.to_text()),
        }
    }
}

impl From<&str> for DataValue {
    fn from(str: &str) -> Self {
        DataValue::Utf8String(str.to_string())
    }
}

impl From<String> for DataValue {
    fn from(str: String) -> Self {
        DataValue::Utf8String(str)
    }
}
