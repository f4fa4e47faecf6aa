use serde::{Deserialize, Serialize};

use super::DataValue;

/// Data type of values
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum DataType {
    Utf8String,
    Binary,
    Boolean,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Decimal,
    JSON,
    Date,
    Time,
    DateTime,
    DateTimeWithTZ,
    Null,
}

impl DataType {
    /// Merges the type of a newly observed value into the type of a column.
    /// Nulls never change the column type.
    pub fn merge(&self, other: &DataType) -> DataType {
        match (self, other) {
            (DataType::Null, t) => t.clone(),
            (t, DataType::Null) => t.clone(),
            (a, b) if a == b => a.clone(),
            _ => DataType::Utf8String,
        }
    }
}

impl<'a> From<&'a DataValue> for DataType {
    fn from(v: &'a DataValue) -> Self {
        match v {
            DataValue::Null => DataType::Null,
            DataValue::Utf8String(_) => DataType::Utf8String,
            DataValue::Binary(_) => DataType::Binary,
            DataValue::Boolean(_) => DataType::Boolean,
            DataValue::Int8(_) => DataType::Int8,
            DataValue::UInt8(_) => DataType::UInt8,
            DataValue::Int16(_) => DataType::Int16,
            DataValue::UInt16(_) => DataType::UInt16,
            DataValue::Int32(_) => DataType::Int32,
            DataValue::UInt32(_) => DataType::UInt32,
            DataValue::Int64(_) => DataType::Int64,
            DataValue::UInt64(_) => DataType::UInt64,
            DataValue::Float32(_) => DataType::Float32,
            DataValue::Float64(_) => DataType::Float64,
            DataValue::Decimal(_) => DataType::Decimal,
            DataValue::JSON(_) => DataType::JSON,
            DataValue::Date(_) => DataType::Date,
            DataValue::Time(_) => DataType::Time,
            DataValue::DateTime(_) => DataType::DateTime,
            DataValue::DateTimeWithTZ(_) => DataType::DateTimeWithTZ,
        }
    }
}
