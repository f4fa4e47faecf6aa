use chrono::{DateTime, NaiveDate, NaiveTime};
use duckdb::types::{TimeUnit, Value};
use duckds_core::data::DataValue;
use serde::{Deserialize, Serialize};

/// Field kinds understood by the host's query builder widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaqbFieldType {
    Text,
    Number,
    Boolean,
    Datetime,
    Date,
    Time,
    Select,
    Multiselect,
}

/// How a column is presented in the query builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub raqb_field_type: RaqbFieldType,
    pub icon: &'static str,
}

impl FieldConfig {
    const fn new(raqb_field_type: RaqbFieldType, icon: &'static str) -> Self {
        Self {
            raqb_field_type,
            icon,
        }
    }
}

/// Maps an information_schema type name to its query builder field config.
/// Timestamps and unknown types are treated as text.
pub fn get_field_config(r#type: &str) -> FieldConfig {
    match r#type {
        "boolean" => FieldConfig::new(RaqbFieldType::Boolean, "toggle-off"),
        "bit" | "bit varying" | "character" | "character varying" | "text" => {
            FieldConfig::new(RaqbFieldType::Text, "text")
        }
        "smallint" | "integer" | "bigint" | "decimal" | "numeric" | "real"
        | "double precision" | "serial" | "bigserial" | "smallserial" => {
            FieldConfig::new(RaqbFieldType::Number, "calculator-alt")
        }
        "date" => FieldConfig::new(RaqbFieldType::Date, "clock-nine"),
        "time" | "time with time zone" | "time without time zone" | "interval" => {
            FieldConfig::new(RaqbFieldType::Time, "clock-nine")
        }
        _ => FieldConfig::new(RaqbFieldType::Text, "text"),
    }
}

fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

// 0001-01-01 is day 1 of the common era, 1970-01-01 is day 719163
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts a value read from duckdb into a data value.
/// Values without a scalar counterpart (lists, structs, intervals...) are rendered as text.
pub fn from_duckdb(val: Value) -> DataValue {
    match val {
        Value::Null => DataValue::Null,
        Value::Boolean(v) => DataValue::Boolean(v),
        Value::TinyInt(v) => DataValue::Int8(v),
        Value::SmallInt(v) => DataValue::Int16(v),
        Value::Int(v) => DataValue::Int32(v),
        Value::BigInt(v) => DataValue::Int64(v),
        Value::HugeInt(v) => match i64::try_from(v) {
            Ok(v) => DataValue::Int64(v),
            Err(_) => DataValue::Utf8String(v.to_string()),
        },
        Value::UTinyInt(v) => DataValue::UInt8(v),
        Value::USmallInt(v) => DataValue::UInt16(v),
        Value::UInt(v) => DataValue::UInt32(v),
        Value::UBigInt(v) => DataValue::UInt64(v),
        Value::Float(v) => DataValue::Float32(v),
        Value::Double(v) => DataValue::Float64(v),
        Value::Decimal(v) => DataValue::Decimal(v),
        Value::Text(v) => DataValue::Utf8String(v),
        Value::Enum(v) => DataValue::Utf8String(v),
        Value::Blob(v) => DataValue::Binary(v),
        Value::Timestamp(unit, v) => DateTime::from_timestamp_micros(to_micros(unit, v))
            .map(|d| DataValue::DateTime(d.naive_utc()))
            .unwrap_or(DataValue::Null),
        Value::Date32(days) => days
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map(DataValue::Date)
            .unwrap_or(DataValue::Null),
        Value::Time64(unit, v) => {
            let micros = to_micros(unit, v);
            NaiveTime::from_num_seconds_from_midnight_opt(
                (micros / 1_000_000) as u32,
                ((micros % 1_000_000) * 1_000) as u32,
            )
            .map(DataValue::Time)
            .unwrap_or(DataValue::Null)
        }
        other => DataValue::Utf8String(format!("{:?}", other)),
    }
}
