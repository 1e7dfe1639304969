use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::types::DataType;

/// Convert a result value to a printable string.
///
/// Timestamps are rendered as dates when the column type is known, since the
/// endpoint transfers them as epoch milliseconds. Returns "NULL" for nulls.
///
/// # Example
///
/// ```rust
/// use cratedb_client::value::value_to_string;
/// use cratedb_client::DataType;
/// use serde_json::json;
///
/// assert_eq!(value_to_string(&json!(42), Some(&DataType::Integer)), "42");
/// assert_eq!(
///     value_to_string(&json!(23423434), Some(&DataType::TimestampTz)),
///     "1970-01-01 06:30:23.434000"
/// );
/// ```
pub fn value_to_string(value: &Value, data_type: Option<&DataType>) -> String {
    match (value, data_type) {
        (Value::Null, _) => "NULL".to_string(),
        (Value::Number(n), Some(t)) if t.is_timestamp() => match n.as_i64() {
            Some(millis) => format_timestamp(millis),
            None => n.to_string(),
        },
        (Value::Number(n), Some(DataType::Date)) => match n.as_i64() {
            Some(millis) => format_date(millis),
            None => n.to_string(),
        },
        (Value::Array(items), Some(DataType::Array(inner))) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| value_to_string(item, Some(inner)))
                .collect();
            format!("[{}]", rendered.join(", "))
        }
        (Value::String(s), _) => s.clone(),
        (Value::Bool(b), _) => b.to_string(),
        (Value::Number(n), _) => n.to_string(),
        (other, _) => other.to_string(),
    }
}

fn format_timestamp(millis: i64) -> String {
    let dt = DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

fn format_date(millis: i64) -> String {
    let date = DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.date_naive())
        .unwrap_or(NaiveDate::MIN);
    date.format("%Y-%m-%d").to_string()
}

/// Interpret a scalar value as i64.
pub fn value_as_i64(value: &Value) -> Result<i64> {
    match value {
        Value::Null => Err(ClientError::Conversion("value is NULL".to_string())),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ClientError::Conversion(format!("{n} is not an integer"))),
        other => Err(ClientError::Conversion(format!(
            "unsupported value {other} for integer projection"
        ))),
    }
}

/// Conversion of Rust values into statement parameters.
///
/// Timestamps travel as epoch milliseconds. Naive timestamps carry no zone and
/// are taken as UTC wall-clock time.
pub trait ToParam {
    fn to_param(&self) -> Value;
}

macro_rules! json_param {
    ($($ty:ty),*) => {
        $(impl ToParam for $ty {
            fn to_param(&self) -> Value {
                Value::from(*self)
            }
        })*
    };
}

json_param!(bool, i16, i32, i64, u32, u64, f64);

impl ToParam for str {
    fn to_param(&self) -> Value {
        Value::from(self)
    }
}

impl ToParam for String {
    fn to_param(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl ToParam for NaiveDateTime {
    fn to_param(&self) -> Value {
        Value::from(self.and_utc().timestamp_millis())
    }
}

impl ToParam for DateTime<Utc> {
    fn to_param(&self) -> Value {
        Value::from(self.timestamp_millis())
    }
}

impl<T: ToParam> ToParam for Option<T> {
    fn to_param(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToParam::to_param)
    }
}
