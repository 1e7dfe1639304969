use serde::Deserialize;

/// Column type as reported by the `/_sql?types` endpoint.
///
/// CrateDB encodes scalar types as numeric ids and arrays as `[100, inner]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawType")]
pub enum DataType {
    Null,
    Char,
    Boolean,
    Text,
    Ip,
    Double,
    Real,
    SmallInt,
    Integer,
    BigInt,
    TimestampTz,
    Object,
    GeoPoint,
    GeoShape,
    Timestamp,
    Numeric,
    Date,
    Array(Box<DataType>),
    Other(i64),
}

impl DataType {
    pub fn from_id(id: i64) -> Self {
        match id {
            0 => DataType::Null,
            2 => DataType::Char,
            3 => DataType::Boolean,
            4 => DataType::Text,
            5 => DataType::Ip,
            6 => DataType::Double,
            7 => DataType::Real,
            8 => DataType::SmallInt,
            9 => DataType::Integer,
            10 => DataType::BigInt,
            11 => DataType::TimestampTz,
            12 => DataType::Object,
            13 => DataType::GeoPoint,
            14 => DataType::GeoShape,
            15 => DataType::Timestamp,
            22 => DataType::Numeric,
            24 => DataType::Date,
            other => DataType::Other(other),
        }
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, DataType::Timestamp | DataType::TimestampTz)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawType {
    Id(i64),
    Nested(Vec<RawType>),
}

impl From<RawType> for DataType {
    fn from(raw: RawType) -> Self {
        match raw {
            RawType::Id(id) => DataType::from_id(id),
            RawType::Nested(mut parts) => {
                if parts.len() == 2 && matches!(parts[0], RawType::Id(100)) {
                    let inner = parts.pop().map(DataType::from).unwrap_or(DataType::Null);
                    DataType::Array(Box::new(inner))
                } else {
                    match parts.into_iter().next() {
                        Some(RawType::Id(id)) => DataType::Other(id),
                        _ => DataType::Other(-1),
                    }
                }
            }
        }
    }
}
