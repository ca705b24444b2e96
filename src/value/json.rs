use ordered_float::NotNan;
use serde_json::Value as JsonValue;

use super::Value;

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(boolean) => Self::Boolean(boolean),
            JsonValue::Number(number) => match number.as_i64() {
                Some(int) => Self::Integer(int),
                // u64 beyond i64::MAX and fractional numbers end up here.
                None => number
                    .as_f64()
                    .and_then(|float| NotNan::new(float).ok())
                    .map_or(Self::Null, Self::Float),
            },
            JsonValue::String(string) => string.into(),
            JsonValue::Array(array) => Self::Array(array.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => map.into_iter().collect(),
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Boolean(boolean) => Self::Bool(boolean),
            Value::Integer(int) => Self::from(int),
            Value::Float(float) => Self::from(float.into_inner()),
            Value::Bytes(bytes) => Self::String(String::from_utf8_lossy(&bytes).into_owned()),
            Value::Array(array) => Self::Array(array.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::value;

    #[test]
    fn from_json() {
        let json = json!({
            "a": { "b": [1, 2.5, "three", null, true] },
            "empty": {},
        });

        let expected = value!({
            "a": { "b": [1, (NotNan::new(2.5).unwrap()), "three", null, true] },
            "empty": {},
        });

        assert_eq!(Value::from(json), expected);
    }

    #[test]
    fn to_json() {
        let value = value!({ "a": [1, "x", null], "b": false });

        assert_eq!(JsonValue::from(value), json!({ "a": [1, "x", null], "b": false }));
    }
}
