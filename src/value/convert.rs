use bytes::Bytes;
use ordered_float::NotNan;

use super::{KeyString, ObjectMap, Value};

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Self::Bytes(Bytes::copy_from_slice(string.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        Self::Bytes(string.into())
    }
}

impl From<KeyString> for Value {
    fn from(key: KeyString) -> Self {
        String::from(key).into()
    }
}

impl From<i64> for Value {
    fn from(int: i64) -> Self {
        Self::Integer(int)
    }
}

impl From<i32> for Value {
    fn from(int: i32) -> Self {
        Self::Integer(i64::from(int))
    }
}

impl From<NotNan<f64>> for Value {
    fn from(float: NotNan<f64>) -> Self {
        Self::Float(float)
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Self::Boolean(boolean)
    }
}

impl From<ObjectMap> for Value {
    fn from(map: ObjectMap) -> Self {
        Self::Object(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(array: Vec<T>) -> Self {
        Self::Array(array.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<KeyString>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_primitives() {
        assert_eq!(Value::from("foo"), Value::Bytes(Bytes::from("foo")));
        assert_eq!(Value::from(String::from("foo")), Value::from("foo"));
        assert_eq!(Value::from(7i64), Value::Integer(7));
        assert_eq!(Value::from(7), Value::Integer(7));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(vec![1, 2]), Value::Array(vec![1.into(), 2.into()]));
    }

    #[test]
    fn from_pairs() {
        let value: Value = vec![("a", 1), ("b", 2)].into_iter().collect();
        let map = value.as_object().unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("b"), Some(&Value::Integer(2)));
    }
}
