use ordered_float::NotNan;
use quickcheck::{Arbitrary, Gen};

use super::{KeyString, ObjectMap, Value};

const MAX_DEPTH: usize = 4;
const MAX_WIDTH: usize = 4;

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        arbitrary_value(g, 0)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Self::Object(map) => {
                let map = map.clone();
                let keys = map.keys().cloned().collect::<Vec<KeyString>>();
                Box::new(keys.into_iter().map(move |key| {
                    let mut smaller = map.clone();
                    smaller.remove(&key);
                    Self::Object(smaller)
                }))
            }
            Self::Array(array) => Box::new(array.shrink().map(Self::Array)),
            Self::Bytes(_) | Self::Integer(_) | Self::Float(_) | Self::Boolean(_) => {
                Box::new(std::iter::once(Self::Null))
            }
            Self::Null => Box::new(std::iter::empty()),
        }
    }
}

fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
    // Containers are only generated above the depth limit so trees stay small.
    let variants: &[u8] = if depth < MAX_DEPTH {
        &[0, 1, 2, 3, 4, 5, 6]
    } else {
        &[0, 1, 2, 3, 4]
    };

    match g.choose(variants).copied().unwrap_or_default() {
        0 => Value::from(String::arbitrary(g)),
        1 => Value::Integer(i64::arbitrary(g)),
        2 => NotNan::new(f64::arbitrary(g)).map_or(Value::Null, Value::Float),
        3 => Value::Boolean(bool::arbitrary(g)),
        5 => {
            let width = usize::arbitrary(g) % MAX_WIDTH;
            Value::Object(
                (0..width)
                    .map(|_| (KeyString::arbitrary(g), arbitrary_value(g, depth + 1)))
                    .collect::<ObjectMap>(),
            )
        }
        6 => {
            let width = usize::arbitrary(g) % MAX_WIDTH;
            Value::Array((0..width).map(|_| arbitrary_value(g, depth + 1)).collect())
        }
        _ => Value::Null,
    }
}
