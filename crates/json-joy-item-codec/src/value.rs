//! [`Value`] — the native side of the codec.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use indexmap::IndexMap;

use crate::set::{ItemSet, SetElement};

/// A native value the codec can encode to, and decode from, the tagged wire form.
///
/// Maps keep insertion order so that an encode/decode round trip returns the
/// keys in the order they went in. Map equality does not depend on order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Binary(Vec<u8>),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Set(ItemSet),
}

impl Value {
    /// Build a map value from `(key, value)` pairs, keeping their order.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&ItemSet> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Binary(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<ItemSet> for Value {
    fn from(set: ItemSet) -> Self {
        Value::Set(set)
    }
}

impl From<SetElement> for Value {
    fn from(element: SetElement) -> Self {
        match element {
            SetElement::Number(n) => Value::Number(n),
            SetElement::Str(s) => Value::Str(s),
            SetElement::Binary(b) => Value::Binary(b),
        }
    }
}

/// Plain JSON maps onto the JSON subset of [`Value`]; every number becomes an `f64`.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => Value::List(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => {
                Value::Map(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(arr) => Value::List(arr.iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => Value::Map(
                obj.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Binaries become base64 strings and sets become arrays. Non-finite numbers,
/// which JSON cannot hold, become `null`.
impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => json_number(n),
            Value::Str(s) => serde_json::Value::String(s),
            Value::Binary(b) => serde_json::Value::String(STANDARD.encode(b)),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Set(set) => serde_json::Value::Array(
                set.into_elements()
                    .into_iter()
                    .map(|e| serde_json::Value::from(Value::from(e)))
                    .collect(),
            ),
        }
    }
}

// Integral values in the safe-integer range stay integers so `54` does not
// come back as `54.0`.
fn json_number(n: f64) -> serde_json::Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_document() {
        let v = Value::from(json!({"a": [1, "x", null, true], "b": 1.5}));
        assert_eq!(
            v,
            Value::map([
                (
                    "a",
                    Value::List(vec![1.into(), "x".into(), Value::Null, true.into()])
                ),
                ("b", 1.5.into()),
            ])
        );
    }

    #[test]
    fn borrowed_and_owned_json_agree() {
        let doc = json!({"k": [1, {"m": "v"}, false], "z": null});
        assert_eq!(Value::from(&doc), Value::from(doc.clone()));
    }

    #[test]
    fn to_json_document() {
        let v = Value::map([
            ("bin", Value::Binary(vec![1])),
            ("n", 54.into()),
            ("f", 1.1.into()),
            ("set", ItemSet::strings(["a", "b"]).into()),
            ("nan", f64::NAN.into()),
        ]);
        assert_eq!(
            serde_json::Value::from(v),
            json!({"bin": "AQ==", "n": 54, "f": 1.1, "set": ["a", "b"], "nan": null})
        );
    }

    #[test]
    fn map_equality_ignores_key_order() {
        let a = Value::map([("x", Value::from(1)), ("y", Value::from(2))]);
        let b = Value::map([("y", Value::from(2)), ("x", Value::from(1))]);
        assert_eq!(a, b);
    }

    #[test]
    fn negative_zero_stays_a_json_integer() {
        assert_eq!(serde_json::Value::from(Value::Number(-0.0)), json!(0));
    }

    #[test]
    fn accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::from(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::from(vec![Value::Null]).as_list().map(<[Value]>::len), Some(1));
        assert!(Value::Null.as_map().is_none());
        assert!(Value::from(ItemSet::numbers([1.0])).as_set().is_some());
    }
}
