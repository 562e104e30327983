//! [`AttributeValue`] — the tagged wire form.
//!
//! Every value is a single-key object naming its type:
//!
//! | Tag    | Payload                          |
//! |--------|----------------------------------|
//! | `NULL` | `true`                           |
//! | `BOOL` | boolean                          |
//! | `N`    | decimal number text              |
//! | `S`    | string                           |
//! | `B`    | base64 text                      |
//! | `L`    | list of tagged values            |
//! | `M`    | map of tagged values             |
//! | `NS`   | list of decimal number texts     |
//! | `SS`   | list of strings                  |
//! | `BS`   | list of base64 texts             |

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::ItemCodecError;

/// Recognized type keys, in the order a multi-key object is resolved.
pub const TYPE_KEYS: [&str; 10] = ["NULL", "BOOL", "S", "N", "B", "NS", "SS", "BS", "L", "M"];

/// A tagged wire value.
///
/// Serializes to (and strictly deserializes from) the single-key JSON object
/// form, e.g. `{"S": "foo"}`. Use [`AttributeValue::from_json`] to accept
/// loosely shaped documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "B")]
    B(String),
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    #[serde(rename = "M")]
    M(IndexMap<String, AttributeValue>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "BS")]
    Bs(Vec<String>),
}

impl AttributeValue {
    /// The wire tag of this value.
    pub fn tag(&self) -> &'static str {
        match self {
            AttributeValue::Null(_) => "NULL",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::N(_) => "N",
            AttributeValue::S(_) => "S",
            AttributeValue::B(_) => "B",
            AttributeValue::L(_) => "L",
            AttributeValue::M(_) => "M",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Ss(_) => "SS",
            AttributeValue::Bs(_) => "BS",
        }
    }

    /// Render as a JSON document.
    pub fn to_json(&self) -> JsonValue {
        let payload = match self {
            AttributeValue::Null(b) | AttributeValue::Bool(b) => JsonValue::Bool(*b),
            AttributeValue::N(s) | AttributeValue::S(s) | AttributeValue::B(s) => {
                JsonValue::String(s.clone())
            }
            AttributeValue::L(items) => {
                JsonValue::Array(items.iter().map(AttributeValue::to_json).collect())
            }
            AttributeValue::M(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            AttributeValue::Ns(items) | AttributeValue::Ss(items) | AttributeValue::Bs(items) => {
                JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
            }
        };
        let mut obj = Map::with_capacity(1);
        obj.insert(self.tag().to_string(), payload);
        JsonValue::Object(obj)
    }

    /// Read a JSON document leniently.
    ///
    /// Keys are looked up in [`TYPE_KEYS`] order, so an object carrying more
    /// than one recognized key resolves to the first one found. A bare array
    /// reads as `L` and an object without any recognized key reads as `M`.
    /// `N` and `NS` members may be JSON numbers as well as strings.
    pub fn from_json(value: &JsonValue) -> Result<Self, ItemCodecError> {
        match value {
            JsonValue::Array(items) => Ok(AttributeValue::L(read_list(items)?)),
            JsonValue::Object(obj) => read_object(obj),
            other => Err(ItemCodecError::invalid(format!(
                "expected a tagged object, found {}",
                json_kind(other)
            ))),
        }
    }
}

impl From<&AttributeValue> for JsonValue {
    fn from(value: &AttributeValue) -> Self {
        value.to_json()
    }
}

fn read_object(obj: &Map<String, JsonValue>) -> Result<AttributeValue, ItemCodecError> {
    let present: Vec<&str> = TYPE_KEYS
        .iter()
        .copied()
        .filter(|key| obj.contains_key(*key))
        .collect();
    let Some(&tag) = present.first() else {
        let mut map = IndexMap::with_capacity(obj.len());
        for (key, value) in obj {
            map.insert(key.clone(), AttributeValue::from_json(value)?);
        }
        return Ok(AttributeValue::M(map));
    };
    if present.len() > 1 {
        tracing::warn!(keys = ?present, chosen = tag, "tagged value carries several type keys");
    }

    let payload = &obj[tag];
    match tag {
        "NULL" => Ok(AttributeValue::Null(expect_bool(tag, payload)?)),
        "BOOL" => Ok(AttributeValue::Bool(expect_bool(tag, payload)?)),
        "S" => Ok(AttributeValue::S(expect_str(tag, payload)?)),
        "N" => Ok(AttributeValue::N(expect_number_text(tag, payload)?)),
        "B" => Ok(AttributeValue::B(expect_str(tag, payload)?)),
        "NS" => Ok(AttributeValue::Ns(
            expect_array(tag, payload)?
                .iter()
                .map(|v| expect_number_text(tag, v))
                .collect::<Result<_, _>>()?,
        )),
        "SS" => Ok(AttributeValue::Ss(
            expect_array(tag, payload)?
                .iter()
                .map(|v| expect_str(tag, v))
                .collect::<Result<_, _>>()?,
        )),
        "BS" => Ok(AttributeValue::Bs(
            expect_array(tag, payload)?
                .iter()
                .map(|v| expect_str(tag, v))
                .collect::<Result<_, _>>()?,
        )),
        "L" => Ok(AttributeValue::L(read_list(expect_array(tag, payload)?)?)),
        _ => {
            let JsonValue::Object(entries) = payload else {
                return Err(unexpected(tag, "an object", payload));
            };
            let mut map = IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(key.clone(), AttributeValue::from_json(value)?);
            }
            Ok(AttributeValue::M(map))
        }
    }
}

fn read_list(items: &[JsonValue]) -> Result<Vec<AttributeValue>, ItemCodecError> {
    items.iter().map(AttributeValue::from_json).collect()
}

fn expect_bool(tag: &str, value: &JsonValue) -> Result<bool, ItemCodecError> {
    value.as_bool().ok_or_else(|| unexpected(tag, "a boolean", value))
}

fn expect_str(tag: &str, value: &JsonValue) -> Result<String, ItemCodecError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| unexpected(tag, "a string", value))
}

fn expect_number_text(tag: &str, value: &JsonValue) -> Result<String, ItemCodecError> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(unexpected(tag, "a number or numeric string", other)),
    }
}

fn expect_array<'a>(tag: &str, value: &'a JsonValue) -> Result<&'a [JsonValue], ItemCodecError> {
    match value {
        JsonValue::Array(items) => Ok(items.as_slice()),
        other => Err(unexpected(tag, "an array", other)),
    }
}

fn unexpected(tag: &str, expected: &str, found: &JsonValue) -> ItemCodecError {
    ItemCodecError::invalid(format!(
        "{tag} payload must be {expected}, found {}",
        json_kind(found)
    ))
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serde_uses_single_key_objects() {
        let value = AttributeValue::L(vec![
            AttributeValue::S("foo".into()),
            AttributeValue::Ns(vec!["1".into(), "2".into()]),
            AttributeValue::Null(true),
        ]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, json!({"L": [{"S": "foo"}, {"NS": ["1", "2"]}, {"NULL": true}]}));
        assert_eq!(json, value.to_json());

        let back: AttributeValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn serde_rejects_multi_key_objects() {
        let res: Result<AttributeValue, _> = serde_json::from_value(json!({"S": "a", "N": "1"}));
        assert!(res.is_err());
    }

    #[test]
    fn from_json_resolves_by_priority() {
        let v = AttributeValue::from_json(&json!({"N": "1", "S": "a", "BOOL": true})).unwrap();
        assert_eq!(v, AttributeValue::Bool(true));

        let v = AttributeValue::from_json(&json!({"L": [], "SS": ["x"]})).unwrap();
        assert_eq!(v, AttributeValue::Ss(vec!["x".into()]));
    }

    #[test]
    fn from_json_accepts_bare_containers() {
        let v = AttributeValue::from_json(&json!([{"S": "a"}])).unwrap();
        assert_eq!(v, AttributeValue::L(vec![AttributeValue::S("a".into())]));

        let v = AttributeValue::from_json(&json!({"name": {"S": "a"}})).unwrap();
        let mut expected = IndexMap::new();
        expected.insert("name".to_string(), AttributeValue::S("a".into()));
        assert_eq!(v, AttributeValue::M(expected));

        assert_eq!(
            AttributeValue::from_json(&json!({})).unwrap(),
            AttributeValue::M(IndexMap::new())
        );
    }

    #[test]
    fn from_json_accepts_numeric_payloads() {
        assert_eq!(
            AttributeValue::from_json(&json!({"N": 54})).unwrap(),
            AttributeValue::N("54".into())
        );
        assert_eq!(
            AttributeValue::from_json(&json!({"NS": [1, "2"]})).unwrap(),
            AttributeValue::Ns(vec!["1".into(), "2".into()])
        );
    }

    #[test]
    fn from_json_rejects_wrong_payloads() {
        for doc in [
            json!("foo"),
            json!(12),
            json!(null),
            json!({"S": 1}),
            json!({"BOOL": "true"}),
            json!({"NULL": 1}),
            json!({"L": {}}),
            json!({"M": []}),
            json!({"SS": "a"}),
            json!({"BS": [1]}),
            json!({"FOO": "12"}),
        ] {
            let err = AttributeValue::from_json(&doc).unwrap_err();
            assert!(err.is_invalid_input(), "doc={doc}");
        }
    }

    #[test]
    fn tags_match_serde_names() {
        for value in [
            AttributeValue::Null(true),
            AttributeValue::Bool(false),
            AttributeValue::N("1".into()),
            AttributeValue::S("s".into()),
            AttributeValue::B("AQ==".into()),
            AttributeValue::L(vec![]),
            AttributeValue::M(IndexMap::new()),
            AttributeValue::Ns(vec![]),
            AttributeValue::Ss(vec![]),
            AttributeValue::Bs(vec![]),
        ] {
            let json = serde_json::to_value(&value).unwrap();
            let obj = json.as_object().unwrap();
            assert_eq!(obj.len(), 1);
            assert!(obj.contains_key(value.tag()));
            assert!(TYPE_KEYS.contains(&value.tag()));
        }
    }
}
