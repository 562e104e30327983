//! Tagged [`AttributeValue`] to native [`Value`] decoder.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::attribute::AttributeValue;
use crate::error::ItemCodecError;
use crate::number::parse_number;
use crate::options::ItemCodecOptions;
use crate::set::{ItemSet, SetElement, SetKind};
use crate::value::Value;

/// Standard alphabet; padding optional and stray trailing bits ignored.
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Item decoder — turns tagged wire values into native values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemDecoder {
    pub options: ItemCodecOptions,
}

impl ItemDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ItemCodecOptions) -> Self {
        Self { options }
    }

    /// Decode a typed wire value.
    pub fn decode(&self, value: &AttributeValue) -> Result<Value, ItemCodecError> {
        self.read_any(value)
    }

    /// Decode a raw JSON wire document.
    ///
    /// See [`AttributeValue::from_json`] for how loosely shaped input
    /// (several type keys, bare arrays and objects) is read.
    pub fn decode_json(&self, doc: &JsonValue) -> Result<Value, ItemCodecError> {
        self.read_any(&AttributeValue::from_json(doc)?)
    }

    /// Decode a top-level item: an attribute map without the outer `M` wrapper.
    pub fn decode_item(
        &self,
        item: &IndexMap<String, AttributeValue>,
    ) -> Result<IndexMap<String, Value>, ItemCodecError> {
        self.read_entries(item)
    }

    // ----------------------------------------------------------------
    // Core read dispatch

    pub fn read_any(&self, value: &AttributeValue) -> Result<Value, ItemCodecError> {
        match value {
            AttributeValue::Null(true) => Ok(Value::Null),
            AttributeValue::Null(false) => {
                Err(ItemCodecError::invalid("NULL payload must be true"))
            }
            AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
            AttributeValue::S(s) => Ok(Value::Str(s.clone())),
            AttributeValue::N(text) => Ok(Value::Number(parse_number(text))),
            AttributeValue::B(text) => Ok(Value::Binary(read_binary(text)?)),
            AttributeValue::Ns(items) => self.read_set(SetKind::Number, items),
            AttributeValue::Ss(items) => self.read_set(SetKind::String, items),
            AttributeValue::Bs(items) => self.read_set(SetKind::Binary, items),
            AttributeValue::L(items) => Ok(Value::List(
                items
                    .iter()
                    .map(|item| self.read_any(item))
                    .collect::<Result<_, _>>()?,
            )),
            AttributeValue::M(map) => Ok(Value::Map(self.read_entries(map)?)),
        }
    }

    fn read_entries(
        &self,
        map: &IndexMap<String, AttributeValue>,
    ) -> Result<IndexMap<String, Value>, ItemCodecError> {
        let mut out = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            out.insert(key.clone(), self.read_any(value)?);
        }
        Ok(out)
    }

    /// Set tags yield an [`ItemSet`] when sets are enabled, otherwise a list
    /// of the decoded members in wire order.
    fn read_set(&self, kind: SetKind, items: &[String]) -> Result<Value, ItemCodecError> {
        let elements = items
            .iter()
            .map(|text| read_scalar(kind, text))
            .collect::<Result<Vec<_>, _>>()?;

        if self.options.enable_sets {
            let mut set = ItemSet::new(kind);
            set.extend(elements);
            Ok(Value::Set(set))
        } else {
            tracing::debug!(%kind, len = elements.len(), "decoding set as list");
            Ok(Value::List(elements.into_iter().map(Value::from).collect()))
        }
    }
}

fn read_scalar(kind: SetKind, text: &str) -> Result<SetElement, ItemCodecError> {
    Ok(match kind {
        SetKind::Number => SetElement::Number(parse_number(text)),
        SetKind::String => SetElement::Str(text.to_string()),
        SetKind::Binary => SetElement::Binary(read_binary(text)?),
    })
}

/// Decode base64 text the forgiving way: input stops at the first `=`, the
/// URL-safe `-` / `_` map onto `+` / `/`, and any other byte outside the
/// alphabet (whitespace, line breaks) is skipped. A dangling sixth bit group
/// carries no whole byte and is dropped.
fn read_binary(text: &str) -> Result<Vec<u8>, ItemCodecError> {
    let mut clean: Vec<u8> = text
        .bytes()
        .take_while(|&b| b != b'=')
        .filter_map(|b| match b {
            b'-' => Some(b'+'),
            b'_' => Some(b'/'),
            b'+' | b'/' => Some(b),
            b if b.is_ascii_alphanumeric() => Some(b),
            _ => None,
        })
        .collect();
    if clean.len() % 4 == 1 {
        clean.pop();
    }
    BASE64_LENIENT
        .decode(&clean)
        .map_err(|e| ItemCodecError::invalid(format!("B payload is not valid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sets_enabled() -> ItemDecoder {
        ItemDecoder::with_options(ItemCodecOptions {
            enable_sets: true,
            ..Default::default()
        })
    }

    #[test]
    fn scalars() {
        let dec = ItemDecoder::new();
        assert_eq!(dec.decode(&AttributeValue::S("foo".into())).unwrap(), Value::from("foo"));
        assert_eq!(dec.decode(&AttributeValue::N("54".into())).unwrap(), Value::from(54));
        assert_eq!(dec.decode(&AttributeValue::N("1.1".into())).unwrap(), Value::from(1.1));
        assert_eq!(
            dec.decode(&AttributeValue::B("AQ==".into())).unwrap(),
            Value::Binary(vec![0x01])
        );
        assert_eq!(dec.decode(&AttributeValue::Null(true)).unwrap(), Value::Null);
        assert_eq!(dec.decode(&AttributeValue::Bool(false)).unwrap(), Value::from(false));
    }

    #[test]
    fn null_false_is_rejected() {
        let err = ItemDecoder::new()
            .decode(&AttributeValue::Null(false))
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn non_numeric_text_decodes_to_nan() {
        let v = ItemDecoder::new().decode(&AttributeValue::N("abc".into())).unwrap();
        assert!(v.as_f64().is_some_and(f64::is_nan));
    }

    #[test]
    fn binary_text_is_read_forgivingly() {
        let dec = ItemDecoder::new();
        let cases: [(&str, Vec<u8>); 9] = [
            ("AQ", vec![0x01]),
            ("AQ==\n", vec![0x01]),
            ("AQ ==", vec![0x01]),
            ("AQID\r\nBAU=", vec![1, 2, 3, 4, 5]),
            ("-_8=", vec![0xfb, 0xff]),
            ("+/8=", vec![0xfb, 0xff]),
            ("AQ==AQ==", vec![0x01]),
            ("AR", vec![0x01]),
            ("!!", vec![]),
        ];
        for (text, bytes) in cases {
            assert_eq!(
                dec.decode(&AttributeValue::B(text.into())).unwrap(),
                Value::Binary(bytes),
                "text={text:?}"
            );
        }
    }

    #[test]
    fn set_tags_degrade_to_lists() {
        let dec = ItemDecoder::new();
        assert_eq!(
            dec.decode(&AttributeValue::Ns(vec!["1".into(), "2".into(), "3".into()]))
                .unwrap(),
            Value::List(vec![1.into(), 2.into(), 3.into()])
        );
        assert_eq!(
            dec.decode(&AttributeValue::Bs(vec!["AQ==".into()])).unwrap(),
            Value::List(vec![Value::Binary(vec![1])])
        );
    }

    #[test]
    fn set_tags_build_sets_when_enabled() {
        let dec = sets_enabled();
        assert_eq!(
            dec.decode(&AttributeValue::Ns(vec!["1".into(), "2".into(), "3".into()]))
                .unwrap(),
            Value::from(ItemSet::numbers([1.0, 2.0, 3.0]))
        );
        assert_eq!(
            dec.decode(&AttributeValue::Ss(vec!["foo".into(), "bar".into()]))
                .unwrap(),
            Value::from(ItemSet::strings(["bar", "foo"]))
        );
        assert_eq!(
            dec.decode(&AttributeValue::Bs(vec!["AQ==".into()])).unwrap(),
            Value::from(ItemSet::binaries([vec![1]]))
        );
        assert_eq!(
            dec.decode(&AttributeValue::Ss(vec![])).unwrap(),
            Value::from(ItemSet::new(SetKind::String))
        );
    }

    #[test]
    fn json_documents() {
        let dec = ItemDecoder::new();
        assert_eq!(
            dec.decode_json(&json!({"L": [{"S": "foo"}, {"N": "54"}, {"L": [{"N": "1"}]}]}))
                .unwrap(),
            Value::List(vec!["foo".into(), 54.into(), Value::List(vec![1.into()])])
        );
        assert_eq!(
            dec.decode_json(&json!([{"S": "a"}, {"BOOL": true}])).unwrap(),
            Value::List(vec!["a".into(), true.into()])
        );
        assert!(dec.decode_json(&json!({"FOO": "12"})).unwrap_err().is_invalid_input());
        assert!(dec.decode_json(&json!({"NULL": false})).unwrap_err().is_invalid_input());
    }

    #[test]
    fn item_has_no_outer_wrapper() {
        let mut item = IndexMap::new();
        item.insert("id".to_string(), AttributeValue::S("a1".into()));
        item.insert("tags".to_string(), AttributeValue::Ss(vec!["x".into()]));
        let decoded = ItemDecoder::new().decode_item(&item).unwrap();
        assert_eq!(decoded["id"], Value::from("a1"));
        assert_eq!(decoded["tags"], Value::List(vec!["x".into()]));
    }
}
