//! [`ItemCodec`] — combined encoder/decoder pair.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::attribute::AttributeValue;
use crate::decoder::ItemDecoder;
use crate::encoder::ItemEncoder;
use crate::error::ItemCodecError;
use crate::options::ItemCodecOptions;
use crate::value::Value;

/// Bidirectional codec between [`Value`] and [`AttributeValue`].
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemCodec {
    encoder: ItemEncoder,
    decoder: ItemDecoder,
}

impl ItemCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ItemCodecOptions) -> Self {
        Self {
            encoder: ItemEncoder::with_options(options),
            decoder: ItemDecoder::with_options(options),
        }
    }

    pub fn options(&self) -> ItemCodecOptions {
        self.encoder.options
    }

    pub fn encode(&self, value: &Value) -> Result<AttributeValue, ItemCodecError> {
        self.encoder.encode(value)
    }

    pub fn decode(&self, value: &AttributeValue) -> Result<Value, ItemCodecError> {
        self.decoder.decode(value)
    }

    /// Decode a raw JSON wire document, e.g. `{"M": {"id": {"S": "a1"}}}`.
    pub fn decode_json(&self, doc: &JsonValue) -> Result<Value, ItemCodecError> {
        self.decoder.decode_json(doc)
    }

    /// Encode a plain JSON document and return the wire document.
    pub fn encode_json(&self, doc: &JsonValue) -> Result<JsonValue, ItemCodecError> {
        Ok(self.encode(&Value::from(doc))?.to_json())
    }

    /// Decode a wire document and return it as plain JSON.
    ///
    /// Binaries come back as base64 strings and sets as arrays.
    pub fn decode_to_json(&self, doc: &JsonValue) -> Result<JsonValue, ItemCodecError> {
        Ok(JsonValue::from(self.decode_json(doc)?))
    }

    pub fn encode_item(
        &self,
        item: &IndexMap<String, Value>,
    ) -> Result<IndexMap<String, AttributeValue>, ItemCodecError> {
        self.encoder.encode_item(item)
    }

    pub fn decode_item(
        &self,
        item: &IndexMap<String, AttributeValue>,
    ) -> Result<IndexMap<String, Value>, ItemCodecError> {
        self.decoder.decode_item(item)
    }
}

impl From<ItemCodecOptions> for ItemCodec {
    fn from(options: ItemCodecOptions) -> Self {
        Self::with_options(options)
    }
}
