//! Native [`Value`] to tagged [`AttributeValue`] encoder.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use indexmap::IndexMap;

use crate::attribute::AttributeValue;
use crate::error::ItemCodecError;
use crate::number::format_number;
use crate::options::ItemCodecOptions;
use crate::set::{ItemSet, SetElement, SetKind};
use crate::value::Value;

/// Item encoder — turns native values into tagged wire values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemEncoder {
    pub options: ItemCodecOptions,
}

impl ItemEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ItemCodecOptions) -> Self {
        Self { options }
    }

    /// Encode a single value.
    pub fn encode(&self, value: &Value) -> Result<AttributeValue, ItemCodecError> {
        self.write_any(value)
    }

    /// Encode a top-level item: an attribute map without the outer `M` wrapper.
    pub fn encode_item(
        &self,
        item: &IndexMap<String, Value>,
    ) -> Result<IndexMap<String, AttributeValue>, ItemCodecError> {
        self.write_entries(item)
    }

    // ----------------------------------------------------------------
    // Core write dispatch

    pub fn write_any(&self, value: &Value) -> Result<AttributeValue, ItemCodecError> {
        match value {
            Value::Null => Ok(self.write_null()),
            Value::Bool(b) => Ok(self.write_bool(*b)),
            Value::Str(s) => Ok(self.write_str(s)),
            Value::Number(n) => self.write_number(*n),
            Value::Binary(b) => Ok(self.write_binary(b)),
            Value::List(items) => self.write_list(items),
            Value::Map(map) => Ok(AttributeValue::M(self.write_entries(map)?)),
            Value::Set(set) => self.write_set(set),
        }
    }

    // ----------------------------------------------------------------
    // Scalars

    pub fn write_null(&self) -> AttributeValue {
        AttributeValue::Null(true)
    }

    pub fn write_bool(&self, b: bool) -> AttributeValue {
        if self.options.disable_boolean {
            AttributeValue::N(if b { "1" } else { "0" }.to_string())
        } else {
            AttributeValue::Bool(b)
        }
    }

    pub fn write_str(&self, s: &str) -> AttributeValue {
        AttributeValue::S(s.to_string())
    }

    pub fn write_number(&self, n: f64) -> Result<AttributeValue, ItemCodecError> {
        Ok(AttributeValue::N(self.number_text(n)?))
    }

    pub fn write_binary(&self, b: &[u8]) -> AttributeValue {
        AttributeValue::B(STANDARD.encode(b))
    }

    fn number_text(&self, n: f64) -> Result<String, ItemCodecError> {
        if self.options.disable_lossy_float {
            return Err(ItemCodecError::not_supported(
                "numeric encoding is disabled by disableLossyFloat",
            ));
        }
        Ok(format_number(n))
    }

    // ----------------------------------------------------------------
    // Containers

    pub fn write_list(&self, items: &[Value]) -> Result<AttributeValue, ItemCodecError> {
        let encoded = items
            .iter()
            .map(|item| self.write_any(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AttributeValue::L(encoded))
    }

    fn write_entries(
        &self,
        map: &IndexMap<String, Value>,
    ) -> Result<IndexMap<String, AttributeValue>, ItemCodecError> {
        let mut out = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            out.insert(key.clone(), self.write_any(value)?);
        }
        Ok(out)
    }

    /// Sets become `NS` / `SS` / `BS` of raw scalar text when sets are enabled,
    /// otherwise an `L` of individually tagged scalars.
    pub fn write_set(&self, set: &ItemSet) -> Result<AttributeValue, ItemCodecError> {
        let kind = set.kind().ok_or_else(|| {
            ItemCodecError::invalid("set member kind cannot be determined (empty untyped or mixed set)")
        })?;

        if !self.options.enable_sets {
            tracing::debug!(%kind, len = set.len(), "encoding set as list");
            let encoded = set
                .elements()
                .iter()
                .map(|e| self.write_scalar(e))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(AttributeValue::L(encoded));
        }

        let raw = set
            .elements()
            .iter()
            .map(|e| self.scalar_text(e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(match kind {
            SetKind::Number => AttributeValue::Ns(raw),
            SetKind::String => AttributeValue::Ss(raw),
            SetKind::Binary => AttributeValue::Bs(raw),
        })
    }

    fn write_scalar(&self, element: &SetElement) -> Result<AttributeValue, ItemCodecError> {
        match element {
            SetElement::Number(n) => self.write_number(*n),
            SetElement::Str(s) => Ok(self.write_str(s)),
            SetElement::Binary(b) => Ok(self.write_binary(b)),
        }
    }

    fn scalar_text(&self, element: &SetElement) -> Result<String, ItemCodecError> {
        match element {
            SetElement::Number(n) => self.number_text(*n),
            SetElement::Str(s) => Ok(s.clone()),
            SetElement::Binary(b) => Ok(STANDARD.encode(b)),
        }
    }
}
