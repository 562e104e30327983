//! Codec configuration.

use serde::{Deserialize, Serialize};

/// Options controlling [`ItemCodec`](crate::ItemCodec) behaviour.
///
/// All flags default to `false`. When deserialized, keys use camelCase
/// (`disableBoolean`, `enableSets`, `disableLossyFloat`) and unrecognized keys
/// are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemCodecOptions {
    /// Encode booleans as `{"N": "1"}` / `{"N": "0"}` instead of `BOOL`.
    pub disable_boolean: bool,
    /// Use the `NS` / `SS` / `BS` set tags. When `false`, sets encode as `L`
    /// and set tags decode to plain lists.
    pub enable_sets: bool,
    /// Refuse numeric encoding outright.
    pub disable_lossy_float: bool,
}

impl ItemCodecOptions {
    /// Read options from a JSON object such as
    /// `{"enableSets": true, "disableBoolean": false}`.
    ///
    /// Anything that is not an object (including `null`) yields the defaults.
    /// Flags are read by truthiness: `false`, `null`, `0` and `""` are off,
    /// any other value (arrays and objects included) is on.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let flag = |key: &str| obj.get(key).is_some_and(is_truthy);
        Self {
            disable_boolean: flag("disableBoolean"),
            enable_sets: flag("enableSets"),
            disable_lossy_float: flag("disableLossyFloat"),
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}
