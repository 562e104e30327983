//! Codec between native values and the tagged key-value "Item" format.
//!
//! Every wire value is a single-key object naming its type: `S`, `N`, `B`,
//! `BOOL`, `NULL`, `L`, `M`, and the set tags `NS`, `SS`, `BS`.
//!
//! Behaviour is controlled by three flags in [`ItemCodecOptions`]:
//! - `disable_boolean`: booleans travel as `{"N": "1"}` / `{"N": "0"}`.
//! - `enable_sets`: sets use `NS` / `SS` / `BS`; otherwise they travel as `L`
//!   and set tags decode to plain lists.
//! - `disable_lossy_float`: numeric encoding fails with
//!   [`ItemCodecError::NotSupported`].
//!
//! # Example
//!
//! ```
//! use json_joy_item_codec::{ItemCodec, Value};
//!
//! let codec = ItemCodec::new();
//! let value = Value::List(vec!["foo".into(), 54.into(), Value::List(vec![1.into()])]);
//!
//! let wire = codec.encode(&value).unwrap();
//! assert_eq!(
//!     wire.to_json(),
//!     serde_json::json!({"L": [{"S": "foo"}, {"N": "54"}, {"L": [{"N": "1"}]}]})
//! );
//! assert_eq!(codec.decode(&wire).unwrap(), value);
//!
//! let err = codec.decode_json(&serde_json::json!({"FOO": "12"})).unwrap_err();
//! assert!(err.is_invalid_input());
//! ```
//!
//! Sets:
//!
//! ```
//! use json_joy_item_codec::{AttributeValue, ItemCodec, ItemCodecOptions, ItemSet};
//!
//! let codec = ItemCodec::with_options(ItemCodecOptions {
//!     enable_sets: true,
//!     ..Default::default()
//! });
//! let wire = codec.encode(&ItemSet::numbers([1.0, 2.0, 3.0]).into()).unwrap();
//! assert_eq!(wire, AttributeValue::Ns(vec!["1".into(), "2".into(), "3".into()]));
//! ```

mod attribute;
mod codec;
mod decoder;
mod encoder;
mod error;
mod number;
mod options;
mod set;
mod value;

pub use attribute::{AttributeValue, TYPE_KEYS};
pub use codec::ItemCodec;
pub use decoder::ItemDecoder;
pub use encoder::ItemEncoder;
pub use error::ItemCodecError;
pub use number::{format_number, parse_number};
pub use options::ItemCodecOptions;
pub use set::{ItemSet, SetElement, SetKind};
pub use value::Value;
