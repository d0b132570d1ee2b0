//! Decode URL query strings with bracket-nested keys and comma-separated
//! lists into a tree, and encode such trees back.
//!
//! ```
//! use bracket_qs::{decode, QueryValue};
//!
//! let object = decode("?a[b][c]=1&tags=x,y")?;
//! let c = object["a"].get("b").and_then(|b| b.get("c"));
//! assert_eq!(c, Some(&QueryValue::from("1")));
//! assert_eq!(
//!     object["tags"],
//!     QueryValue::List(vec!["x".to_string(), "y".to_string()])
//! );
//! # Ok::<(), bracket_qs::Error>(())
//! ```
pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod text;
pub mod value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use crate::decode::{decode_key_string, KeyPath};
pub use crate::encode::encode;
pub use crate::error::{Error, ErrorKind, ErrorStage};
pub use crate::options::DecodeOptions;
pub use crate::value::{QueryObject, QueryValue};

pub type Result<T> = std::result::Result<T, Error>;

pub fn decode(query: &str) -> Result<QueryObject> {
    decode_with_options(query, &DecodeOptions::default())
}

pub fn decode_with_options(query: &str, options: &DecodeOptions) -> Result<QueryObject> {
    decode::decode(query, options)
}

pub fn decode_to_value(query: &str) -> Result<Value> {
    decode_to_value_with_options(query, &DecodeOptions::default())
}

pub fn decode_to_value_with_options(query: &str, options: &DecodeOptions) -> Result<Value> {
    decode::to_value(query, options)
}

pub fn from_str<T: DeserializeOwned>(query: &str) -> Result<T> {
    from_str_with_options(query, &DecodeOptions::default())
}

pub fn from_str_with_options<T: DeserializeOwned>(
    query: &str,
    options: &DecodeOptions,
) -> Result<T> {
    decode::from_str(query, options)
}

pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    encode::to_string(value)
}
