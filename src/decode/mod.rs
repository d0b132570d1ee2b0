pub mod key;

use memchr::memchr;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::constants::{KEY_VALUE_SEPARATOR, LIST_SEPARATOR, PAIR_SEPARATOR, QUERY_PREFIX};
use crate::text::percent::decode_fragment;
use crate::value::object_to_json;
use crate::{DecodeOptions, Error, QueryObject, QueryValue, Result};

pub use key::{decode_key_string, KeyPath};

pub fn decode(query: &str, options: &DecodeOptions) -> Result<QueryObject> {
    Decoder::new(options).decode_query(query)
}

pub fn from_str<T: DeserializeOwned>(query: &str, options: &DecodeOptions) -> Result<T> {
    let value = to_value(query, options)?;
    serde_json::from_value(value)
        .map_err(|err| Error::deserialize(format!("deserialize failed: {err}")))
}

pub fn to_value(query: &str, options: &DecodeOptions) -> Result<Value> {
    let object = decode(query, options)?;
    Ok(Value::Object(object_to_json(&object)))
}

struct Decoder {
    always_arrays: bool,
}

impl Decoder {
    fn new(options: &DecodeOptions) -> Self {
        Self {
            always_arrays: options.always_arrays,
        }
    }

    fn decode_query(&self, query: &str) -> Result<QueryObject> {
        let mut root = QueryObject::new();
        if query.is_empty() {
            return Ok(root);
        }
        let pairs = query
            .strip_prefix(QUERY_PREFIX)
            .ok_or_else(Error::invalid_query_string)?;

        let mut count = 0usize;
        for pair in pairs.split(PAIR_SEPARATOR) {
            self.decode_pair(&mut root, pair)?;
            count += 1;
        }
        tracing::debug!(pairs = count, keys = root.len(), "decoded query string");
        Ok(root)
    }

    fn decode_pair(&self, root: &mut QueryObject, pair: &str) -> Result<()> {
        let bytes = pair.as_bytes();
        let separator = memchr(KEY_VALUE_SEPARATOR, bytes);
        if let Some(idx) = separator {
            if memchr(KEY_VALUE_SEPARATOR, &bytes[idx + 1..]).is_some() {
                return Err(Error::invalid_key_value_string(pair));
            }
        }
        let key = separator.map_or(pair, |idx| &pair[..idx]);

        // Without any '=' the whole pair is the key, and bracket errors win.
        let mut path = decode_key_string(key)?;
        let Some(idx) = separator else {
            return Err(Error::invalid_key_value_string(pair));
        };
        let raw_value = &pair[idx + 1..];

        let leaf = path.pop().ok_or_else(|| Error::invalid_key_string(key))?;
        let value = self.decode_value(raw_value)?;
        tracing::trace!(key, depth = path.len(), kind = value.type_name(), "decoded pair");

        insert_path(root, path.into_iter(), leaf, value);
        Ok(())
    }

    fn decode_value(&self, raw: &str) -> Result<QueryValue> {
        if !self.always_arrays && !raw.contains(LIST_SEPARATOR) {
            return decode_fragment(raw).map(QueryValue::Scalar);
        }
        raw.split(LIST_SEPARATOR)
            .map(decode_fragment)
            .collect::<Result<Vec<_>>>()
            .map(QueryValue::List)
    }
}

/// Descend along `parents`, creating objects where missing and replacing any
/// non-object in the way, then store `value` under `leaf`.
fn insert_path<I>(node: &mut QueryObject, mut parents: I, leaf: String, value: QueryValue)
where
    I: Iterator<Item = String>,
{
    let Some(head) = parents.next() else {
        node.insert(leaf, value);
        return;
    };
    let slot = node
        .entry(head)
        .or_insert_with(|| QueryValue::Nested(QueryObject::new()));
    if let QueryValue::Nested(child) = &mut *slot {
        insert_path(child, parents, leaf, value);
        return;
    }
    let mut child = QueryObject::new();
    insert_path(&mut child, parents, leaf, value);
    *slot = QueryValue::Nested(child);
}
