mod writer;

use serde::Serialize;
use serde_json::Value;

use crate::value::object_from_json;
use crate::{Error, QueryObject, QueryValue, Result};

/// Encode a query tree back into a `?`-prefixed query string.
///
/// Keys are written verbatim and values percent-encoded, mirroring
/// [`decode`](crate::decode). An empty object encodes to `""` and empty
/// nested objects emit nothing.
///
/// # Examples
/// ```
/// use bracket_qs::{decode, encode};
///
/// let object = decode("?user[name]=Ada&tags=a,b")?;
/// assert_eq!(encode(&object)?, "?user[name]=Ada&tags=a,b");
/// # Ok::<(), bracket_qs::Error>(())
/// ```
pub fn encode(object: &QueryObject) -> Result<String> {
    let mut writer = writer::Writer::new();
    let mut path = Vec::new();
    write_object(&mut writer, &mut path, object)?;
    tracing::debug!(pairs = writer.pairs(), "encoded query object");
    Ok(writer.finish())
}

pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_value(value)
        .map_err(|err| Error::serialize(format!("serialize failed: {err}")))?;
    let Value::Object(map) = json else {
        return Err(Error::serialize(
            "only maps and structs can be encoded as a query string",
        ));
    };
    encode(&object_from_json(&map)?)
}

fn write_object<'a>(
    writer: &mut writer::Writer,
    path: &mut Vec<&'a str>,
    object: &'a QueryObject,
) -> Result<()> {
    for (key, value) in object {
        path.push(key);
        match value {
            QueryValue::Scalar(s) => writer.write_pair(path, std::slice::from_ref(s))?,
            QueryValue::List(items) => writer.write_pair(path, items)?,
            QueryValue::Nested(child) => write_object(writer, path, child)?,
        }
        path.pop();
    }
    Ok(())
}
