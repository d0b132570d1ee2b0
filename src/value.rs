use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// A decoded query node, keyed by segment name.
pub type QueryObject = IndexMap<String, QueryValue>;

/// One value in a decoded query tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
    Nested(QueryObject),
}

impl QueryValue {
    pub const fn is_scalar(&self) -> bool {
        matches!(self, QueryValue::Scalar(_))
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, QueryValue::List(_))
    }

    pub const fn is_nested(&self) -> bool {
        matches!(self, QueryValue::Nested(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            QueryValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&QueryObject> {
        match self {
            QueryValue::Nested(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        match self {
            QueryValue::Nested(obj) => obj.get(key),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            QueryValue::Scalar(_) => "scalar",
            QueryValue::List(_) => "list",
            QueryValue::Nested(_) => "object",
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            QueryValue::Scalar(s) => Value::String(s.clone()),
            QueryValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            QueryValue::Nested(obj) => Value::Object(object_to_json(obj)),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Scalar(s) => write!(f, "\"{s}\""),
            QueryValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{item}\"")?;
                }
                write!(f, "]")
            }
            QueryValue::Nested(obj) => {
                write!(f, "{{")?;
                for (i, (k, v)) in obj.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Scalar(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Scalar(s)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(items: Vec<String>) -> Self {
        QueryValue::List(items)
    }
}

impl From<QueryObject> for QueryValue {
    fn from(obj: QueryObject) -> Self {
        QueryValue::Nested(obj)
    }
}

impl From<&QueryValue> for Value {
    fn from(value: &QueryValue) -> Self {
        value.to_json()
    }
}

impl TryFrom<&Value> for QueryValue {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(json_primitive_text)
                .collect::<Result<Vec<_>>>()
                .map(QueryValue::List),
            Value::Object(map) => object_from_json(map).map(QueryValue::Nested),
            other => json_primitive_text(other).map(QueryValue::Scalar),
        }
    }
}

pub fn object_to_json(obj: &QueryObject) -> Map<String, Value> {
    obj.iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect()
}

pub fn object_from_json(map: &Map<String, Value>) -> Result<QueryObject> {
    map.iter()
        .map(|(key, value)| Ok((key.clone(), QueryValue::try_from(value)?)))
        .collect()
}

fn json_primitive_text(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) => Err(Error::serialize(
            "nested arrays cannot be expressed in a query string",
        )),
        Value::Object(_) => Err(Error::serialize(
            "objects inside arrays cannot be expressed in a query string",
        )),
    }
}
