use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Result, StorageError};

/// One attribute-typed value as the key-value store represents it: every
/// scalar and container is wrapped in a single-key map naming its type
/// (`{"S": ...}`, `{"N": "12"}`, `{"M": {...}}`, ...). Numbers travel as
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "M")]
    M(BTreeMap<String, AttrValue>),
    #[serde(rename = "L")]
    L(Vec<AttrValue>),
    #[serde(rename = "NULL")]
    Null(bool),
}

/// A whole record as stored: attribute name to attribute-typed value.
pub type AttrItem = BTreeMap<String, AttrValue>;

/// Unwraps the attribute typing into a plain JSON value.
pub fn to_json(value: &AttrValue) -> Result<Value> {
    match value {
        AttrValue::S(s) => Ok(Value::String(s.clone())),
        AttrValue::N(n) => parse_number(n),
        AttrValue::Bool(b) => Ok(Value::Bool(*b)),
        AttrValue::Null(_) => Ok(Value::Null),
        AttrValue::L(items) => Ok(Value::Array(
            items.iter().map(to_json).collect::<Result<_>>()?,
        )),
        AttrValue::M(map) => {
            let mut object = Map::new();
            for (key, nested) in map {
                object.insert(key.clone(), to_json(nested)?);
            }
            Ok(Value::Object(object))
        }
    }
}

/// Wraps a plain JSON value back into attribute typing.
pub fn from_json(value: &Value) -> Result<AttrValue> {
    match value {
        Value::String(s) => Ok(AttrValue::S(s.clone())),
        Value::Number(n) => Ok(AttrValue::N(n.to_string())),
        Value::Bool(b) => Ok(AttrValue::Bool(*b)),
        Value::Null => Ok(AttrValue::Null(true)),
        Value::Array(items) => Ok(AttrValue::L(
            items.iter().map(from_json).collect::<Result<_>>()?,
        )),
        Value::Object(map) => {
            let mut nested = BTreeMap::new();
            for (key, item) in map {
                nested.insert(key.clone(), from_json(item)?);
            }
            Ok(AttrValue::M(nested))
        }
    }
}

/// Decodes a stored item into a typed record. Attributes the record does not
/// model (such as the redundant key attribute) are ignored.
pub fn decode_item<T: DeserializeOwned>(item: &AttrItem) -> Result<T> {
    let mut object = Map::new();
    for (key, value) in item {
        object.insert(key.clone(), to_json(value)?);
    }
    Ok(serde_json::from_value(Value::Object(object))?)
}

/// Encodes a typed record into a stored item.
pub fn encode_item<T: Serialize>(record: &T) -> Result<AttrItem> {
    match serde_json::to_value(record)? {
        Value::Object(map) => {
            let mut item = BTreeMap::new();
            for (key, value) in &map {
                item.insert(key.clone(), from_json(value)?);
            }
            Ok(item)
        }
        other => Err(StorageError::Malformed(format!(
            "expected a record, got {other}"
        ))),
    }
}

fn parse_number(raw: &str) -> Result<Value> {
    if let Ok(int) = raw.parse::<i64>() {
        return Ok(Value::Number(Number::from(int)));
    }
    let float = raw
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StorageError::Malformed(format!("invalid number attribute: {raw}")))?;
    Ok(Value::Number(float))
}
