//! Document model
//!
//! `Document` is the strict form produced by the generator. `RawDocument`
//! is what the reader hands to the comparator: any JSON object, so that
//! missing keys can be reported per record instead of failing the decode.

use crate::errors::{Result, StampError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Top-level document: `{ "output": [Record] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub output: Vec<Record>,
}

/// One timestamped record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// `YY-MM-DDTHH:MM:SSZ`
    pub timestamp: String,
    pub message: Message,
}

/// Data point report carried by a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub level: String,
    pub s: String,
    pub m: String,
    pub pn: String,
    pub lid: String,
    pub pst: String,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Number of entries in `dp`
    pub c: usize,
    /// Entries keyed `IDT_01`, `IDT_02`, ...
    pub dp: BTreeMap<String, Entry>,
}

/// One data point (IDT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub rid: String,
    pub v: f64,
    pub ts: String,
}

/// Key of the `index`-th entry (1-based)
pub fn entry_key(index: usize) -> String {
    format!("IDT_{:02}", index)
}

/// A document as read from disk, only known to be a JSON object
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument(Map<String, Value>);

impl RawDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(StampError::InvalidDocument {
                reason: format!("top level must be a JSON object, found {}", json_type(&other)),
            }),
        }
    }

    /// Convert a generated document without touching disk
    pub fn from_document(document: &Document) -> Result<Self> {
        Self::from_value(serde_json::to_value(document)?)
    }

    /// Strict decode into the generated shape
    pub fn to_document(&self) -> Result<Document> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Short name of a JSON value's type, for error messages
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Document {
        let mut dp = BTreeMap::new();
        dp.insert(
            entry_key(1),
            Entry {
                rid: "16675;PT=0".to_string(),
                v: 25.0,
                ts: "23-01-05T09:30:00Z".to_string(),
            },
        );
        Document {
            output: vec![Record {
                timestamp: "23-01-05T09:00:00Z".to_string(),
                message: Message {
                    level: "info".to_string(),
                    s: "wideco/svinbound".to_string(),
                    m: "ImportDataPointReport".to_string(),
                    pn: "wideco".to_string(),
                    lid: "Lejonfastigheter Djurgardsgatan 17".to_string(),
                    pst: "provisioned".to_string(),
                    body: Body { c: 1, dp },
                },
            }],
        }
    }

    #[test]
    fn test_entry_key_is_zero_padded() {
        assert_eq!(entry_key(1), "IDT_01");
        assert_eq!(entry_key(5), "IDT_05");
        assert_eq!(entry_key(12), "IDT_12");
    }

    #[test]
    fn test_serialized_field_order() {
        let json = serde_json::to_string(&sample_document()).unwrap();

        let ts = json.find("\"timestamp\"").unwrap();
        let msg = json.find("\"message\"").unwrap();
        let level = json.find("\"level\"").unwrap();
        let body = json.find("\"body\"").unwrap();
        let c = json.find("\"c\"").unwrap();
        let dp = json.find("\"dp\"").unwrap();
        assert!(ts < msg && msg < level && level < body && body < c && c < dp);
        assert!(json.contains("\"v\":25.0"));
    }

    #[test]
    fn test_raw_document_converts_back() {
        let document = sample_document();
        let raw = RawDocument::from_document(&document).unwrap();

        assert!(raw.get("output").unwrap().is_array());
        assert_eq!(raw.to_document().unwrap(), document);
    }

    #[test]
    fn test_raw_document_rejects_non_object() {
        let err = RawDocument::from_value(json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            StampError::InvalidDocument {
                reason: "top level must be a JSON object, found array".to_string()
            }
        );
    }

    #[test]
    fn test_raw_document_allows_missing_keys() {
        let raw = RawDocument::from_value(json!({"output": [{"timestamp": "x"}]})).unwrap();
        assert!(raw.to_document().is_err());
        assert_eq!(raw.as_map().len(), 1);
    }
}
