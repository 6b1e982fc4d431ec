//! Small helpers for pulling the configured text field out of a JSONL
//! record and annotating it with results, without introducing a
//! document-shaped struct of our own (the record's JSON shape is whatever
//! the caller's corpus already uses; this crate just reads/writes a few
//! named fields in it).

use anyhow::{anyhow, Result};
use serde_json::Value;

/// Borrow the configured text field from `record` as a `&str`.
pub fn extract_text<'a>(record: &'a Value, text_key: &str) -> Result<&'a str> {
    record
        .get(text_key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("missing or non-string field \"{text_key}\""))
}

pub fn set_field(record: &mut Value, key: &str, value: Value) {
    if let Some(obj) = record.as_object_mut() {
        obj.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_present() {
        let record = serde_json::json!({"text": "hello"});
        assert_eq!(extract_text(&record, "text").unwrap(), "hello");
    }

    #[test]
    fn test_extract_text_missing() {
        let record = serde_json::json!({"other": "hello"});
        assert!(extract_text(&record, "text").is_err());
    }

    #[test]
    fn test_set_field() {
        let mut record = serde_json::json!({"text": "hi"});
        set_field(&mut record, "duplicate", Value::Bool(true));
        assert_eq!(record["duplicate"], true);
    }
}
