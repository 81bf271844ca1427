//! Shape validation for the cache document
//!
//! A document is accepted only as a whole: one bad record rejects all of it.

use crate::error::{Result, StorageError};
use flac_core::{Catalog, Track};
use serde_json::{Map, Value};
use std::collections::HashSet;

const REQUIRED_FIELDS: [&str; 4] = ["id", "path", "title", "artist"];

/// Parse and validate cache text into a catalog
pub fn parse_catalog(text: &str) -> Result<Catalog> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| StorageError::invalid(format!("malformed JSON: {e}")))?;
    validate_catalog(value)
}

/// Validate an already parsed document
pub fn validate_catalog(value: Value) -> Result<Catalog> {
    let Value::Array(records) = value else {
        return Err(StorageError::invalid("document is not a list of tracks"));
    };

    let mut paths = HashSet::new();
    let mut ids = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            return Err(StorageError::invalid(format!("record {index} is not an object")));
        };
        validate_record(index, fields)?;

        // validate_record guarantees these are strings
        let path = fields["path"].as_str().unwrap_or_default();
        let id = fields["id"].as_str().unwrap_or_default();
        if !paths.insert(path.to_string()) {
            return Err(StorageError::invalid(format!(
                "record {index} repeats path {path}"
            )));
        }
        if !ids.insert(id.to_string()) {
            return Err(StorageError::invalid(format!("record {index} repeats id {id}")));
        }
    }

    let tracks: Vec<Track> = serde_json::from_value(Value::Array(records))
        .map_err(|e| StorageError::invalid(e.to_string()))?;
    Ok(tracks.into_iter().collect())
}

fn validate_record(index: usize, fields: &Map<String, Value>) -> Result<()> {
    for name in REQUIRED_FIELDS {
        match fields.get(name) {
            Some(Value::String(s)) if !s.is_empty() => {}
            Some(Value::String(_)) => {
                return Err(StorageError::invalid(format!("record {index}: empty `{name}`")));
            }
            Some(_) => {
                return Err(StorageError::invalid(format!(
                    "record {index}: `{name}` is not a string"
                )));
            }
            None => {
                return Err(StorageError::invalid(format!("record {index}: missing `{name}`")));
            }
        }
    }

    match fields.get("album") {
        None | Some(Value::String(_)) => {}
        Some(_) => {
            return Err(StorageError::invalid(format!(
                "record {index}: `album` is not a string"
            )));
        }
    }

    match fields.get("duration") {
        None => {}
        Some(Value::Number(n)) if n.as_f64().is_some_and(|d| d >= 0.0) => {}
        Some(_) => {
            return Err(StorageError::invalid(format!(
                "record {index}: `duration` is not a non-negative number"
            )));
        }
    }

    match fields.get("cover") {
        None | Some(Value::Null | Value::String(_)) => Ok(()),
        Some(_) => Err(StorageError::invalid(format!(
            "record {index}: `cover` is not a string"
        ))),
    }
}
