//! Decoding of model responses.
//!
//! Models are asked for strict JSON arrays but often wrap them in a Markdown
//! code fence. These functions are pure: no I/O, no logging.
//!
//! | Function | Use | Item failures |
//! |----------|-----|---------------|
//! | [`decode_json_list`] | news, questions | fail the whole list |
//! | [`decode_opinions`] | verifier answers | skipped |

use crate::verification::opinion::{Opinion, OpinionSet};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Why a model response could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response is JSON but not a list")]
    NotAList,

    #[error("list item {index} has the wrong shape: {message}")]
    InvalidItem { index: usize, message: String },
}

/// Strip surrounding whitespace and a single Markdown code fence.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn decode_array(raw: &str) -> Result<Vec<Value>, DecodeError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(DecodeError::NotAList),
    }
}

/// Decode a JSON array whose every element must be a valid `T`.
pub fn decode_json_list<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, DecodeError> {
    decode_array(raw)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| DecodeError::InvalidItem {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Decode verifier opinions, skipping elements that are not opinions.
///
/// Returns the opinions together with the number of skipped elements.
pub fn decode_opinions(raw: &str) -> Result<(OpinionSet, usize), DecodeError> {
    let items = decode_array(raw)?;
    let total = items.len();
    let opinions: Vec<Opinion> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    let skipped = total - opinions.len();
    Ok((OpinionSet::new(opinions), skipped))
}
