//! Content-addressed job identifiers.
//!
//! An ID is the lowercase hex SHA-256 digest of the job's canonical JSON
//! encoding: object keys sorted recursively, compact output. Sorting keeps the
//! hash stable regardless of struct field order or map iteration order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::JobError;

/// Length of a hex-encoded SHA-256 digest.
pub const ID_LEN: usize = 64;

/// Which state feeds the hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdStrategy {
    /// Hash everything except the top-level `id` field. Repeated calls on an
    /// unchanged job produce the same ID.
    #[default]
    ExcludeId,
    /// Hash the job as-is, current `id` included. A second call on an
    /// unchanged job produces a different ID.
    SelfInclusive,
}

/// Compute the content ID of any serializable value.
pub fn content_id<T>(value: &T, strategy: IdStrategy) -> Result<String, JobError>
where
    T: Serialize + ?Sized,
{
    let bytes = canonical_bytes(value, strategy)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Whether `id` looks like a content ID (64 lowercase hex characters).
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn canonical_bytes<T>(value: &T, strategy: IdStrategy) -> Result<Vec<u8>, JobError>
where
    T: Serialize + ?Sized,
{
    let mut value = serde_json::to_value(value)
        .map_err(|e| JobError::Serialization(format!("Failed to encode job: {}", e)))?;

    if strategy == IdStrategy::ExcludeId {
        if let Value::Object(map) = &mut value {
            map.remove("id");
        }
    }

    serde_json::to_vec(&canonicalize(value))
        .map_err(|e| JobError::Serialization(format!("Failed to encode job: {}", e)))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::new();
            for (key, value) in entries {
                sorted.insert(key, canonicalize(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
