//! Ordered key-path descent through JSON documents.

use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Resolve `path` against `value`, key by key, in order.
///
/// Descent stops at the first segment that cannot be resolved, which is
/// reported as [`ClientError::KeyNotFound`] naming that segment. Indexing a
/// non-object (scalar, array, null) is a lookup failure too, not a type
/// error: for `{"a": 1}` and path `["a", "b"]` the error names `"b"`.
///
/// `path` is expected to be non-empty; an empty path returns `value` itself.
pub fn access_nested<'a>(value: &'a Value, path: &[&str]) -> ClientResult<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.get(key).ok_or_else(|| ClientError::KeyNotFound {
            key: (*key).to_string(),
        })?;
    }
    Ok(current)
}
