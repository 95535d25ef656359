//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies. JSON encoding of
//! stored values lives here, never in the cache core.

use serde::Deserialize;
use serde_json::{Map, Value};

/// JSON object payload stored under a key.
pub type ValType = Map<String, Value>;

/// Request body for the set operation (POST /api/v1/{key}/)
///
/// # Fields
/// - `val`: the JSON object to store
/// - `ttl`: TTL in seconds; zero or absent means the key never expires
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store
    pub val: ValType,
    /// TTL in seconds
    #[serde(default)]
    pub ttl: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"val": {"hello": "world"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.val["hello"], "world");
        assert_eq!(req.ttl, 0);
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"val": {"hello": "world"}, "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.ttl, 60);
    }

    #[test]
    fn test_set_request_missing_val_is_rejected() {
        let json = r#"{"ttl": 60}"#;

        assert!(serde_json::from_str::<SetRequest>(json).is_err());
    }

    #[test]
    fn test_set_request_negative_ttl_is_rejected() {
        let json = r#"{"val": {}, "ttl": -1}"#;

        assert!(serde_json::from_str::<SetRequest>(json).is_err());
    }

    #[test]
    fn test_set_request_non_object_val_is_rejected() {
        let json = r#"{"val": "scalar"}"#;

        assert!(serde_json::from_str::<SetRequest>(json).is_err());
    }
}
