//! Request DTOs for the proxy API
//!
//! Defines the query parameters accepted by inbound requests.

use serde::Deserialize;

/// Query string of the lookup endpoint (`GET /GET?key=<key>`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetParams {
    /// The key to look up
    #[serde(default)]
    pub key: Option<String>,
}

impl GetParams {
    /// Returns the requested key, or an error message when it is missing or
    /// empty.
    pub fn key(&self) -> Result<&str, String> {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err("Url param 'key' is missing".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_params_deserialize() {
        let params: GetParams = serde_json::from_str(r#"{"key": "a"}"#).unwrap();
        assert_eq!(params.key(), Ok("a"));
    }

    #[test]
    fn test_missing_key() {
        let params: GetParams = serde_json::from_str("{}").unwrap();
        assert!(params.key().is_err());
    }

    #[test]
    fn test_empty_key() {
        let params = GetParams {
            key: Some(String::new()),
        };
        assert!(params.key().is_err());
    }
}
