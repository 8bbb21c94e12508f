//! Response envelope wrapped around localized payloads.

use crate::i18n::Language;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, language: Language) -> Self {
        Self {
            success: true,
            data: Some(data),
            language,
            message: None,
            timestamp: now(),
        }
    }

    pub fn failure(message: impl Into<String>, language: Language) -> Self {
        Self {
            success: false,
            data: None,
            language,
            message: Some(message.into()),
            timestamp: now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_serialization() {
        let response = ApiResponse::ok(json!({"name": "कोशी"}), Language::Ne);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"], json!({"name": "कोशी"}));
        assert_eq!(value["language"], json!("ne"));
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_failure_serialization() {
        let response: ApiResponse<serde_json::Value> =
            ApiResponse::failure("Internal server error", Language::En);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["data"], json!(null));
        assert_eq!(value["message"], json!("Internal server error"));
    }

    #[test]
    fn test_timestamp_is_rfc3339_utc() {
        let response = ApiResponse::ok(1, Language::En);
        assert!(response.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&response.timestamp).is_ok());
    }

    #[test]
    fn test_with_message() {
        let response = ApiResponse::ok(1, Language::En).with_message("2 pairs merged");
        assert_eq!(response.message.as_deref(), Some("2 pairs merged"));
    }
}
