//! Canonical types returned by the backend client.
//!
//! Wire shapes differ between backend versions (`userId` vs `user_id`, bare
//! integers vs objects); everything is normalized to these types at the
//! client boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Sentinel stored locally while no id has been assigned
    pub const UNASSIGNED: i64 = -1;

    /// `None` for the unassigned sentinel
    pub fn from_raw(raw: i64) -> Option<Self> {
        (raw != Self::UNASSIGNED).then_some(Self(raw))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token issued by the platform notification service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    /// `None` for an empty token
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty()).then_some(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PushToken {
    // Tokens address a device; keep them out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(6).collect();
        write!(f, "PushToken({}…)", visible)
    }
}

/// Result of a create-or-update call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRecord {
    /// Absent when the backend acknowledges without returning an id
    pub user_id: Option<UserId>,
}

/// Rainfall estimate attached to a cloud classification.
///
/// Some backend versions return a probability, others a qualitative label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rainfall {
    Probability(f64),
    Label(String),
}

impl fmt::Display for Rainfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rainfall::Probability(p) => write!(f, "{}", p),
            Rainfall::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub class: String,
    pub rainfall: Rainfall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherFact {
    pub fact: String,
}

/// Generated illustration for a weather fact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherImage {
    /// Decoded PNG bytes
    pub bytes: Vec<u8>,
    /// Text the generator returned alongside the image
    pub caption: Option<String>,
}

// Wire shapes, private to the crate.

#[derive(Debug, Serialize)]
pub(crate) struct UpsertUserRequest<'a> {
    pub username: &'a str,
    pub city: &'a str,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UserIdPayload {
    Bare(i64),
    Object {
        #[serde(rename = "userId", alias = "user_id", default)]
        user_id: Option<i64>,
    },
}

impl UserIdPayload {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            UserIdPayload::Bare(raw) => UserId::from_raw(*raw),
            UserIdPayload::Object { user_id } => user_id.and_then(UserId::from_raw),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterTokenRequest<'a> {
    pub user_id: UserId,
    pub token: &'a str,
    pub platform: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveTokenRequest {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageResponse {
    #[serde(rename = "imageBase64", default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_sentinel() {
        assert_eq!(UserId::from_raw(-1), None);
        assert_eq!(UserId::from_raw(7), Some(UserId(7)));
    }

    #[test]
    fn test_user_id_payload_variants() {
        let camel: UserIdPayload = serde_json::from_str(r#"{"userId": 4}"#).unwrap();
        let snake: UserIdPayload = serde_json::from_str(r#"{"user_id": 4}"#).unwrap();
        let bare: UserIdPayload = serde_json::from_str("4").unwrap();
        let ack: UserIdPayload =
            serde_json::from_str(r#"{"message": "User added successfully."}"#).unwrap();

        assert_eq!(camel.user_id(), Some(UserId(4)));
        assert_eq!(snake.user_id(), Some(UserId(4)));
        assert_eq!(bare.user_id(), Some(UserId(4)));
        assert_eq!(ack.user_id(), None);
    }

    #[test]
    fn test_upsert_request_omits_unassigned_id() {
        let req = UpsertUserRequest {
            username: "alice",
            city: "Paris",
            user_id: None,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"username":"alice","city":"Paris"}"#
        );

        let req = UpsertUserRequest {
            user_id: Some(UserId(3)),
            ..req
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"username":"alice","city":"Paris","userId":3}"#
        );
    }

    #[test]
    fn test_rainfall_number_or_label() {
        let numeric: ClassificationResult =
            serde_json::from_str(r#"{"class": "Cumulus", "rainfall": 0.62}"#).unwrap();
        let label: ClassificationResult =
            serde_json::from_str(r#"{"class": "cumulonimbus", "rainfall": "Very High"}"#).unwrap();

        assert_eq!(numeric.rainfall.to_string(), "0.62");
        assert_eq!(label.rainfall.to_string(), "Very High");
    }

    #[test]
    fn test_push_token_rejects_empty() {
        assert!(PushToken::new("").is_none());
        assert!(PushToken::new("  ").is_none());
        assert_eq!(
            PushToken::new("ExponentPushToken[xyz]").unwrap().as_str(),
            "ExponentPushToken[xyz]"
        );
    }

    #[test]
    fn test_push_token_debug_is_redacted() {
        let token = PushToken::new("ExponentPushToken[secret]").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret"));
    }
}
