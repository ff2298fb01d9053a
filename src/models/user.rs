//! User identifiers, authentication payloads and token claims.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Backend user identifier, used in every call after login.
pub type UserId = u64;

/// Body for `POST /register`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body for `POST /login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response from `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Bearer token; absent on some failure paths even with a 2xx status
    #[serde(default)]
    pub jwt: Option<String>,
}

/// Response from `GET /fetch-email/{user_id}/`.
#[derive(Debug, Deserialize)]
pub struct EmailResponse {
    pub email: String,
}

/// Claims the client reads out of the bearer token.
///
/// The token is never verified client-side; only `id` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(deserialize_with = "de_user_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Accept ids encoded either as JSON numbers or numeric strings.
pub(crate) fn de_user_id<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(UserId),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid user id: {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_accept_numeric_and_string_ids() {
        let claims: TokenClaims = serde_json::from_str(r#"{"id": 42, "exp": 1700000000}"#).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.exp, Some(1700000000));

        let claims: TokenClaims = serde_json::from_str(r#"{"id": "7", "name": "Sam"}"#).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.name.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_claims_reject_missing_id() {
        assert!(serde_json::from_str::<TokenClaims>(r#"{"name": "Sam"}"#).is_err());
        assert!(serde_json::from_str::<TokenClaims>(r#"{"id": "abc"}"#).is_err());
    }

    #[test]
    fn test_register_request_requires_every_field() {
        let req = RegisterRequest {
            name: "Sam".into(),
            email: String::new(),
            password: "x".into(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn test_login_response_without_token() {
        let resp: LoginResponse = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert!(resp.jwt.is_none());
    }
}
