// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User roles and the role endpoints' payloads.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UserId;

/// Marketplace role. Assigned once per user after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Athlete,
    Coach,
    Scout,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Athlete, Role::Coach, Role::Scout];

    /// Wire name, as stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Athlete => "Athlete",
            Role::Coach => "Coach",
            Role::Scout => "Scout",
        }
    }

    /// Lowercase form used in endpoint paths (`/searchforcoach`, `/coach/createprofile`).
    pub fn slug(&self) -> &'static str {
        match self {
            Role::Athlete => "athlete",
            Role::Coach => "coach",
            Role::Scout => "scout",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a role name, ignoring case (for user input).
impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown role: {0:?} (expected Athlete, Coach or Scout)")]
pub struct UnknownRole(pub String);

/// Response from `GET /fetchrole?user_id=`.
#[derive(Debug, Deserialize)]
pub struct RoleResponse {
    /// `None` when the user has not picked a role yet
    #[serde(default, deserialize_with = "de_optional_role")]
    pub role: Option<Role>,
}

/// Body for `POST /assignrole`.
#[derive(Debug, Serialize)]
pub struct AssignRoleRequest {
    pub user_id: UserId,
    pub role_name: Role,
}

/// `null`, missing and `""` all mean "no role"; anything else must be an exact role name.
fn de_optional_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(name) => Role::ALL
            .into_iter()
            .find(|role| role.as_str() == name)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(UnknownRole(name.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_response_variants() {
        let resp: RoleResponse = serde_json::from_str(r#"{"role": "Coach"}"#).unwrap();
        assert_eq!(resp.role, Some(Role::Coach));

        for body in [r#"{"role": null}"#, r#"{"role": ""}"#, "{}"] {
            let resp: RoleResponse = serde_json::from_str(body).unwrap();
            assert_eq!(resp.role, None, "body: {body}");
        }
    }

    #[test]
    fn test_role_response_rejects_unknown_role() {
        assert!(serde_json::from_str::<RoleResponse>(r#"{"role": "Referee"}"#).is_err());
        // Wire names are case-sensitive
        assert!(serde_json::from_str::<RoleResponse>(r#"{"role": "coach"}"#).is_err());
    }

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!("scout".parse::<Role>().unwrap(), Role::Scout);
        assert_eq!(" ATHLETE ".parse::<Role>().unwrap(), Role::Athlete);
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_assign_role_body() {
        let body = serde_json::to_value(AssignRoleRequest {
            user_id: 42,
            role_name: Role::Scout,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"user_id": 42, "role_name": "Scout"}));
    }
}
