// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Role-specific profile records and the completeness check.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Role, UserId};

/// Athlete profile as returned by `/searchforathlete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AthleteProfile {
    #[serde(deserialize_with = "de_opt_user_id")]
    pub user_id: Option<UserId>,
    pub high_school_name: Option<String>,
    pub positions: Option<String>,
    pub youtube_video_link: Option<String>,
    pub profile_picture: Option<String>,
    /// Height in feet
    #[serde(deserialize_with = "de_opt_number")]
    pub height: Option<f64>,
    /// Weight in pounds
    #[serde(deserialize_with = "de_opt_number")]
    pub weight: Option<f64>,
    pub bio: Option<String>,
    pub state: Option<String>,
    pub throwing_arm: Option<String>,
    pub batting_arm: Option<String>,
}

/// Coach profile as returned by `/searchforcoach`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachProfile {
    #[serde(deserialize_with = "de_opt_user_id")]
    pub user_id: Option<UserId>,
    pub name: Option<String>,
    pub team_needs: Option<String>,
    pub school_name: Option<String>,
    /// Older backend builds call this field `position`
    #[serde(alias = "position")]
    pub position_within_org: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub division: Option<String>,
    pub state: Option<String>,
}

/// Scouts carry no attributes beyond their user id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutProfile {
    #[serde(deserialize_with = "de_opt_user_id")]
    pub user_id: Option<UserId>,
}

/// A profile of any role.
#[derive(Debug, Clone)]
pub enum Profile {
    Athlete(AthleteProfile),
    Coach(CoachProfile),
    Scout(ScoutProfile),
}

impl Profile {
    /// Decode one record returned by the role's lookup endpoint.
    pub fn from_record(role: Role, record: Value) -> serde_json::Result<Self> {
        Ok(match role {
            Role::Athlete => Profile::Athlete(serde_json::from_value(record)?),
            Role::Coach => Profile::Coach(serde_json::from_value(record)?),
            Role::Scout => Profile::Scout(serde_json::from_value(record)?),
        })
    }

    pub fn role(&self) -> Role {
        match self {
            Profile::Athlete(_) => Role::Athlete,
            Profile::Coach(_) => Role::Coach,
            Profile::Scout(_) => Role::Scout,
        }
    }

    pub fn profile_picture(&self) -> Option<&str> {
        match self {
            Profile::Athlete(p) => p.profile_picture.as_deref(),
            Profile::Coach(p) => p.profile_picture.as_deref(),
            Profile::Scout(_) => None,
        }
    }

    /// Labelled values for display, in screen order.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        match self {
            Profile::Athlete(p) => p.display_rows(),
            Profile::Coach(p) => p.display_rows(),
            Profile::Scout(_) => Vec::new(),
        }
    }
}

impl AthleteProfile {
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("High School", text(&self.high_school_name)),
            ("Positions", text(&self.positions)),
            ("Height", unit(self.height, "ft")),
            ("Weight", unit(self.weight, "lbs")),
            ("Bio", text_or_na(&self.bio)),
            ("State", text(&self.state)),
        ]
    }
}

impl CoachProfile {
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Team Needs", text(&self.team_needs)),
            ("School Name", text(&self.school_name)),
            ("Position", text(&self.position_within_org)),
            ("Bio", text_or_na(&self.bio)),
            ("State", text(&self.state)),
        ]
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn text_or_na(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

fn unit(value: Option<f64>, unit: &str) -> String {
    value.map(|v| format!("{v} {unit}")).unwrap_or_default()
}

/// First record of a profile lookup response.
///
/// Lookups normally return an array; a bare object is treated as a
/// one-element array.
pub fn first_record(response: &Value) -> Option<&Value> {
    match response {
        Value::Array(records) => records.first(),
        Value::Object(_) => Some(response),
        _ => None,
    }
}

/// Whether a profile lookup response counts as a completed profile.
///
/// Complete iff the first record has at least one field other than
/// `user_id` that is neither null nor the empty string. A single stray
/// default value is enough to pass.
pub fn is_profile_complete(response: &Value) -> bool {
    let Some(Value::Object(fields)) = first_record(response) else {
        return false;
    };
    fields.iter().any(|(name, value)| {
        name != "user_id" && !matches!(value, Value::Null) && value.as_str() != Some("")
    })
}

fn de_opt_user_id<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "crate::models::user::de_user_id")] UserId);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(id)| id))
}

/// Numbers may arrive as JSON numbers or as decimal strings. Anything else,
/// such as free text like `6'1"`, decodes as `None`.
fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Number(n)) => Some(n),
        Some(RawNumber::Text(s)) => s.trim().parse().ok(),
        Some(RawNumber::Other(_)) | None => None,
    })
}
