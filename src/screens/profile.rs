// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile creation, editing and display for all three roles.

use std::path::Path;

use serde_json::Value;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{first_record, Profile, Role, UserId};
use crate::schema::{profile_schema, FormInput};
use crate::AppState;

use super::Route;

/// Shown when a profile has no picture.
const PLACEHOLDER_PICTURE: &str = "👤";

/// Submit a new profile for `role`.
///
/// Required fields are checked first; nothing is sent when any is missing.
/// Athletes and coaches are sent as multipart (with the picture at
/// `profile_picture`, if set); scouts as a JSON body holding only their id.
pub async fn create_profile(state: &AppState, role: Role, form: &FormInput) -> Result<Route> {
    let schema = profile_schema(role);
    schema.validate(form)?;
    let user_id = state.session.user_id()?;

    let created = match role {
        Role::Scout => {
            state.api.create_scout_profile(user_id).await?;
            Value::Null
        }
        Role::Athlete => {
            let picture = form.non_empty("profile_picture").map(Path::new);
            state
                .api
                .create_athlete_profile(user_id, schema.multipart_fields(form), picture)
                .await?
        }
        Role::Coach => {
            let picture = form.non_empty("profile_picture").map(Path::new);
            state
                .api
                .create_coach_profile(user_id, schema.multipart_fields(form), picture)
                .await?
        }
    };

    if let Some(path) = created.get("profile_picture").and_then(Value::as_str) {
        tracing::debug!(url = %media_url(&state.config, path), "Uploaded profile picture");
    }
    Ok(Route::Profile)
}

/// Current values of the user's profile, for prefilling the edit form.
///
/// A user without a profile record gets an empty form.
pub async fn load_edit_form(state: &AppState, role: Role) -> Result<FormInput> {
    let user_id = state.session.user_id()?;
    let records = state.api.fetch_profile_records(role, user_id).await?;
    Ok(first_record(&records)
        .map(|record| profile_schema(role).input_from_record(record))
        .unwrap_or_default())
}

/// Save edits as a partial update. Blank fields are sent as `null`.
pub async fn save_profile_edits(state: &AppState, role: Role, form: &FormInput) -> Result<Route> {
    let user_id = state.session.user_id()?;
    let body = profile_schema(role).json_body(form);

    match role {
        Role::Athlete => state.api.edit_athlete_profile(user_id, &body).await?,
        Role::Coach => state.api.edit_coach_profile(user_id, &body).await?,
        // Nothing editable
        Role::Scout => {}
    }
    Ok(Route::Profile)
}

/// Replace the profile picture with a local image.
pub async fn replace_picture(state: &AppState, role: Role, picture: &Path) -> Result<Route> {
    let user_id = state.session.user_id()?;
    match role {
        Role::Athlete => state.api.replace_athlete_picture(user_id, picture).await?,
        Role::Coach => state.api.replace_coach_picture(user_id, picture).await?,
        Role::Scout => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "scout profiles have no picture"
            )))
        }
    };
    Ok(Route::Profile)
}

/// How to render the profile picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Picture {
    Url(String),
    /// Text shown in place of an image
    Placeholder(String),
}

/// Everything the profile screen renders.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub role: Role,
    pub picture: Picture,
    pub rows: Vec<(&'static str, String)>,
    /// Where "Edit Profile" leads, if the role has anything to edit
    pub edit_route: Option<Route>,
}

/// Load the logged-in user's profile.
///
/// `None` when the user has no role or no profile record yet; the screen
/// then shows "Failed to load profile data."
pub async fn view_profile(state: &AppState) -> Result<Option<ProfileView>> {
    let user_id = state.session.user_id()?;
    let Some(role) = state.api.fetch_role(user_id).await? else {
        return Ok(None);
    };

    let records = state.api.fetch_profile_records(role, user_id).await?;
    let Some(record) = first_record(&records) else {
        return Ok(None);
    };
    let profile = Profile::from_record(role, record.clone())
        .map_err(|e| AppError::Decode(format!("{role} profile: {e}")))?;

    Ok(Some(ProfileView {
        role,
        picture: resolve_picture(&state.config, profile.profile_picture()),
        rows: profile.display_rows(),
        edit_route: (role != Role::Scout).then_some(Route::EditProfile(role)),
    }))
}

/// Reveal another user's contact email. Requires a live session.
pub async fn reveal_contact_email(state: &AppState, user_id: UserId) -> Result<String> {
    state.session.current()?;
    state.api.fetch_email(user_id).await
}

/// Absolute URLs are used as-is, server paths are resolved against the media
/// host, and anything else is shown as text.
pub fn resolve_picture(config: &Config, picture: Option<&str>) -> Picture {
    match picture.map(str::trim) {
        Some(p) if p.starts_with("http") => Picture::Url(p.to_string()),
        Some(p) if p.starts_with('/') => Picture::Url(media_url(config, p)),
        Some(p) if !p.is_empty() => Picture::Placeholder(p.to_string()),
        _ => Picture::Placeholder(PLACEHOLDER_PICTURE.to_string()),
    }
}

fn media_url(config: &Config, path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{}{}", config.media_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_picture() {
        let config = Config::default();
        assert_eq!(
            resolve_picture(&config, Some("https://cdn.example.com/a.png")),
            Picture::Url("https://cdn.example.com/a.png".into())
        );
        assert_eq!(
            resolve_picture(&config, Some("/media/a.png")),
            Picture::Url("http://127.0.0.1:8000/media/a.png".into())
        );
        assert_eq!(
            resolve_picture(&config, Some("⚾")),
            Picture::Placeholder("⚾".into())
        );
        assert_eq!(
            resolve_picture(&config, None),
            Picture::Placeholder(PLACEHOLDER_PICTURE.into())
        );
        assert_eq!(
            resolve_picture(&config, Some("")),
            Picture::Placeholder(PLACEHOLDER_PICTURE.into())
        );
    }
}
