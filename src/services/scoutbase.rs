// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scoutbase API client.
//!
//! Handles:
//! - Registration, login and logout
//! - Role lookup and assignment
//! - Profile lookup, creation (multipart with optional picture) and edits
//! - Athlete/coach search
//! - Contact email reveal
//!
//! Every call returns `crate::error::Result`; non-2xx responses become
//! `AppError::Api` carrying the server's `message`/`detail` when present.

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{
    AssignRoleRequest, AthleteProfile, CoachProfile, EmailResponse, LoginRequest, LoginResponse,
    RegisterRequest, Role, RoleResponse, UserId,
};

/// Scoutbase API client.
#[derive(Clone)]
pub struct ScoutbaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScoutbaseClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host/scoutbase`).
    ///
    /// The client keeps a cookie store; `GET /user` and `POST /logout` rely
    /// on the session cookie set at login.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ─── Auth ────────────────────────────────────────────────────────────────

    /// Register a new account.
    ///
    /// Empty fields are rejected before any request is sent.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        request.validate()?;

        let response = self
            .http
            .post(self.url("/register"))
            .json(request)
            .send()
            .await?;

        self.check_response(response).await?;
        tracing::info!("Registration accepted");
        Ok(())
    }

    /// Log in and return the bearer token.
    ///
    /// Any non-2xx status or a body without a `jwt` field is an `Auth` error;
    /// the token is never decoded in that case.
    pub async fn login(&self, request: &LoginRequest) -> Result<String> {
        request.validate()?;

        let response = self
            .http
            .post(self.url("/login"))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Login rejected");
            return Err(AppError::Auth(
                AppError::from_response(status, &body).user_message("Failed to login"),
            ));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("login response: {e}")))?;

        body.jwt
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Auth("No token found in response".to_string()))
    }

    /// Fetch the current session's token (`GET /user`).
    ///
    /// The endpoint answers with the raw token as plain text, not JSON.
    pub async fn current_token(&self) -> Result<String> {
        let response = self.http.get(self.url("/user")).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "Failed to retrieve token");
            return Err(AppError::InvalidToken(format!(
                "Failed to retrieve token (HTTP {status})"
            )));
        }

        let token = response.text().await?;
        let token = token.trim().trim_matches('"');
        if token.is_empty() {
            return Err(AppError::InvalidToken("empty token response".to_string()));
        }
        Ok(token.to_string())
    }

    /// End the server-side session.
    pub async fn logout(&self) -> Result<()> {
        let response = self.http.post(self.url("/logout")).send().await?;
        self.check_response(response).await
    }

    // ─── Roles ───────────────────────────────────────────────────────────────

    /// Look up the user's role; `None` when no role has been assigned yet.
    pub async fn fetch_role(&self, user_id: UserId) -> Result<Option<Role>> {
        let url = self.url(&format!("/fetchrole?user_id={user_id}"));
        let body: RoleResponse = self.get_json(&url).await?;
        Ok(body.role)
    }

    pub async fn assign_role(&self, user_id: UserId, role: Role) -> Result<()> {
        let response = self
            .http
            .post(self.url("/assignrole"))
            .json(&AssignRoleRequest {
                user_id,
                role_name: role,
            })
            .send()
            .await?;

        self.check_response(response).await
    }

    // ─── Profiles ────────────────────────────────────────────────────────────

    /// Raw profile records for a user (`GET /searchfor{role}?user_id=`).
    ///
    /// Kept untyped so the completeness check sees exactly what the backend
    /// sent.
    pub async fn fetch_profile_records(&self, role: Role, user_id: UserId) -> Result<Value> {
        let url = self.url(&format!("/searchfor{}?user_id={}", role.slug(), user_id));
        self.get_json(&url).await
    }

    /// Create an athlete profile. `fields` are the multipart text parts.
    pub async fn create_athlete_profile(
        &self,
        user_id: UserId,
        fields: Vec<(&'static str, String)>,
        picture: Option<&Path>,
    ) -> Result<Value> {
        self.create_multipart_profile(Role::Athlete, user_id, fields, picture)
            .await
    }

    /// Create a coach profile. `fields` are the multipart text parts.
    pub async fn create_coach_profile(
        &self,
        user_id: UserId,
        fields: Vec<(&'static str, String)>,
        picture: Option<&Path>,
    ) -> Result<Value> {
        self.create_multipart_profile(Role::Coach, user_id, fields, picture)
            .await
    }

    /// Scouts only need their user id on file.
    pub async fn create_scout_profile(&self, user_id: UserId) -> Result<()> {
        let response = self
            .http
            .post(self.url("/scout/createprofile"))
            .json(&serde_json::json!({ "user_id": user_id }))
            .send()
            .await?;

        self.check_response(response).await?;
        tracing::info!(user_id, "Scout profile created");
        Ok(())
    }

    async fn create_multipart_profile(
        &self,
        role: Role,
        user_id: UserId,
        fields: Vec<(&'static str, String)>,
        picture: Option<&Path>,
    ) -> Result<Value> {
        let mut form = Form::new().text("user_id", user_id.to_string());
        for (name, value) in fields {
            form = form.text(name, value);
        }
        if let Some(path) = picture {
            form = form.part("profile_picture", image_part(path).await?);
        }

        let url = self.url(&format!("/{}/createprofile", role.slug()));
        tracing::debug!(url = %url, "Creating profile");
        let response = self.http.post(&url).multipart(form).send().await?;

        let body = self.check_response_value(response).await?;
        tracing::info!(user_id, role = %role, "Profile created");
        Ok(body)
    }

    /// Partial update of an athlete profile.
    pub async fn edit_athlete_profile(&self, user_id: UserId, body: &Map<String, Value>) -> Result<()> {
        self.edit_profile(Role::Athlete, user_id, body).await
    }

    /// Partial update of a coach profile.
    pub async fn edit_coach_profile(&self, user_id: UserId, body: &Map<String, Value>) -> Result<()> {
        self.edit_profile(Role::Coach, user_id, body).await
    }

    async fn edit_profile(&self, role: Role, user_id: UserId, body: &Map<String, Value>) -> Result<()> {
        let url = self.url(&format!("/edit{}/{}/", role.slug(), user_id));
        let response = self.http.put(&url).json(body).send().await?;

        self.check_response(response).await?;
        tracing::info!(user_id, role = %role, "Profile updated");
        Ok(())
    }

    pub async fn replace_athlete_picture(&self, user_id: UserId, picture: &Path) -> Result<Value> {
        self.replace_picture(Role::Athlete, user_id, picture).await
    }

    pub async fn replace_coach_picture(&self, user_id: UserId, picture: &Path) -> Result<Value> {
        self.replace_picture(Role::Coach, user_id, picture).await
    }

    async fn replace_picture(&self, role: Role, user_id: UserId, picture: &Path) -> Result<Value> {
        let form = Form::new().part("profile_picture", image_part(picture).await?);
        let url = self.url(&format!(
            "/edit-{}-profile-picture/{}/",
            role.slug(),
            user_id
        ));
        let response = self.http.put(&url).multipart(form).send().await?;

        let body = self.check_response_value(response).await?;
        tracing::info!(user_id, role = %role, "Profile picture replaced");
        Ok(body)
    }

    // ─── Search & contact ────────────────────────────────────────────────────

    /// Search athletes. `query` is an already-built query string (may be empty).
    pub async fn search_athletes(&self, query: &str) -> Result<Vec<AthleteProfile>> {
        let url = self.search_url(Role::Athlete, query);
        self.get_json(&url).await
    }

    /// Search coaches. `query` is an already-built query string (may be empty).
    pub async fn search_coaches(&self, query: &str) -> Result<Vec<CoachProfile>> {
        let url = self.search_url(Role::Coach, query);
        self.get_json(&url).await
    }

    fn search_url(&self, role: Role, query: &str) -> String {
        let path = format!("/searchfor{}", role.slug());
        if query.is_empty() {
            self.url(&path)
        } else {
            self.url(&format!("{path}?{query}"))
        }
    }

    /// Reveal a user's contact email.
    pub async fn fetch_email(&self, user_id: UserId) -> Result<String> {
        let url = self.url(&format!("/fetch-email/{user_id}/"));
        let body: EmailResponse = self.get_json(&url).await?;
        Ok(body.email)
    }

    // ─── Response handling ───────────────────────────────────────────────────

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url = %url, "GET");
        let response = self.http.get(url).send().await?;
        self.check_response_json(response).await
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await.map(|_| ())
    }

    /// Pass 2xx responses through; turn anything else into `AppError::Api`.
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, path = %path, "Scoutbase API error");
        Err(AppError::from_response(status, &body))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("JSON parse error: {e}")))
    }

    /// Check response and parse an optional JSON body (`Null` when empty).
    async fn check_response_value(&self, response: reqwest::Response) -> Result<Value> {
        let response = self.check_status(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| AppError::Decode(format!("JSON parse error: {e}")))
    }
}

/// Build the multipart file part for a local image.
async fn image_part(path: &Path) -> Result<Part> {
    let local = local_path(path);
    let bytes = tokio::fs::read(&local).await.map_err(|source| AppError::Io {
        path: local.clone(),
        source,
    })?;

    let file_name = file_name(&local).to_string();
    let part = Part::bytes(bytes).file_name(file_name.clone());
    match image_mime(&file_name) {
        Some(mime) => part
            .mime_str(&mime)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("bad MIME type {mime}: {e}"))),
        None => Ok(part),
    }
}

/// Strip a `file://` scheme from picker URIs.
fn local_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    raw.strip_prefix("file://").unwrap_or(raw.as_ref()).to_string()
}

/// Last path segment.
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// `image/<ext>` from the file extension, if it has one.
pub fn image_mime(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    let valid = !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| format!("image/{}", ext.to_ascii_lowercase()))
}
