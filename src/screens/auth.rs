// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, registration and post-login routing.
//!
//! After a session is established the user is dispatched by looking up, in
//! order and each awaited before the next:
//! 1. their role (none: role selection)
//! 2. their role's profile (incomplete: profile creation)
//! 3. otherwise home

use crate::error::Result;
use crate::models::{is_profile_complete, LoginRequest, RegisterRequest, UserId};
use crate::schema::{FormInput, LOGIN, REGISTRATION};
use crate::session::Session;
use crate::AppState;

use super::Route;

/// Log in with the `email`/`password` fields of `form` and route the user.
pub async fn login(state: &AppState, form: &FormInput) -> Result<Route> {
    let session = sign_in(state, form).await?;
    dispatch(state, session.user_id).await
}

/// Log in and establish the session without routing.
pub async fn sign_in(state: &AppState, form: &FormInput) -> Result<Session> {
    LOGIN.validate(form)?;

    let request = LoginRequest {
        email: form.get("email").trim().to_string(),
        password: form.get("password").to_string(),
    };
    let token = state.api.login(&request).await?;
    let session = state.session.establish(&token)?;

    tracing::info!(user_id = session.user_id, "Login successful");
    Ok(session)
}

/// Register, then log straight in with the same credentials.
pub async fn register(state: &AppState, form: &FormInput) -> Result<Route> {
    REGISTRATION.validate(form)?;

    let request = RegisterRequest {
        name: form.get("name").trim().to_string(),
        email: form.get("email").trim().to_string(),
        password: form.get("password").to_string(),
    };
    state.api.register(&request).await?;
    tracing::info!("Registration successful, logging in");

    let credentials = FormInput::new()
        .with("email", request.email)
        .with("password", request.password);
    login(state, &credentials).await
}

/// Pick up an existing server-side session (`GET /user`) and route the user.
pub async fn resume(state: &AppState) -> Result<Route> {
    let token = state.api.current_token().await?;
    let session = state.session.establish(&token)?;
    dispatch(state, session.user_id).await
}

/// Decide where a logged-in user goes next.
pub async fn dispatch(state: &AppState, user_id: UserId) -> Result<Route> {
    let Some(role) = state.api.fetch_role(user_id).await? else {
        tracing::info!(user_id, "No role assigned");
        return Ok(Route::RoleAssignment);
    };

    let records = state.api.fetch_profile_records(role, user_id).await?;
    if is_profile_complete(&records) {
        Ok(Route::Home)
    } else {
        tracing::info!(user_id, role = %role, "Profile incomplete");
        Ok(Route::CreateProfile(role))
    }
}

/// Log out and return to the landing screen.
///
/// The local session is always cleared and navigation always proceeds; a
/// failed server call is only logged.
pub async fn logout(state: &AppState) -> Route {
    if let Err(e) = state.api.logout().await {
        tracing::warn!(error = %e, "Logout request failed");
    } else {
        tracing::info!("Logged out");
    }
    state.session.invalidate();
    Route::Landing
}

/// Handle a detected session expiry: clear the session, wait the configured
/// delay, then send the user to login.
pub async fn expire_to_login(state: &AppState) -> Route {
    state.session.invalidate();
    tokio::time::sleep(state.config.expiry_redirect_delay).await;
    Route::Login
}
