// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session context shared by every screen.
//!
//! The bearer token is decoded once, when the session is established at
//! login (or when resuming from `GET /user`), and the result is held here
//! until logout or expiry. Screens read the user id from the context instead
//! of fetching and decoding the token again.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{AppError, Result};
use crate::models::{TokenClaims, UserId};

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Raw bearer token
    pub token: String,
    pub user_id: UserId,
    pub name: Option<String>,
    /// When the token stops being accepted, if it says
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Build a session from a bearer token.
    ///
    /// The signature is not checked: the backend is the only party that can
    /// verify it, and the client only needs the claims.
    pub fn from_token(token: &str) -> Result<Self> {
        let token = token.trim().trim_matches('"');
        let claims = decode_claims(token)?;
        let expires_at = match claims.exp {
            Some(exp) => Some(
                DateTime::from_timestamp(exp, 0)
                    .ok_or_else(|| AppError::InvalidToken(format!("bad exp claim: {exp}")))?,
            ),
            None => None,
        };

        Ok(Self {
            token: token.to_string(),
            user_id: claims.id,
            name: claims.name,
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// Decode token claims without verifying the signature.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    if token.is_empty() {
        return Err(AppError::InvalidToken("empty token".to_string()));
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::InvalidToken(e.to_string()))
}

/// Cloneable handle to the current session, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<Mutex<Option<Session>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `token` and make it the current session.
    ///
    /// A token that is already expired is rejected and leaves the context
    /// empty.
    pub fn establish(&self, token: &str) -> Result<Session> {
        let session = Session::from_token(token)?;
        if session.is_expired_at(Utc::now()) {
            self.invalidate();
            return Err(AppError::SessionExpired);
        }

        tracing::debug!(user_id = session.user_id, "Session established");
        *self.lock() = Some(session.clone());
        Ok(session)
    }

    /// The current session.
    ///
    /// Fails with `SessionExpired` when nobody is logged in, and clears the
    /// context when the held token has expired.
    pub fn current(&self) -> Result<Session> {
        // Check and clear under one lock so a session established
        // concurrently is never the one cleared.
        let mut guard = self.lock();
        let session = guard.as_ref().ok_or(AppError::SessionExpired)?;
        if session.is_expired_at(Utc::now()) {
            tracing::warn!(user_id = session.user_id, "Session token expired");
            *guard = None;
            return Err(AppError::SessionExpired);
        }
        Ok(session.clone())
    }

    pub fn user_id(&self) -> Result<UserId> {
        self.current().map(|s| s.user_id)
    }

    pub fn is_active(&self) -> bool {
        self.current().is_ok()
    }

    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            tracing::debug!("Session cleared");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
