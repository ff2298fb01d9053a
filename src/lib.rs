// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Scoutbase client: sports-recruiting marketplace connecting athletes,
//! coaches and scouts.
//!
//! This crate provides the client side of the Scoutbase API: registration,
//! login and post-login routing, role assignment, profile creation and
//! editing, and athlete/coach search.

pub mod config;
pub mod error;
pub mod models;
pub mod schema;
pub mod screens;
pub mod services;
pub mod session;

use config::Config;
use services::ScoutbaseClient;
use session::SessionContext;

/// Shared application state, handed to every screen.
pub struct AppState {
    pub config: Config,
    pub api: ScoutbaseClient,
    pub session: SessionContext,
}

impl AppState {
    pub fn new(config: Config) -> error::Result<Self> {
        let api = ScoutbaseClient::new(config.api_url.clone())?;
        Ok(Self {
            config,
            api,
            session: SessionContext::new(),
        })
    }
}
