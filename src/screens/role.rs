// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role selection for users who have none yet.

use crate::error::{AppError, Result};
use crate::models::Role;
use crate::AppState;

use super::Route;

/// Single-selection state: picking a role replaces any earlier pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSelection {
    selected: Option<Role>,
}

impl RoleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, role: Role) {
        self.selected = Some(role);
    }

    pub fn selected(&self) -> Option<Role> {
        self.selected
    }
}

/// Persist the selected role and go to that role's profile creation.
///
/// Failures leave the selection untouched so the user can retry.
pub async fn assign_role(state: &AppState, selection: &RoleSelection) -> Result<Route> {
    let role = selection
        .selected()
        .ok_or_else(|| AppError::Validation(vec!["Role".to_string()]))?;
    let user_id = state.session.user_id()?;

    state.api.assign_role(user_id, role).await?;
    tracing::info!(user_id, role = %role, "Role assigned");
    Ok(Route::CreateProfile(role))
}
