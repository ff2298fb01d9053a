// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screen controllers.
//!
//! Each screen collects form input, calls the API and returns either the
//! next `Route` or the data to render.

pub mod auth;
pub mod home;
pub mod profile;
pub mod role;
pub mod search;

use std::fmt;

use crate::models::Role;

/// Navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Logo with register/login links
    Landing,
    Login,
    Register,
    RoleAssignment,
    CreateProfile(Role),
    /// Athlete or coach only; scouts have nothing to edit
    EditProfile(Role),
    Profile,
    Home,
    SearchAthlete,
    SearchCoach,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::RoleAssignment => "/roleassignment",
            Route::CreateProfile(Role::Athlete) => "/createathlete",
            Route::CreateProfile(Role::Coach) => "/createcoach",
            Route::CreateProfile(Role::Scout) => "/createscout",
            Route::EditProfile(Role::Athlete) => "/editathleteprofile",
            Route::EditProfile(Role::Coach) => "/editcoachprofile",
            Route::EditProfile(Role::Scout) => "/profile",
            Route::Profile => "/profile",
            Route::Home => "/home",
            Route::SearchAthlete => "/searchathlete",
            Route::SearchCoach => "/searchcoach",
        }
    }

    /// Screens that show the bottom tab bar.
    pub fn shows_tab_bar(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::SearchCoach | Route::SearchAthlete | Route::Profile
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
