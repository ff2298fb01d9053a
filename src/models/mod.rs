// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models exchanged with the Scoutbase API.

pub mod content;
pub mod profile;
pub mod role;
pub mod user;

pub use content::{Article, FEATURED_ARTICLES};
pub use profile::{
    first_record, is_profile_complete, AthleteProfile, CoachProfile, Profile, ScoutProfile,
};
pub use role::{AssignRoleRequest, Role, RoleResponse, UnknownRole};
pub use user::{
    EmailResponse, LoginRequest, LoginResponse, RegisterRequest, TokenClaims, UserId,
};
