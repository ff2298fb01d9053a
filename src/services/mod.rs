// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - backend access layer.

pub mod scoutbase;

pub use scoutbase::{image_mime, ScoutbaseClient};
