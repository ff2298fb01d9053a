// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Home screen: static featured articles. No network access.

use crate::models::{Article, FEATURED_ARTICLES};

pub const WELCOME: &str = "Welcome to Scoutbase!";

pub fn featured_articles() -> &'static [Article] {
    &FEATURED_ARTICLES
}

/// Alert text for tapping an article, or `None` for an unknown id.
pub fn select_article(id: u32) -> Option<String> {
    featured_articles()
        .iter()
        .find(|a| a.id == id)
        .map(|a| format!("You selected: {}", a.title))
}
