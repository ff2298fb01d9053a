// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete and coach search.
//!
//! One request per explicit search; only filled-in filters are sent.

use crate::error::Result;
use crate::models::{AthleteProfile, CoachProfile};
use crate::schema::{FormInput, ATHLETE_SEARCH, COACH_SEARCH};
use crate::AppState;

pub const NO_ATHLETES: &str = "No athletes found matching the criteria";
pub const NO_COACHES: &str = "No coaches found matching the criteria";

/// What the results list renders.
#[derive(Debug, Clone)]
pub enum SearchOutcome<T> {
    Results(Vec<T>),
    /// Explicit empty state with its message
    NoResults(&'static str),
}

impl<T> SearchOutcome<T> {
    fn from_results(results: Vec<T>, empty_message: &'static str) -> Self {
        if results.is_empty() {
            SearchOutcome::NoResults(empty_message)
        } else {
            SearchOutcome::Results(results)
        }
    }
}

pub async fn search_athletes(
    state: &AppState,
    filters: &FormInput,
) -> Result<SearchOutcome<AthleteProfile>> {
    let query = ATHLETE_SEARCH.query_string(filters);
    let results = state.api.search_athletes(&query).await?;
    tracing::info!(count = results.len(), "Athlete search complete");
    Ok(SearchOutcome::from_results(results, NO_ATHLETES))
}

pub async fn search_coaches(
    state: &AppState,
    filters: &FormInput,
) -> Result<SearchOutcome<CoachProfile>> {
    let query = COACH_SEARCH.query_string(filters);
    let results = state.api.search_coaches(&query).await?;
    tracing::info!(count = results.len(), "Coach search complete");
    Ok(SearchOutcome::from_results(results, NO_COACHES))
}
