// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Featured content shown on the home screen. Hardcoded; never fetched.

use serde::Serialize;

/// A featured article or event card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURED_ARTICLES: [Article; 3] = [
    Article {
        id: 1,
        title: "5 Tips to Make Your Profile Stand Out",
        description: "Learn how to create a compelling profile to catch the attention of recruiters.",
    },
    Article {
        id: 2,
        title: "Upcoming College Recruiting Event",
        description: "Don't miss the recruiting event hosted by State University this weekend!",
    },
    Article {
        id: 3,
        title: "How to Showcase Your Skills Effectively",
        description: "Highlight your strengths with these proven techniques.",
    },
];
