//! Structured job posting records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A validated, structured job posting.
///
/// Created by the parser stage only when a candidate page is judged a
/// single active posting; never mutated after creation. One query
/// yields zero or more posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPost {
    /// The search query this post belongs to
    pub search_query_id: Uuid,

    /// Role title
    pub title: String,

    /// Hiring company
    pub company: String,

    /// Posting location
    pub location: String,

    /// Application link
    pub apply_url: String,

    /// Candidate page the post was extracted from
    pub source_url: String,

    /// Posting date, when the page states one
    pub posted_date: Option<String>,

    /// When the post was extracted
    pub created_at: DateTime<Utc>,
}

impl JobPost {
    /// Create a new job post.
    pub fn new(
        search_query_id: Uuid,
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        apply_url: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            search_query_id,
            title: title.into(),
            company: company.into(),
            location: location.into(),
            apply_url: apply_url.into(),
            source_url: source_url.into(),
            posted_date: None,
            created_at: Utc::now(),
        }
    }

    /// Set the posting date.
    pub fn with_posted_date(mut self, date: impl Into<String>) -> Self {
        self.posted_date = Some(date.into());
        self
    }
}
