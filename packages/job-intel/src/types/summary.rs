//! Market summary produced by the analyzer stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One market summary per completed search query.
///
/// Skill and stack lists are ordered most-frequent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSummary {
    /// The search query this summary belongs to
    pub search_query_id: Uuid,

    /// Most-demanded skills, descending frequency
    pub top_skills: Vec<String>,

    /// Most-demanded tech stacks, descending frequency
    pub top_tech_stacks: Vec<String>,

    /// Short free-form market narrative
    pub summary_text: String,

    /// When the summary was produced
    pub created_at: DateTime<Utc>,
}

impl MarketSummary {
    /// Create a new summary.
    pub fn new(
        search_query_id: Uuid,
        top_skills: Vec<String>,
        top_tech_stacks: Vec<String>,
        summary_text: impl Into<String>,
    ) -> Self {
        Self {
            search_query_id,
            top_skills,
            top_tech_stacks,
            summary_text: summary_text.into(),
            created_at: Utc::now(),
        }
    }

    /// Summary for a query that yielded no postings.
    ///
    /// Persisted like any other summary so COMPLETE always has one.
    pub fn empty(search_query_id: Uuid, reason: impl Into<String>) -> Self {
        Self::new(search_query_id, Vec::new(), Vec::new(), reason)
    }
}
