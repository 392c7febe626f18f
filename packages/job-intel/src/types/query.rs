//! Persistent search-query record and its status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::request::SearchRequest;

/// Workflow status of a search query.
///
/// Statuses advance monotonically along `rank()` with one exception:
/// the bounded `Refining -> Searching` feedback edge. `Failed` is a
/// parallel terminal reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryStatus {
    /// Submitted, workflow task not yet picked up
    Pending,
    /// Building the search directive
    Planning,
    /// Calling the search provider
    Searching,
    /// Deciding whether the result set is sufficient
    Refining,
    /// Classifying and extracting candidate pages
    Parsing,
    /// Producing the market summary
    Analyzing,
    /// Terminal: posts and summary persisted
    Complete,
    /// Terminal: fatal error, reason recorded
    Failed,
}

impl QueryStatus {
    /// Position in the forward ordering. `Failed` sits outside it.
    pub fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Planning => 1,
            Self::Searching => 2,
            Self::Refining => 3,
            Self::Parsing => 4,
            Self::Analyzing => 5,
            Self::Complete => 6,
            Self::Failed => 7,
        }
    }

    /// Whether this status ends the workflow.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    /// Whether moving to `next` is a legal transition.
    ///
    /// Forward moves are always legal, `Failed` is reachable from any
    /// non-terminal state, and `Refining -> Searching` is the single
    /// permitted backward edge.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == Self::Failed {
            return true;
        }
        if self == Self::Refining && next == Self::Searching {
            return true;
        }
        next.rank() > self.rank()
    }
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::Planning => "PLANNING",
            Self::Searching => "SEARCHING",
            Self::Refining => "REFINING",
            Self::Parsing => "PARSING",
            Self::Analyzing => "ANALYZING",
            Self::Complete => "COMPLETE",
            Self::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// A persisted search query.
///
/// Created on submission, mutated only by the workflow engine, never
/// deleted during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query identifier
    pub id: Uuid,

    /// The immutable request this query was created from
    pub request: SearchRequest,

    /// Current workflow status
    pub status: QueryStatus,

    /// Number of refiner-triggered search retries taken so far
    pub retries: u32,

    /// Reason string, set only when status is `Failed`
    pub error_message: Option<String>,

    /// Diagnostic breadcrumbs for partial failures (rejected pages,
    /// failed search attempts). Never affects the status machine.
    #[serde(default)]
    pub failure_notes: Vec<String>,

    /// When the query was submitted
    pub created_at: DateTime<Utc>,
}

impl SearchQuery {
    /// Create a new pending query for a request.
    pub fn new(request: SearchRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            status: QueryStatus::Pending,
            retries: 0,
            error_message: None,
            failure_notes: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::request::ExperienceLevel;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(QueryStatus::Pending.can_transition_to(QueryStatus::Planning));
        assert!(QueryStatus::Planning.can_transition_to(QueryStatus::Searching));
        assert!(QueryStatus::Refining.can_transition_to(QueryStatus::Parsing));
        assert!(QueryStatus::Analyzing.can_transition_to(QueryStatus::Complete));
    }

    #[test]
    fn test_feedback_edge_is_the_only_backward_move() {
        assert!(QueryStatus::Refining.can_transition_to(QueryStatus::Searching));
        assert!(!QueryStatus::Parsing.can_transition_to(QueryStatus::Searching));
        assert!(!QueryStatus::Searching.can_transition_to(QueryStatus::Planning));
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        assert!(!QueryStatus::Complete.can_transition_to(QueryStatus::Failed));
        assert!(!QueryStatus::Failed.can_transition_to(QueryStatus::Planning));
        assert!(QueryStatus::Parsing.can_transition_to(QueryStatus::Failed));
    }

    #[test]
    fn test_status_serde_screaming_case() {
        let status: QueryStatus = serde_json::from_str("\"SEARCHING\"").unwrap();
        assert_eq!(status, QueryStatus::Searching);
        assert_eq!(
            serde_json::to_string(&QueryStatus::Complete).unwrap(),
            "\"COMPLETE\""
        );
    }

    #[test]
    fn test_new_query_is_pending() {
        let query = SearchQuery::new(SearchRequest::new("Backend Engineer", ExperienceLevel::Mid));
        assert_eq!(query.status, QueryStatus::Pending);
        assert_eq!(query.retries, 0);
        assert!(query.error_message.is_none());
    }
}
