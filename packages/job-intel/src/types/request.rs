//! The caller-facing search request.

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

/// Experience band for the requested role.
///
/// Postings rarely tag experience precisely, so this is folded into
/// query phrasing by the planner rather than used as a strict filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    /// Seniority phrasing used in the search directive.
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Junior => "junior entry level",
            Self::Mid => "mid level 2-5 years",
            Self::Senior => "senior staff lead",
        }
    }
}

/// Recency window for postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFilter {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "24h")]
    Past24h,
    #[serde(rename = "7d")]
    Past7d,
    #[serde(rename = "30d")]
    Past30d,
}

impl TimeFilter {
    /// Window size in days, `None` for no restriction.
    pub fn days(self) -> Option<u32> {
        match self {
            Self::Any => None,
            Self::Past24h => Some(1),
            Self::Past7d => Some(7),
            Self::Past30d => Some(30),
        }
    }
}

/// A job-search request as submitted by the caller.
///
/// Immutable once submitted; the workflow only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Role being searched for (must be non-empty)
    pub job_title: String,

    /// Experience band
    pub experience_level: ExperienceLevel,

    /// Location, may be "remote" or empty
    #[serde(default)]
    pub location: String,

    /// Recency window
    #[serde(default)]
    pub time_filter: TimeFilter,
}

impl SearchRequest {
    /// Create a request with defaults for the optional fields.
    pub fn new(job_title: impl Into<String>, experience_level: ExperienceLevel) -> Self {
        Self {
            job_title: job_title.into(),
            experience_level,
            location: String::new(),
            time_filter: TimeFilter::Any,
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the time filter.
    pub fn with_time_filter(mut self, filter: TimeFilter) -> Self {
        self.time_filter = filter;
        self
    }

    /// Validate the request before submission.
    pub fn validate(&self) -> Result<()> {
        if self.job_title.trim().is_empty() {
            return Err(AgentError::InvalidRequest {
                reason: "job_title must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_filter_days() {
        assert_eq!(TimeFilter::Any.days(), None);
        assert_eq!(TimeFilter::Past24h.days(), Some(1));
        assert_eq!(TimeFilter::Past7d.days(), Some(7));
        assert_eq!(TimeFilter::Past30d.days(), Some(30));
    }

    #[test]
    fn test_time_filter_serde_names() {
        let filter: TimeFilter = serde_json::from_str("\"7d\"").unwrap();
        assert_eq!(filter, TimeFilter::Past7d);
        assert_eq!(serde_json::to_string(&TimeFilter::Past24h).unwrap(), "\"24h\"");
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let request = SearchRequest::new("  ", ExperienceLevel::Mid);
        assert!(request.validate().is_err());

        let request = SearchRequest::new("Backend Engineer", ExperienceLevel::Mid);
        assert!(request.validate().is_ok());
    }
}
