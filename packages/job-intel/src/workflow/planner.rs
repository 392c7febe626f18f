//! Planner stage: request -> search directive.
//!
//! Pure, deterministic, no I/O. Always produces a directive; optional
//! fields degrade to the bare job title.

use crate::types::{directive::SearchDirective, request::SearchRequest};

/// Job boards the initial directive is scoped to. The refiner drops
/// this scoping when it broadens the search.
pub const JOB_BOARD_DOMAINS: [&str; 3] = ["greenhouse.io", "lever.co", "linkedin.com"];

/// Build the initial search directive for a request.
///
/// Job title and location are required terms; experience level is
/// folded into phrasing since postings rarely tag experience
/// precisely. The time filter becomes a structured day window.
pub fn build_directive(request: &SearchRequest) -> SearchDirective {
    let title = request.job_title.trim();
    let mut query = format!(
        "\"{}\" job posting {}",
        title,
        request.experience_level.phrase()
    );

    let location = request.location.trim();
    if !location.is_empty() {
        query.push_str(" in ");
        query.push_str(location);
    }

    let mut directive = SearchDirective::new(query).with_domains(JOB_BOARD_DOMAINS);
    if let Some(days) = request.time_filter.days() {
        directive = directive.with_window_days(days);
    }
    directive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::request::{ExperienceLevel, TimeFilter};
    use proptest::prelude::*;

    #[test]
    fn test_directive_encodes_title_and_location() {
        let request = SearchRequest::new("Backend Engineer", ExperienceLevel::Mid)
            .with_location("Remote")
            .with_time_filter(TimeFilter::Past7d);

        let directive = build_directive(&request);
        assert!(directive.query.contains("\"Backend Engineer\""));
        assert!(directive.query.contains("in Remote"));
        assert!(directive.query.contains("mid level"));
        assert_eq!(directive.window_days, Some(7));
        assert_eq!(directive.include_domains.len(), JOB_BOARD_DOMAINS.len());
    }

    #[test]
    fn test_empty_location_falls_back_to_title_only() {
        let request = SearchRequest::new("Data Engineer", ExperienceLevel::Junior);
        let directive = build_directive(&request);
        assert!(directive.query.contains("\"Data Engineer\""));
        assert!(!directive.query.contains(" in "));
        assert_eq!(directive.window_days, None);
    }

    proptest! {
        /// Same input, same directive; and the directive is never empty.
        #[test]
        fn prop_deterministic_and_nonempty(title in "[a-zA-Z ]{1,40}", location in "[a-zA-Z ]{0,20}") {
            let request = SearchRequest::new(title, ExperienceLevel::Senior)
                .with_location(location);
            let a = build_directive(&request);
            let b = build_directive(&request);
            prop_assert_eq!(&a, &b);
            prop_assert!(!a.query.trim().is_empty());
        }
    }
}
