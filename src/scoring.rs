use crate::types::{AuditSummary, Violation};

/// Share of candidate elements that passed. A page with no candidates
/// scores 0: the denominator is `max(total, 1)`, so an empty page is not
/// reported as fully compliant.
pub fn pass_ratio(total: usize, failed: usize) -> f64 {
    total.saturating_sub(failed) as f64 / total.max(1) as f64
}

/// 1-5 stars for a pass ratio.
pub fn star_rating(pass_ratio: f64) -> u8 {
    if pass_ratio >= 0.95 {
        5
    } else if pass_ratio >= 0.85 {
        4
    } else if pass_ratio >= 0.70 {
        3
    } else if pass_ratio >= 0.50 {
        2
    } else {
        1
    }
}

pub fn summarize(total: usize, violations: Vec<Violation>) -> AuditSummary {
    let pass_ratio = pass_ratio(total, violations.len());
    AuditSummary {
        total,
        violations,
        pass_ratio,
        stars: star_rating(pass_ratio),
    }
}
