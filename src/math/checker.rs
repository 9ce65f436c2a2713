use crate::types::{ContrastResult, ElementSnapshot, Level, TargetLevel, Violation};

/// Evaluate one snapshot against the target level.
///
/// `passes` is the scan-time gate: the unrounded ratio against the single
/// required threshold for this size class. `level` is the independent
/// three-tier label.
pub fn check_contrast(element: &ElementSnapshot, target: TargetLevel) -> ContrastResult {
    let ratio = super::wcag::contrast_ratio(element.foreground, element.background);
    let required = super::wcag::required_ratio(element.size_class, target);
    ContrastResult {
        ratio,
        required,
        level: super::wcag::classify(ratio, element.size_class),
        passes: ratio >= required,
    }
}

/// Label for a failing result: the lowest tier the element did not reach.
/// Below AA reads "AA Fail"; meeting AA but missing an AAA target reads
/// "AAA Fail".
pub fn fail_label(result: &ContrastResult) -> &'static str {
    match result.level {
        Level::Fail => "AA Fail",
        Level::Aa | Level::Aaa => "AAA Fail",
    }
}

/// Gate every snapshot, building a violation (with suggested fix) for each
/// failure. Page order is preserved.
pub fn check_all(elements: Vec<ElementSnapshot>, target: TargetLevel) -> CheckResult {
    let mut violations = Vec::new();
    let mut passed_count = 0usize;

    for element in elements {
        let result = check_contrast(&element, target);
        if result.passes {
            passed_count += 1;
            continue;
        }
        let suggestion = super::suggest::suggest_color(element.background, result.required);
        violations.push(Violation {
            label: fail_label(&result).to_string(),
            element,
            result,
            suggestion,
        });
    }

    CheckResult {
        violations,
        passed_count,
    }
}

pub struct CheckResult {
    pub violations: Vec<Violation>,
    pub passed_count: usize,
}

impl CheckResult {
    pub fn total(&self) -> usize {
        self.passed_count + self.violations.len()
    }
}
