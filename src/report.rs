//! Serialized audit results and the human-readable violation report.
//!
//! [`AuditOutcome`] is the record a rendering worker writes for the reporting
//! side: either a completed report or an explicit failure. Field names and
//! number formatting follow the worker's JSON so either side can be replaced.

use serde::{Deserialize, Serialize, Serializer};

use crate::advisory::{explain_or_fallback, Advisor, ExplainRequest};
use crate::config::AuditConfig;
use crate::math::color_parse::parse_color;
use crate::math::hex::rgb_to_hex;
use crate::math::suggest::suggest_color;
use crate::types::{AuditSummary, Violation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub total_elements: usize,
    pub failed_elements: Vec<FailedElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub text: String,
    pub color: String,
    pub background: String,
    #[serde(rename = "fontSize")]
    pub font_size: String,
    /// Rounded to two decimals.
    #[serde(serialize_with = "js_number")]
    pub contrast: f64,
    #[serde(serialize_with = "js_number")]
    pub required: f64,
    pub level: String,
    #[serde(serialize_with = "js_number")]
    pub x: f64,
    #[serde(serialize_with = "js_number")]
    pub y: f64,
    #[serde(serialize_with = "js_number")]
    pub w: f64,
    #[serde(serialize_with = "js_number")]
    pub h: f64,
}

/// An audit that could not complete. `total_elements` is always 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFailure {
    pub error: String,
    #[serde(default)]
    pub total_elements: usize,
}

impl AuditFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            total_elements: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuditOutcome {
    Completed(AuditReport),
    Failed(AuditFailure),
}

impl AuditOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, AuditOutcome::Failed(_))
    }
}

/// Integral values print without a fraction (`3`, not `3.0`).
fn js_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl From<&Violation> for FailedElement {
    fn from(v: &Violation) -> Self {
        let el = &v.element;
        FailedElement {
            id: el.index,
            text: el.text.clone(),
            color: el.color_css.clone(),
            background: el.background_css.clone(),
            font_size: el.font_size_css.clone(),
            contrast: round2(v.result.ratio),
            required: v.result.required,
            level: v.label.clone(),
            x: el.bounds.x,
            y: el.bounds.y,
            w: el.bounds.width,
            h: el.bounds.height,
        }
    }
}

impl AuditReport {
    pub fn from_summary(summary: &AuditSummary, screenshot: Option<String>) -> Self {
        AuditReport {
            total_elements: summary.total,
            failed_elements: summary.violations.iter().map(FailedElement::from).collect(),
            screenshot,
        }
    }

    pub fn pass_ratio(&self) -> f64 {
        crate::scoring::pass_ratio(self.total_elements, self.failed_elements.len())
    }

    pub fn stars(&self) -> u8 {
        crate::scoring::star_rating(self.pass_ratio())
    }
}

/// One line of the violation table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub text: String,
    pub contrast: f64,
    /// Suggested foreground as `#RRGGBB`, or `-` when the background did not parse.
    pub fix: String,
    pub advice: Option<String>,
}

/// Truncate to `limit` characters for display.
pub fn display_text(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Table rows for a worker's report. Fixes are recomputed from each
/// element's background; advice is requested only when an advisor is given.
pub fn build_rows(report: &AuditReport, config: &AuditConfig, advisor: Option<&dyn Advisor>) -> Vec<ReportRow> {
    report
        .failed_elements
        .iter()
        .map(|failed| {
            let fix = parse_color(&failed.background)
                .map(|bg| rgb_to_hex(suggest_color(bg, failed.required)))
                .unwrap_or_else(|| "-".to_string());
            let advice = advisor.map(|advisor| {
                explain_or_fallback(
                    advisor,
                    &ExplainRequest {
                        text: &failed.text,
                        foreground: &failed.color,
                        background: &failed.background,
                        ratio: failed.contrast,
                        target: config.target,
                    },
                )
            });
            ReportRow {
                text: display_text(&failed.text, config.display_text_limit),
                contrast: failed.contrast,
                fix,
                advice,
            }
        })
        .collect()
}

/// Plain-text rendering: compliance, rating, then the violation table.
pub fn render_text(report: &AuditReport, rows: &[ReportRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Compliance: {:.1}%\n", report.pass_ratio() * 100.0));
    out.push_str(&format!("Rating: {}\n", "⭐".repeat(report.stars() as usize)));
    out.push_str(&format!(
        "Elements: {} audited, {} failing\n",
        report.total_elements,
        report.failed_elements.len()
    ));
    if let Some(shot) = &report.screenshot {
        out.push_str(&format!("Screenshot: {shot}\n"));
    }
    if rows.is_empty() {
        return out;
    }

    let with_advice = rows.iter().any(|r| r.advice.is_some());
    let mut header = vec!["Text".to_string(), "Contrast".to_string(), "Fix".to_string()];
    if with_advice {
        header.push("AI Advice".to_string());
    }
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let mut cells = vec![r.text.clone(), format!("{:.2}", r.contrast), r.fix.clone()];
            if with_advice {
                cells.push(r.advice.as_deref().unwrap_or("").replace('\n', " "));
            }
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|cells| cells[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    out.push_str("\nViolation Report\n");
    for cells in std::iter::once(&header).chain(body.iter()) {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }
    out
}
