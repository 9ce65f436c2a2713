//! Node entry points.

use napi::{Error, Result};
use napi_derive::napi;

use crate::config::AuditConfig;
use crate::descriptor::RawElement;
use crate::math::color_parse::parse_color;
use crate::report::AuditReport;

/// Page-level numbers for a quick badge without parsing the full report.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct PageScore {
    pub total_elements: u32,
    pub failed_elements: u32,
    pub pass_ratio: f64,
    pub stars: u32,
}

#[napi]
pub fn health_check() -> String {
    "contrast-audit ok".to_string()
}

/// Contrast ratio of two CSS colors, or null if either does not parse.
#[napi]
pub fn contrast_ratio(foreground: String, background: String) -> Option<f64> {
    Some(crate::math::wcag::contrast_ratio(
        parse_color(&foreground)?,
        parse_color(&background)?,
    ))
}

/// Suggested `#RRGGBB` foreground for `background`, or null if it does not parse.
#[napi]
pub fn suggest_color(background: String, required_ratio: f64) -> Option<String> {
    let bg = parse_color(&background)?;
    Some(crate::math::hex::rgb_to_hex(crate::math::suggest::suggest_color(bg, required_ratio)))
}

/// Audit a page's element descriptors (JSON array) and return the report JSON.
#[napi]
pub fn audit_page_json(elements_json: String, config_json: Option<String>) -> Result<String> {
    let config = match config_json {
        Some(raw) => AuditConfig::from_json_str(&raw).map_err(|e| Error::from_reason(e.to_string()))?,
        None => AuditConfig::default(),
    };
    let elements: Vec<RawElement> =
        serde_json::from_str(&elements_json).map_err(|e| Error::from_reason(e.to_string()))?;
    let summary = crate::engine::audit_elements(&elements, &config);
    serde_json::to_string(&AuditReport::from_summary(&summary, None)).map_err(|e| Error::from_reason(e.to_string()))
}

#[napi]
pub fn score_page(total_elements: u32, failed_elements: u32) -> PageScore {
    let pass_ratio = crate::scoring::pass_ratio(total_elements as usize, failed_elements as usize);
    PageScore {
        total_elements,
        failed_elements,
        pass_ratio,
        stars: crate::scoring::star_rating(pass_ratio) as u32,
    }
}
