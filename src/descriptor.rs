use serde::{Deserialize, Serialize};

use crate::types::BoundingBox;

/// One element as the renderer reports it: computed style strings and
/// geometry, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawElement {
    /// DOM traversal index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub text: String,
    pub color: String,
    #[serde(alias = "background")]
    pub background_color: String,
    pub font_size: String,
    pub bounding_box: BoundingBox,
    /// Computed `display`; renderers may omit it if they pre-filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Computed `visibility`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

/// Why a descriptor never became a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    EmptyText,
    Hidden,
    ZeroArea,
    UnparseableColor,
}

impl RawElement {
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    pub fn is_hidden(&self) -> bool {
        let display_none = self
            .display
            .as_deref()
            .is_some_and(|d| d.trim().eq_ignore_ascii_case("none"));
        let visibility_hidden = self
            .visibility
            .as_deref()
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "hidden" | "collapse"));
        display_none || visibility_hidden
    }

    /// Text/visibility filter applied before any color work.
    pub fn visibility_exclusion(&self, skip_zero_area: bool) -> Option<Exclusion> {
        if self.trimmed_text().is_empty() {
            Some(Exclusion::EmptyText)
        } else if self.is_hidden() {
            Some(Exclusion::Hidden)
        } else if skip_zero_area && !self.bounding_box.has_area() {
            Some(Exclusion::ZeroArea)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_renderer_shape() {
        let raw: RawElement = serde_json::from_str(
            r#"{
                "text": " Hello ",
                "color": "rgb(0, 0, 0)",
                "backgroundColor": "rgb(255, 255, 255)",
                "fontSize": "16px",
                "boundingBox": {"x": 1, "y": 2.5, "width": 100, "height": 20}
            }"#,
        )
        .unwrap();
        assert_eq!(raw.trimmed_text(), "Hello");
        assert_eq!(raw.background_color, "rgb(255, 255, 255)");
        assert_eq!(raw.bounding_box.y, 2.5);
        assert!(raw.display.is_none());
    }

    #[test]
    fn accepts_background_alias() {
        let raw: RawElement = serde_json::from_str(r##"{"text": "x", "background": "#fff"}"##).unwrap();
        assert_eq!(raw.background_color, "#fff");
    }

    #[test]
    fn whitespace_text_is_excluded() {
        let raw = RawElement { text: "   \n\t".into(), ..Default::default() };
        assert_eq!(raw.visibility_exclusion(false), Some(Exclusion::EmptyText));
    }

    #[test]
    fn hidden_styles_are_excluded() {
        let none = RawElement { text: "x".into(), display: Some("none".into()), ..Default::default() };
        let hidden = RawElement { text: "x".into(), visibility: Some("Hidden".into()), ..Default::default() };
        let shown = RawElement { text: "x".into(), display: Some("block".into()), ..Default::default() };
        assert_eq!(none.visibility_exclusion(false), Some(Exclusion::Hidden));
        assert_eq!(hidden.visibility_exclusion(false), Some(Exclusion::Hidden));
        assert_eq!(shown.visibility_exclusion(false), None);
    }

    #[test]
    fn zero_area_only_excluded_when_asked() {
        let raw = RawElement { text: "x".into(), ..Default::default() };
        assert_eq!(raw.visibility_exclusion(false), None);
        assert_eq!(raw.visibility_exclusion(true), Some(Exclusion::ZeroArea));
    }
}
