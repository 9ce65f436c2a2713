use std::fmt;

use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels. Alpha is never carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::math::hex::rgb_to_hex(*self))
    }
}

/// Element geometry as reported by the renderer (CSS pixels, viewport-relative).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Text size class. Large text gets the relaxed threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Normal,
    Large,
}

impl SizeClass {
    /// Font size in CSS pixels at or above which text counts as large.
    pub const LARGE_TEXT_PX: f64 = 18.0;

    pub fn from_px(px: f64) -> Self {
        if px >= Self::LARGE_TEXT_PX {
            SizeClass::Large
        } else {
            SizeClass::Normal
        }
    }

    pub fn is_large(self) -> bool {
        self == SizeClass::Large
    }
}

/// WCAG conformance level reached by a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Fail,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Fail => "Fail",
            Level::Aa => "AA",
            Level::Aaa => "AAA",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The conformance level an audit gates against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetLevel {
    #[default]
    #[serde(rename = "AA", alias = "aa")]
    Aa,
    #[serde(rename = "AAA", alias = "aaa")]
    Aaa,
}

impl TargetLevel {
    pub fn as_level(self) -> Level {
        match self {
            TargetLevel::Aa => Level::Aa,
            TargetLevel::Aaa => Level::Aaa,
        }
    }
}

impl fmt::Display for TargetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_level().fmt(f)
    }
}

/// One audited element, after filtering and color/size normalization.
///
/// The `*_css` fields keep the renderer's serialization for display and the
/// wire report only; evaluation works off the parsed values.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    /// DOM traversal index, when the renderer reports one.
    pub index: Option<usize>,
    pub text: String,
    pub foreground: Rgb,
    pub background: Rgb,
    pub font_size_px: Option<f64>,
    pub size_class: SizeClass,
    pub bounds: BoundingBox,
    pub color_css: String,
    pub background_css: String,
    pub font_size_css: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastResult {
    pub ratio: f64,
    /// Minimum ratio for the audit's target level and this element's size class.
    pub required: f64,
    /// Three-tier classification of `ratio`, independent of the target.
    pub level: Level,
    pub passes: bool,
}

/// A failing element with its remediation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub element: ElementSnapshot,
    pub result: ContrastResult,
    pub label: String,
    pub suggestion: Rgb,
}

/// Page-level outcome of one audit.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditSummary {
    pub total: usize,
    /// Page order, never re-sorted.
    pub violations: Vec<Violation>,
    pub pass_ratio: f64,
    pub stars: u8,
}

impl AuditSummary {
    pub fn passed(&self) -> usize {
        self.total.saturating_sub(self.violations.len())
    }
}
