use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::AuditConfig;
use crate::descriptor::{Exclusion, RawElement};
use crate::math::color_parse::{parse_color, parse_font_size};
use crate::renderer::RenderedPage;
use crate::types::{AuditSummary, ElementSnapshot, SizeClass};

/// Turn a renderer descriptor into a candidate, or say why it is not one.
///
/// Elements whose colors do not parse are excluded outright: they count
/// neither toward the total nor as violations. An unparseable font size is
/// treated as normal text.
pub fn build_snapshot(raw: &RawElement, config: &AuditConfig) -> Result<ElementSnapshot, Exclusion> {
    if let Some(exclusion) = raw.visibility_exclusion(config.skip_zero_area) {
        return Err(exclusion);
    }

    let (Some(foreground), Some(background)) = (parse_color(&raw.color), parse_color(&raw.background_color)) else {
        return Err(Exclusion::UnparseableColor);
    };

    let font_size_px = parse_font_size(&raw.font_size);
    let size_class = font_size_px.map_or(SizeClass::Normal, SizeClass::from_px);

    Ok(ElementSnapshot {
        index: raw.index,
        text: raw.trimmed_text().to_string(),
        foreground,
        background,
        font_size_px,
        size_class,
        bounds: raw.bounding_box,
        color_css: raw.color.clone(),
        background_css: raw.background_color.clone(),
        font_size_css: raw.font_size.clone(),
    })
}

/// Audit one page's descriptors, in DOM order.
pub fn audit_elements(elements: &[RawElement], config: &AuditConfig) -> AuditSummary {
    let mut candidates = Vec::with_capacity(elements.len());
    let mut excluded = 0usize;

    for (position, raw) in elements.iter().enumerate() {
        match build_snapshot(raw, config) {
            Ok(snapshot) => candidates.push(snapshot),
            Err(reason) => {
                excluded += 1;
                debug!(position, ?reason, "element excluded from audit");
            }
        }
    }

    let checked = crate::math::checker::check_all(candidates, config.target);
    let summary = crate::scoring::summarize(checked.total(), checked.violations);

    info!(
        total = summary.total,
        violations = summary.violations.len(),
        excluded,
        stars = summary.stars,
        wcag_target = %config.target,
        "page audited"
    );
    summary
}

pub fn audit_page(page: &RenderedPage, config: &AuditConfig) -> AuditSummary {
    audit_elements(&page.elements, config)
}

/// Audit several pages in parallel. Results line up with `pages`.
///
/// Each page is evaluated independently; nothing is shared between them.
pub fn audit_pages(pages: &[RenderedPage], config: &AuditConfig) -> Vec<AuditSummary> {
    pages.par_iter().map(|page| audit_page(page, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoundingBox, Rgb, TargetLevel};

    fn raw(text: &str, color: &str, bg: &str, font_size: &str) -> RawElement {
        RawElement {
            text: text.to_string(),
            color: color.to_string(),
            background_color: bg.to_string(),
            font_size: font_size.to_string(),
            bounding_box: BoundingBox { x: 0.0, y: 0.0, width: 120.0, height: 18.0 },
            ..Default::default()
        }
    }

    #[test]
    fn snapshot_normalizes_colors_and_size() {
        let snap = build_snapshot(&raw("  Title ", "rgb(0, 0, 0)", "#fff", "24px"), &AuditConfig::default()).unwrap();
        assert_eq!(snap.text, "Title");
        assert_eq!(snap.foreground, Rgb::BLACK);
        assert_eq!(snap.background, Rgb::WHITE);
        assert_eq!(snap.size_class, SizeClass::Large);
        assert_eq!(snap.color_css, "rgb(0, 0, 0)");
    }

    #[test]
    fn unparseable_font_size_is_normal_text() {
        let snap = build_snapshot(&raw("x", "#000", "#fff", "medium"), &AuditConfig::default()).unwrap();
        assert_eq!(snap.font_size_px, None);
        assert_eq!(snap.size_class, SizeClass::Normal);
    }

    #[test]
    fn whitespace_only_text_is_invisible_to_audit() {
        let summary = audit_elements(&[raw("   ", "#eee", "#fff", "16px")], &AuditConfig::default());
        assert_eq!(summary.total, 0);
        assert!(summary.violations.is_empty());
    }

    #[test]
    fn unparseable_color_excluded_from_total() {
        let elements = [
            raw("bad fg", "currentcolor", "#fff", "16px"),
            raw("bad bg", "#000", "rgb(1, 2)", "16px"),
            raw("good", "#000", "#fff", "16px"),
        ];
        assert_eq!(build_snapshot(&elements[0], &AuditConfig::default()), Err(Exclusion::UnparseableColor));
        let summary = audit_elements(&elements, &AuditConfig::default());
        assert_eq!(summary.total, 1);
        assert!(summary.violations.is_empty());
        assert_eq!(summary.pass_ratio, 1.0);
    }

    #[test]
    fn white_on_white_violation_suggests_black() {
        let summary = audit_elements(
            &[raw("invisible ink", "rgb(255, 255, 255)", "rgb(255, 255, 255)", "16px")],
            &AuditConfig::default(),
        );
        assert_eq!(summary.total, 1);
        let v = &summary.violations[0];
        assert_eq!(v.result.ratio, 1.0);
        assert_eq!(v.result.required, 4.5);
        assert_eq!(v.suggestion, Rgb::BLACK);
        assert_eq!(v.label, "AA Fail");
        assert_eq!(summary.stars, 1);
    }

    #[test]
    fn violation_keeps_full_text() {
        let long = "a".repeat(200);
        let summary = audit_elements(&[raw(&long, "#ccc", "#fff", "16px")], &AuditConfig::default());
        assert_eq!(summary.violations[0].element.text.len(), 200);
    }

    #[test]
    fn target_level_changes_gate() {
        let elements = [raw("mid", "#757575", "#ffffff", "16px")];
        let aa = audit_elements(&elements, &AuditConfig::default());
        let aaa = audit_elements(&elements, &AuditConfig { target: TargetLevel::Aaa, ..Default::default() });
        assert!(aa.violations.is_empty());
        assert_eq!(aaa.violations.len(), 1);
        assert_eq!(aaa.violations[0].label, "AAA Fail");
        assert_eq!(aaa.violations[0].result.required, 7.0);
    }

    #[test]
    fn pages_audited_in_order() {
        let pages: Vec<RenderedPage> = (0..20)
            .map(|i| RenderedPage {
                url: Some(format!("https://example.test/{i}")),
                elements: (0..i).map(|_| raw("t", "#ddd", "#fff", "16px")).collect(),
                screenshot: None,
            })
            .collect();
        let summaries = audit_pages(&pages, &AuditConfig::default());
        assert_eq!(summaries.len(), 20);
        for (i, summary) in summaries.iter().enumerate() {
            assert_eq!(summary.total, i);
            assert_eq!(summary.violations.len(), i);
        }
    }
}
