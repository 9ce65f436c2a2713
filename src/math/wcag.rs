use crate::types::{Level, Rgb, SizeClass, TargetLevel};

/// Normal text: AA at 4.5:1, AAA at 7:1.
pub const NORMAL_AA: f64 = 4.5;
pub const NORMAL_AAA: f64 = 7.0;
/// Large text: AA at 3:1, AAA at 4.5:1.
pub const LARGE_AA: f64 = 3.0;
pub const LARGE_AAA: f64 = 4.5;

/// Convert an sRGB channel (0-255) to linear light.
/// WCAG 2.x: V <= 0.03928 ? V/12.92 : ((V+0.055)/1.055)^2.4
fn srgb_to_linear(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.x, in [0, 1].
/// L = 0.2126 * R + 0.7152 * G + 0.0722 * B (linear channels)
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * srgb_to_linear(color.r) + 0.7152 * srgb_to_linear(color.g) + 0.0722 * srgb_to_linear(color.b)
}

/// WCAG contrast ratio, in [1, 21]. Argument order does not matter.
/// ratio = (L1 + 0.05) / (L2 + 0.05) where L1 >= L2
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Three-tier classification used for labelling and reporting.
pub fn classify(ratio: f64, size: SizeClass) -> Level {
    let (aa, aaa) = thresholds(size);
    if ratio >= aaa {
        Level::Aaa
    } else if ratio >= aa {
        Level::Aa
    } else {
        Level::Fail
    }
}

/// Minimum ratio an element must reach to pass the scan-time gate.
pub fn required_ratio(size: SizeClass, target: TargetLevel) -> f64 {
    let (aa, aaa) = thresholds(size);
    match target {
        TargetLevel::Aa => aa,
        TargetLevel::Aaa => aaa,
    }
}

fn thresholds(size: SizeClass) -> (f64, f64) {
    match size {
        SizeClass::Large => (LARGE_AA, LARGE_AAA),
        SizeClass::Normal => (NORMAL_AA, NORMAL_AAA),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Rgb {
        crate::math::hex::parse_hex_rgb(s).unwrap()
    }

    #[test]
    fn black_on_white_is_exactly_21() {
        assert_eq!(contrast_ratio(Rgb::BLACK, Rgb::WHITE), 21.0);
    }

    #[test]
    fn same_color_is_exactly_1() {
        for c in [Rgb::WHITE, Rgb::BLACK, hex("#767676"), hex("#1e293b"), hex("#ff0080")] {
            assert_eq!(contrast_ratio(c, c), 1.0);
        }
    }

    #[test]
    fn order_independent() {
        let pairs = [("#ff0000", "#ffffff"), ("#a1a1aa", "#09090b"), ("#123456", "#fedcba")];
        for (a, b) in pairs {
            assert_eq!(contrast_ratio(hex(a), hex(b)), contrast_ratio(hex(b), hex(a)));
        }
    }

    #[test]
    fn gray_on_white() {
        let ratio = contrast_ratio(hex("#767676"), Rgb::WHITE);
        assert!((ratio - 4.54).abs() < 0.01, "got {ratio}");
    }

    #[test]
    fn red_on_white() {
        let ratio = contrast_ratio(hex("#ff0000"), Rgb::WHITE);
        assert!((ratio - 4.0).abs() < 0.01, "got {ratio}");
    }

    #[test]
    fn slate_on_white() {
        let ratio = contrast_ratio(hex("#1e293b"), Rgb::WHITE);
        assert!((ratio - 14.63).abs() < 0.05, "got {ratio}");
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(relative_luminance(Rgb::BLACK), 0.0);
        assert!((relative_luminance(Rgb::WHITE) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn low_channel_uses_linear_segment() {
        // 10/255 = 0.0392 sits just under the 0.03928 knee
        let l = relative_luminance(Rgb::gray(10));
        assert!((l - (10.0 / 255.0) / 12.92).abs() < 1e-12);
    }

    #[test]
    fn large_text_boundaries() {
        assert_eq!(classify(4.5, SizeClass::Large), Level::Aaa);
        assert_eq!(classify(3.0, SizeClass::Large), Level::Aa);
        assert_eq!(classify(2.99, SizeClass::Large), Level::Fail);
    }

    #[test]
    fn normal_text_boundaries() {
        assert_eq!(classify(7.0, SizeClass::Normal), Level::Aaa);
        assert_eq!(classify(4.5, SizeClass::Normal), Level::Aa);
        assert_eq!(classify(6.99, SizeClass::Normal), Level::Aa);
        assert_eq!(classify(4.49, SizeClass::Normal), Level::Fail);
    }

    #[test]
    fn required_ratio_by_target() {
        assert_eq!(required_ratio(SizeClass::Normal, TargetLevel::Aa), 4.5);
        assert_eq!(required_ratio(SizeClass::Large, TargetLevel::Aa), 3.0);
        assert_eq!(required_ratio(SizeClass::Normal, TargetLevel::Aaa), 7.0);
        assert_eq!(required_ratio(SizeClass::Large, TargetLevel::Aaa), 4.5);
    }
}
