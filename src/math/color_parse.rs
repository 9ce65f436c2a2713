use crate::types::Rgb;

/// Parse a computed CSS color into RGB.
///
/// Accepts `#RGB` / `#RRGGBB`, or any notation carrying at least three
/// decimal integers (`rgb(12, 34, 56)`, `rgba(12, 34, 56, 0.5)`,
/// `rgb(12 34 56 / 50%)`). The first three digit runs become the channels;
/// anything after them, alpha included, is ignored.
///
/// Returns `None` for empty input, fewer than three numbers, a number above
/// 255, or malformed hex.
pub fn parse_color(raw: &str) -> Option<Rgb> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('#') {
        return super::hex::parse_hex_rgb(trimmed);
    }

    let mut channels = [0u8; 3];
    let mut found = 0;
    for token in integer_tokens(trimmed).take(3) {
        channels[found] = u8::try_from(token.parse::<u32>().ok()?).ok()?;
        found += 1;
    }
    if found < 3 {
        return None;
    }
    Some(Rgb::new(channels[0], channels[1], channels[2]))
}

/// Maximal runs of ASCII digits, in order.
fn integer_tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_ascii_digit()).filter(|t| !t.is_empty())
}

/// Read a CSS font size the way `parseFloat` does: the leading numeric
/// prefix wins and any unit suffix is dropped (`"16px"` -> 16.0).
pub fn parse_font_size(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_comma_format() {
        assert_eq!(parse_color("rgb(255, 0, 128)"), Some(Rgb::new(255, 0, 128)));
    }

    #[test]
    fn rgb_space_format() {
        assert_eq!(parse_color("rgb(255 0 0)"), Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn rgba_alpha_ignored() {
        assert_eq!(parse_color("rgba(10, 20, 30, 0.5)"), Some(Rgb::new(10, 20, 30)));
        // fully transparent still resolves to its channels
        assert_eq!(parse_color("rgba(0, 0, 0, 0)"), Some(Rgb::BLACK));
    }

    #[test]
    fn hex_notations() {
        assert_eq!(parse_color("#FFF"), Some(Rgb::WHITE));
        assert_eq!(parse_color("  #1e293b "), Some(Rgb::new(30, 41, 59)));
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn too_few_numbers() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("   "), None);
        assert_eq!(parse_color("rgb(1, 2)"), None);
        assert_eq!(parse_color("transparent"), None);
        assert_eq!(parse_color("red"), None);
    }

    #[test]
    fn channel_above_255_rejected() {
        assert_eq!(parse_color("rgb(256, 0, 0)"), None);
        assert_eq!(parse_color("rgb(99999999999, 0, 0)"), None);
    }

    #[test]
    fn round_trips_through_hex() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(17) {
                for b in [0u8, 1, 127, 128, 254, 255] {
                    let c = Rgb::new(r, g, b);
                    assert_eq!(parse_color(&crate::math::hex::rgb_to_hex(c)), Some(c));
                }
            }
        }
    }

    #[test]
    fn font_size_prefix() {
        assert_eq!(parse_font_size("16px"), Some(16.0));
        assert_eq!(parse_font_size("18.5px"), Some(18.5));
        assert_eq!(parse_font_size(" 24"), Some(24.0));
        assert_eq!(parse_font_size(".75rem"), Some(0.75));
        assert_eq!(parse_font_size("12.px"), Some(12.0));
    }

    #[test]
    fn font_size_unparseable() {
        assert_eq!(parse_font_size(""), None);
        assert_eq!(parse_font_size("px"), None);
        assert_eq!(parse_font_size("medium"), None);
        assert_eq!(parse_font_size("-"), None);
    }
}
