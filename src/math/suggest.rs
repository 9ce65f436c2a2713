use crate::types::Rgb;

use super::wcag::contrast_ratio;

/// Suggest an accessible foreground for `background`.
///
/// Default build: sweeps grays from black upward and returns the first
/// (darkest) one reaching `required`. Contrast is not monotonic in the gray
/// level, so the sweep never stops early on a miss. When no gray qualifies
/// (always the case for `required > 21`), black is returned.
///
/// With the `coarse-suggestion` feature the build instead picks between pure
/// black and pure white; see [`black_or_white`].
pub fn suggest_color(background: Rgb, required: f64) -> Rgb {
    #[cfg(not(feature = "coarse-suggestion"))]
    {
        grayscale_sweep(background, required)
    }
    #[cfg(feature = "coarse-suggestion")]
    {
        black_or_white(background, required)
    }
}

#[cfg_attr(feature = "coarse-suggestion", allow(dead_code))]
fn grayscale_sweep(background: Rgb, required: f64) -> Rgb {
    (0..=u8::MAX)
        .map(Rgb::gray)
        .find(|&candidate| contrast_ratio(candidate, background) >= required)
        .unwrap_or(Rgb::BLACK)
}

/// Coarse strategy: black if it qualifies, else white if it qualifies,
/// else whichever of the two contrasts more.
#[cfg(feature = "coarse-suggestion")]
pub fn black_or_white(background: Rgb, required: f64) -> Rgb {
    let on_black = contrast_ratio(Rgb::BLACK, background);
    let on_white = contrast_ratio(Rgb::WHITE, background);
    if on_black >= required {
        Rgb::BLACK
    } else if on_white >= required || on_white > on_black {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}
