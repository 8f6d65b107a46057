/// Number of stars in a rating widget.
pub const STAR_COUNT: u8 = 5;

/// Value of one star step.
pub const STAR_STEP: f64 = 0.2;

/// Label submitted for a click on star `n` (1-based), computed as `n * 0.2`:
/// three stars go out as `0.6000000000000001`.
pub fn star_label(n: u8) -> f64 {
    f64::from(n) * STAR_STEP
}

/// Number of stars lit for a stored rating, `round(rating / 0.2)` clamped to the widget.
pub fn active_star_count(rating: f64) -> u8 {
    if !rating.is_finite() {
        return 0;
    }
    let steps = (rating / STAR_STEP).round();
    steps.clamp(0.0, f64::from(STAR_COUNT)) as u8
}

/// Active flag for each star value: a star is active iff its value does not
/// exceed the active count.
pub fn render_stars(star_values: &[u8], rating: f64) -> Vec<bool> {
    let active = active_star_count(rating);
    star_values.iter().map(|value| *value <= active && *value > 0).collect()
}
