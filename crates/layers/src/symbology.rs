/// Fraction of full green kept at zero intensity, so short idles read orange.
const GREEN_SCALE: f64 = 0.67;

/// Color for an idling duration relative to the longest one in view.
///
/// Long idles are pure red; short ones shade toward orange. A non-positive
/// `max_duration` is treated as full intensity.
pub fn duration_color(duration: f64, max_duration: f64) -> [u8; 3] {
    let intensity = if max_duration > 0.0 && duration.is_finite() {
        (duration / max_duration).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let green = 255.0 * (1.0 - intensity) * GREEN_SCALE;
    [255, green.round() as u8, 0]
}
