//! Engineering notation for reported values.

/// Format a value with an SI prefix and unit, e.g. `4.7 kΩ`.
pub fn format_value(value: f64, unit: &str) -> String {
    let abs_value = value.abs();

    let (scaled, prefix) = if abs_value == 0.0 || !abs_value.is_finite() {
        (value, "")
    } else if abs_value >= 1e9 {
        (value / 1e9, "G")
    } else if abs_value >= 1e6 {
        (value / 1e6, "M")
    } else if abs_value >= 1e3 {
        (value / 1e3, "k")
    } else if abs_value >= 1.0 {
        (value, "")
    } else if abs_value >= 1e-3 {
        (value * 1e3, "m")
    } else if abs_value >= 1e-6 {
        (value * 1e6, "µ")
    } else if abs_value >= 1e-9 {
        (value * 1e9, "n")
    } else {
        (value * 1e12, "p")
    };

    // At most four decimal places, without trailing zeros
    let text = format!("{:.4}", scaled);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}{}", text, prefix, unit)
}
