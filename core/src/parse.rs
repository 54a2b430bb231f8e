/// Parses a query value the way the tracker firmware sends numbers.
///
/// Surrounding whitespace is ignored, signs and exponents are accepted.
/// Non-finite values (`nan`, `inf`) are not considered numbers.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
