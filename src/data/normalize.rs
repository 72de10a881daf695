//! Key normalization shared by every identifier lookup.

/// Lowercase form with everything except ASCII alphanumerics, `_` and
/// whitespace removed, trimmed. Absorbs punctuation and diacritic differences
/// such as "Bosnia-Herzegovina" vs "BosniaHerzegovina" or "Côte" vs "Cte".
pub fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_' || ch.is_whitespace())
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Lowercased, trimmed form used as the primary (exact) lookup key.
pub fn exact_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Uppercased token when `value` is exactly `len` ASCII letters after trimming.
pub fn letter_token(value: &str, len: usize) -> Option<String> {
    let trimmed = value.trim();
    (trimmed.len() == len && trimmed.bytes().all(|b| b.is_ascii_alphabetic()))
        .then(|| trimmed.to_ascii_uppercase())
}

/// Digits-only identifier with leading zeros dropped, so "004" and "4" agree.
pub fn numeric_token(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let stripped = trimmed.trim_start_matches('0');
    Some(if stripped.is_empty() { "0" } else { stripped }.to_string())
}
