//! Ingredient name normalization
//!
//! Every reference-table lookup goes through [`normalize_name`].

/// Trim, lower-case, and collapse whitespace runs to a single space
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
