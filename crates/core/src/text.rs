//! Helpers for the comma-separated list fields used by admin forms.
//!
//! Tags and image URLs travel through forms as a single text value
//! (`"rust, axum, sqlx"`) and are stored as arrays. Optional text columns
//! store `NULL` instead of empty strings.

/// Split a comma-separated value into trimmed, non-empty items.
///
/// `"a, b ,, c"` becomes `["a", "b", "c"]`.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim an optional text value, mapping blank input to `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Store empty lists as `NULL`.
pub fn list_or_none(items: &[String]) -> Option<&[String]> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Sort orders of `0` (the form default) are stored as `NULL` so they sort last.
pub fn sort_order_or_none(order: Option<i32>) -> Option<i32> {
    order.filter(|o| *o != 0)
}
