//! Icon catalogue for portfolio categories.
//!
//! Categories store an icon identifier understood by the frontend. Unknown
//! identifiers render with [`DEFAULT_ICON`].

use crate::error::CoreError;

/// Icon used when a stored identifier is not in the catalogue.
pub const DEFAULT_ICON: &str = "HelpCircle";

/// Icon identifiers an admin may assign to a category.
const AVAILABLE_ICONS: &[&str] = &["Laptop2Icon", "PictureInPictureIcon", "BarChart2"];

/// All selectable icon identifiers, in display order.
pub fn available_icons() -> &'static [&'static str] {
    AVAILABLE_ICONS
}

/// Resolve a stored identifier to a renderable one, falling back to [`DEFAULT_ICON`].
pub fn resolve_icon(name: &str) -> &'static str {
    AVAILABLE_ICONS
        .iter()
        .copied()
        .find(|icon| *icon == name)
        .unwrap_or(DEFAULT_ICON)
}

/// Validate that `name` is a selectable icon identifier.
pub fn validate_icon(name: &str) -> Result<(), CoreError> {
    if AVAILABLE_ICONS.contains(&name) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown icon '{name}'. Must be one of: {AVAILABLE_ICONS:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn known_icons_resolve_to_themselves() {
        for icon in available_icons() {
            assert_eq!(resolve_icon(icon), *icon);
        }
    }

    #[test]
    fn unknown_icon_falls_back_to_default() {
        assert_eq!(resolve_icon("RocketIcon"), DEFAULT_ICON);
        assert_eq!(resolve_icon(""), DEFAULT_ICON);
    }

    #[test]
    fn validate_rejects_unknown_icon() {
        assert!(validate_icon("BarChart2").is_ok());
        assert_matches!(validate_icon("barchart2"), Err(CoreError::Validation(_)));
    }
}
