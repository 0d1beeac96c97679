/// Mobile menu show/hide.

use crate::rendering::InlineStyle;

// Declarations applied when the menu opens, so it overlays below the navbar.
const OPEN_LAYOUT: &[(&str, &str)] = &[
    ("flex-direction", "column"),
    ("position", "absolute"),
    ("top", "100%"),
    ("left", "0"),
    ("width", "100%"),
    ("background", "var(--bg-color)"),
    ("padding", "2rem"),
    ("border-bottom", "1px solid var(--border-color)"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct MenuToggle;

impl MenuToggle {
    pub fn new() -> Self {
        MenuToggle
    }

    pub fn is_open(menu: &InlineStyle) -> bool {
        menu.get("display") == Some("flex")
    }

    /// Flip the menu between hidden and a column-flex overlay; returns
    /// whether it is now open.
    pub fn toggle(&self, menu: &mut InlineStyle) -> bool {
        if Self::is_open(menu) {
            menu.set("display", "none");
            return false;
        }
        menu.set("display", "flex");
        for (property, value) in OPEN_LAYOUT {
            menu.set(property, value);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_display() {
        let toggle = MenuToggle::new();
        let mut menu = InlineStyle::new();

        assert!(toggle.toggle(&mut menu));
        assert_eq!(menu.get("display"), Some("flex"));
        assert_eq!(menu.get("flex-direction"), Some("column"));
        assert_eq!(menu.get("top"), Some("100%"));
        assert_eq!(menu.get("border-bottom"), Some("1px solid var(--border-color)"));

        assert!(!toggle.toggle(&mut menu));
        assert_eq!(menu.get("display"), Some("none"));
        assert!(toggle.toggle(&mut menu));
        assert!(MenuToggle::is_open(&menu));
    }

    #[test]
    fn hidden_by_stylesheet_counts_as_closed() {
        let toggle = MenuToggle::new();
        let mut menu = InlineStyle::parse("display: none");
        assert!(toggle.toggle(&mut menu));
    }
}
