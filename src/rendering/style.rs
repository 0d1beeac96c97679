//! Presentation-state primitives: class lists and inline styles.

use serde::Serialize;
use std::collections::BTreeSet;

/// An element's class attribute, kept ordered for stable markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassList {
    classes: BTreeSet<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated class attribute.
    pub fn parse(attr: &str) -> Self {
        Self {
            classes: attr.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn add(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add `class` when `on` is true, remove it otherwise.
    pub fn set(&mut self, class: &str, on: bool) {
        if on {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    pub fn to_attr(&self) -> String {
        self.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }
}

/// An element's inline `style` declarations, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute such as `display: none; top: 0`.
    pub fn parse(attr: &str) -> Self {
        let mut style = Self::new();
        for decl in attr.split(';') {
            if let Some((name, value)) = decl.split_once(':') {
                let name = name.trim();
                if !name.is_empty() {
                    style.set(name, value.trim());
                }
            }
        }
        style
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a property, replacing any earlier value in place.
    pub fn set(&mut self, property: &str, value: &str) {
        match self.declarations.iter_mut().find(|(name, _)| name == property) {
            Some(decl) => decl.1 = value.to_string(),
            None => self
                .declarations
                .push((property.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, property: &str) {
        self.declarations.retain(|(name, _)| name != property);
    }

    pub fn to_attr(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_list_toggles() {
        let mut c = ClassList::parse("navbar  sticky");
        assert!(c.contains("navbar"));
        c.set("scrolled", true);
        c.set("scrolled", true);
        assert_eq!(c.to_attr(), "navbar scrolled sticky");
        c.set("scrolled", false);
        assert!(!c.contains("scrolled"));
    }

    #[test]
    fn inline_style_replaces_in_place() {
        let mut s = InlineStyle::parse("display: none; color:red;");
        assert_eq!(s.get("display"), Some("none"));
        s.set("display", "flex");
        s.set("top", "100%");
        assert_eq!(s.to_attr(), "display: flex; color: red; top: 100%;");
        s.remove("color");
        assert_eq!(s.get("color"), None);
    }
}
