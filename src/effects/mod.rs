//! Page effects: scroll reveal, navbar styling and the mobile menu toggle.
//!
//! These collaborators hold no page state of their own beyond what they are
//! handed; the `Page` owns the class lists and styles they act on.

pub mod menu;
pub mod navbar;
pub mod reveal;

pub use menu::MenuToggle;
pub use navbar::NavbarStyler;
pub use reveal::{intersection_ratio, ElementId, IntersectionEntry, Rect, RevealObserver};

/// Class applied to an element once it has been revealed
pub const ACTIVE_CLASS: &str = "active";
