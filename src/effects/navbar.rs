/// Navbar styling driven by the vertical scroll offset.

use crate::rendering::ClassList;

pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone, Copy)]
pub struct NavbarStyler {
    threshold: f64,
}

impl NavbarStyler {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Apply the scrolled state for offset `scroll_y`; returns whether the
    /// navbar now carries it. Offsets at the threshold count as unscrolled.
    pub fn on_scroll(&self, scroll_y: f64, navbar: &mut ClassList) -> bool {
        let scrolled = scroll_y > self.threshold;
        navbar.set(SCROLLED_CLASS, scrolled);
        scrolled
    }
}
