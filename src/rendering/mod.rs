//! Rendering: typed grid content and its markup.

pub mod card;
pub mod style;

pub use card::{Card, CardImage, CardOptions};
pub use style::{ClassList, InlineStyle};

use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Loading projects...";
pub const FAILURE_MESSAGE: &str = "Sorry, failed to load projects.";
pub const EMPTY_MESSAGE: &str = "No projects found.";

/// What the portfolio grid currently displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "cards", rename_all = "snake_case")]
pub enum GridContent {
    Loading,
    Failed,
    #[default]
    Empty,
    Cards(Vec<Card>),
}

impl GridContent {
    /// Status message shown instead of cards, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            GridContent::Loading => Some(LOADING_MESSAGE),
            GridContent::Failed => Some(FAILURE_MESSAGE),
            GridContent::Empty => Some(EMPTY_MESSAGE),
            GridContent::Cards(_) => None,
        }
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            GridContent::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        match self {
            GridContent::Cards(cards) => cards,
            _ => &mut [],
        }
    }

    /// Card titles in display order.
    pub fn titles(&self) -> Vec<&str> {
        self.cards().iter().map(|c| c.title.as_str()).collect()
    }

    /// Inner markup of the grid container.
    pub fn to_html(&self) -> String {
        match self.message() {
            Some(msg) => format!("<div class=\"loading\">{}</div>", msg),
            None => self.cards().iter().map(Card::to_html).collect(),
        }
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
