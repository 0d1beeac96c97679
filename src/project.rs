//! Project records as supplied by the portfolio data source.

use crate::Result;
use serde::Deserialize;

/// Anchor used for cards whose project has no link
pub const PLACEHOLDER_LINK: &str = "#";

/// A single portfolio entry.
///
/// Records are read-only once loaded. Missing text fields decode to empty
/// strings so a sparse entry still renders as a card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    /// Filter key; compared exactly against filter control values
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl Project {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            image: String::new(),
            link: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Link target for this project's card; empty or absent links fall back
    /// to the placeholder anchor.
    pub fn href(&self) -> &str {
        match self.link.as_deref() {
            Some(link) if !link.is_empty() => link,
            _ => PLACEHOLDER_LINK,
        }
    }
}

/// Decode a project collection from the JSON list served by the data source.
pub fn parse_projects(body: &str) -> Result<Vec<Project>> {
    let projects: Vec<Project> = serde_json::from_str(body)?;
    Ok(projects)
}
