//! Folio: a headless portfolio page enhancer
//!
//! Folio models the scripted parts of a portfolio page without a browser:
//! it loads project records from a static data source, renders them as a
//! filterable card grid, reveals elements once they scroll into view, styles
//! the navbar by scroll offset and toggles the mobile menu. All presentation
//! state lives in typed values a host can inspect or serialize.
//!
//! # Example
//!
//! ```
//! use folio::{Filter, PortfolioConfig, PortfolioRenderer, Project, StaticSource};
//!
//! # fn main() -> folio::Result<()> {
//! let source = StaticSource::new(vec![
//!     Project::new("A", "web"),
//!     Project::new("B", "design"),
//! ]);
//! let mut renderer = PortfolioRenderer::new(PortfolioConfig::default(), Box::new(source));
//! renderer.load()?;
//! renderer.filter(&Filter::parse("web"));
//! assert_eq!(renderer.grid().titles(), vec!["A"]);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

pub mod effects;
pub mod filter;
pub mod page;
pub mod project;
pub mod renderer;
pub mod rendering;
pub mod source;

// Async facade: renderer on a worker thread, commands processed in order
pub mod async_api;

pub use async_api::Portfolio;
pub use filter::{Filter, FilterControl, FilterControls};
pub use page::{Page, PageSnapshot};
pub use project::Project;
pub use renderer::PortfolioRenderer;
pub use rendering::{Card, GridContent};
pub use source::{FileSource, ProjectSource, StaticSource};

#[cfg(feature = "http")]
pub use source::HttpSource;

/// Image shown when a project's own image fails to load
pub const DEFAULT_FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?q=80&w=2564&auto=format&fit=crop";

/// Configuration for a portfolio page
///
/// The defaults reproduce the stock page behavior: projects come from
/// `projects.json` next to the page, elements reveal at 15% visibility,
/// cards stagger by 0.1s and the navbar switches style past 50 units.
///
/// # Examples
///
/// ```
/// let cfg = folio::PortfolioConfig::default();
/// assert_eq!(cfg.source, "projects.json");
/// assert_eq!(cfg.reveal_threshold, 0.15);
/// ```
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Location of the project collection, absolute or relative to the page
    pub source: String,
    /// User agent string sent with HTTP requests
    pub user_agent: String,
    /// Timeout for the collection request in milliseconds
    pub timeout_ms: u64,
    /// Image substituted for cards whose image fails to load
    pub fallback_image: String,
    /// Visible fraction at which an observed element is revealed
    pub reveal_threshold: f64,
    /// Per-card transition delay step in seconds
    pub stagger_step_secs: f64,
    /// Scroll offset above which the navbar is styled as scrolled
    pub navbar_threshold: f64,
    /// Delay before newly rendered cards are observed (zero: immediately)
    pub observe_delay: Duration,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            source: "projects.json".to_string(),
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 30000,
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
            reveal_threshold: 0.15,
            stagger_step_secs: 0.1,
            navbar_threshold: 50.0,
            observe_delay: Duration::ZERO,
        }
    }
}

impl PortfolioConfig {
    /// Reject values that would make the page behave nonsensically.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(Error::ConfigError(format!(
                "reveal_threshold must be within 0..=1, got {}",
                self.reveal_threshold
            )));
        }
        if !self.stagger_step_secs.is_finite() || self.stagger_step_secs < 0.0 {
            return Err(Error::ConfigError(format!(
                "stagger_step_secs must be a non-negative number, got {}",
                self.stagger_step_secs
            )));
        }
        if !self.navbar_threshold.is_finite() {
            return Err(Error::ConfigError(format!(
                "navbar_threshold must be a finite offset, got {}",
                self.navbar_threshold
            )));
        }
        if self.source.trim().is_empty() {
            return Err(Error::ConfigError("source must not be empty".into()));
        }
        Ok(())
    }

    pub fn card_options(&self) -> rendering::CardOptions {
        rendering::CardOptions {
            fallback_image: self.fallback_image.clone(),
            stagger_step_secs: self.stagger_step_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PortfolioConfig::default();
        assert_eq!(config.navbar_threshold, 50.0);
        assert_eq!(config.stagger_step_secs, 0.1);
        assert!(config.observe_delay.is_zero());
        assert!(config.user_agent.starts_with("folio/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        let config = PortfolioConfig {
            reveal_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_non_finite_navbar_threshold() {
        for threshold in [f64::NAN, f64::INFINITY] {
            let config = PortfolioConfig {
                navbar_threshold: threshold,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
        }
        let negative = PortfolioConfig {
            navbar_threshold: -10.0,
            ..Default::default()
        };
        assert!(negative.validate().is_ok());
    }
}
