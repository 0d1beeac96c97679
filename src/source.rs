//! Project sources: where the portfolio collection comes from.
//!
//! The renderer only sees the `ProjectSource` trait. `HttpSource` performs a
//! blocking GET (feature `http`), `FileSource` reads a JSON file from disk and
//! `StaticSource` serves an in-memory collection.

use crate::project::{parse_projects, Project};
use crate::Result;
use std::path::PathBuf;

#[cfg(feature = "http")]
use crate::{Error, PortfolioConfig};
#[cfg(feature = "http")]
use reqwest::blocking::Client;
#[cfg(feature = "http")]
use std::time::Duration;

/// A retrievable resource returning the project collection.
///
/// Fetching is all-or-nothing: either the whole collection is returned or
/// an error describing why the load failed.
pub trait ProjectSource: Send {
    fn fetch(&mut self) -> Result<Vec<Project>>;

    /// Human-readable location, used in log messages
    fn describe(&self) -> String;
}

/// Serves a fixed collection. Useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    projects: Vec<Project>,
}

impl StaticSource {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }
}

impl ProjectSource for StaticSource {
    fn fetch(&mut self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    fn describe(&self) -> String {
        format!("static({} projects)", self.projects.len())
    }
}

/// Reads the collection from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProjectSource for FileSource {
    fn fetch(&mut self) -> Result<Vec<Project>> {
        let body = std::fs::read_to_string(&self.path)?;
        parse_projects(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the collection over HTTP.
///
/// A response with a non-success status is a load failure even if it
/// carries a body.
#[cfg(feature = "http")]
pub struct HttpSource {
    client: Client,
    url: url::Url,
    user_agent: String,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// Build a source for `config.source` resolved against `base`.
    ///
    /// `config.source` may be absolute (`https://…/projects.json`) or
    /// relative to the page (`projects.json`).
    pub fn new(base: &str, config: &PortfolioConfig) -> Result<Self> {
        let base = url::Url::parse(base)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL '{}': {}", base, e)))?;
        let url = base.join(&config.source).map_err(|e| {
            Error::ConfigError(format!("Invalid source '{}': {}", config.source, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Build a source for an absolute URL.
    pub fn from_url(url: &str, config: &PortfolioConfig) -> Result<Self> {
        let config = PortfolioConfig {
            source: url.to_string(),
            ..config.clone()
        };
        Self::new(url, &config)
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

#[cfg(feature = "http")]
impl ProjectSource for HttpSource {
    fn fetch(&mut self) -> Result<Vec<Project>> {
        let res = self
            .client
            .get(self.url.clone())
            .header("User-Agent", self.user_agent.clone())
            .send()?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::LoadError(status.as_u16()));
        }

        let body = res
            .text()
            .map_err(|e| Error::NetworkError(format!("Failed to read response body: {}", e)))?;
        parse_projects(&body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
