//! Tests for the async portfolio handle

use folio::effects::IntersectionEntry;
use folio::{
    Error, Filter, FilterControls, GridContent, Portfolio, PortfolioConfig, Project,
    ProjectSource, StaticSource,
};
use std::time::Duration;

/// A source that takes a while to answer, standing in for a slow network
struct SlowSource {
    delay: Duration,
    projects: Vec<Project>,
}

impl ProjectSource for SlowSource {
    fn fetch(&mut self) -> folio::Result<Vec<Project>> {
        std::thread::sleep(self.delay);
        Ok(self.projects.clone())
    }

    fn describe(&self) -> String {
        "slow".into()
    }
}

fn projects() -> Vec<Project> {
    vec![Project::new("A", "web"), Project::new("B", "design")]
}

#[tokio::test]
async fn filter_waits_for_in_flight_load() {
    let controls = FilterControls::from_values(["all", "web", "design"]);
    let portfolio = Portfolio::spawn_with_controls(PortfolioConfig::default(), controls, |_| {
        Ok(Box::new(SlowSource {
            delay: Duration::from_millis(150),
            projects: projects(),
        }) as Box<dyn ProjectSource>)
    })
    .await
    .expect("spawn");

    let pending = portfolio.begin_load().unwrap();
    // Sent while the load is still running; must see the loaded collection.
    let grid = portfolio.filter(Filter::parse("web")).await.unwrap();
    assert_eq!(grid.titles(), vec!["A"]);

    // The load reset the marker to "all"; the filter then moved it.
    let controls = portfolio.controls().await.unwrap();
    let active: Vec<&str> = controls
        .controls()
        .iter()
        .filter(|c| c.is_active())
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(active, vec!["web"]);

    assert_eq!(pending.await.unwrap().unwrap(), 2);
    portfolio.close().await.unwrap();
}

#[tokio::test]
async fn filter_all_after_filter() {
    let portfolio = Portfolio::spawn(PortfolioConfig::default(), |_| {
        Ok(Box::new(StaticSource::new(projects())) as Box<dyn ProjectSource>)
    })
    .await
    .unwrap();

    portfolio.load().await.unwrap();
    portfolio.filter(Filter::parse("design")).await.unwrap();
    let grid = portfolio.filter(Filter::All).await.unwrap();
    assert_eq!(grid.titles(), vec!["A", "B"]);
    assert_eq!(portfolio.projects().await.unwrap(), projects());

    let empty = portfolio.render(Vec::new()).await.unwrap();
    assert_eq!(empty, GridContent::Empty);
    portfolio.close().await.unwrap();
}

#[tokio::test]
async fn reveal_through_handle() {
    let config = PortfolioConfig {
        observe_delay: Duration::from_millis(100),
        ..Default::default()
    };
    let portfolio = Portfolio::spawn(config, |_| {
        Ok(Box::new(StaticSource::new(projects())) as Box<dyn ProjectSource>)
    })
    .await
    .unwrap();

    portfolio.load().await.unwrap();
    let id = portfolio.grid().await.unwrap().cards()[0].id;

    let none = portfolio.intersect(vec![IntersectionEntry::new(id, 1.0)]).await.unwrap();
    assert!(none.is_empty());

    portfolio.advance(Duration::from_millis(100)).await.unwrap();
    let revealed = portfolio.intersect(vec![IntersectionEntry::new(id, 1.0)]).await.unwrap();
    assert_eq!(revealed, vec![id]);
    assert!(portfolio.grid().await.unwrap().cards()[0].is_revealed());
    portfolio.close().await.unwrap();
}

#[tokio::test]
async fn source_construction_failure_is_reported() {
    let res = Portfolio::spawn(PortfolioConfig::default(), |_| {
        Err(Error::ConfigError("no source".into()))
    })
    .await;
    assert!(matches!(res, Err(Error::ConfigError(_))));
}

#[tokio::test]
async fn closed_handle_rejects_commands() {
    let portfolio = Portfolio::spawn(PortfolioConfig::default(), |_| {
        Ok(Box::new(StaticSource::default()) as Box<dyn ProjectSource>)
    })
    .await
    .unwrap();
    assert!(portfolio.controls().await.unwrap().is_empty());
    let other = portfolio.clone();
    portfolio.close().await.unwrap();

    // Give the worker a moment to drop its receiver
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(other.grid().await.is_err());
}
