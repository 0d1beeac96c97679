//! The portfolio renderer: load, render and filter the project grid.

use crate::effects::{ElementId, IntersectionEntry, RevealObserver};
use crate::filter::{Filter, FilterControls};
use crate::project::Project;
use crate::rendering::{Card, CardOptions, GridContent};
use crate::source::ProjectSource;
use crate::{PortfolioConfig, Result};
use log::{debug, error, warn};
use std::sync::Arc;
use std::time::Duration;

type OnChangeHandler = Arc<dyn Fn(&GridContent) + Send + Sync>;

/// Owns the loaded project collection and everything rendered from it.
///
/// The collection is only ever replaced as a whole by `load`; `render` and
/// `filter` derive new grid content from it without touching it.
pub struct PortfolioRenderer {
    config: PortfolioConfig,
    source: Box<dyn ProjectSource>,
    projects: Vec<Project>,
    grid: GridContent,
    controls: FilterControls,
    current: Filter,
    observer: RevealObserver,
    on_change: Option<OnChangeHandler>,
}

impl PortfolioRenderer {
    pub fn new(config: PortfolioConfig, source: Box<dyn ProjectSource>) -> Self {
        let observer = RevealObserver::new(config.reveal_threshold);
        Self {
            config,
            source,
            projects: Vec::new(),
            grid: GridContent::default(),
            controls: FilterControls::default(),
            current: Filter::All,
            observer,
            on_change: None,
        }
    }

    /// Attach the page's filter controls.
    pub fn with_controls(mut self, controls: FilterControls) -> Self {
        if let Some(active) = controls.active() {
            self.current = active.filter.clone();
        }
        self.controls = controls;
        self
    }

    /// Fetch the collection and render it in full.
    ///
    /// The grid shows the loading indicator while the source is queried. On
    /// failure the grid shows the failure message, the stored collection is
    /// emptied and the error is returned; nothing is retried.
    pub fn load(&mut self) -> Result<usize> {
        self.release_cards();
        self.set_grid(GridContent::Loading);

        match self.source.fetch() {
            Ok(projects) => {
                debug!("loaded {} projects from {}", projects.len(), self.source.describe());
                self.projects = projects;
                self.current = Filter::All;
                self.controls.activate(&Filter::All);
                self.render_current();
                Ok(self.projects.len())
            }
            Err(e) => {
                error!("Error fetching projects from {}: {}", self.source.describe(), e);
                self.projects = Vec::new();
                self.set_grid(GridContent::Failed);
                Err(e)
            }
        }
    }

    /// Replace the grid with one card per record of `subset`, in order.
    pub fn render(&mut self, subset: &[Project]) {
        self.release_cards();
        let opts = self.config.card_options();
        let grid = build_grid(subset, &mut self.observer, &opts, self.config.observe_delay);
        self.set_grid(grid);
    }

    /// Show the records admitted by `filter` and move the active marker to
    /// its control.
    pub fn filter(&mut self, filter: &Filter) {
        if !self.controls.activate(filter) && !self.controls.is_empty() {
            warn!("no filter control selects '{}'", filter);
        }
        self.current = filter.clone();
        self.render_current();
    }

    /// Process visibility reports, revealing any cards that cross the
    /// threshold. Returns every element revealed, cards or not.
    pub fn intersect(&mut self, entries: &[IntersectionEntry]) -> Vec<ElementId> {
        let revealed = self.observer.process(entries);
        self.mark_revealed(&revealed);
        revealed
    }

    /// Apply the active marker to the cards among `ids`.
    pub fn mark_revealed(&mut self, ids: &[ElementId]) {
        for card in self.grid.cards_mut() {
            if ids.contains(&card.id) {
                card.reveal();
            }
        }
    }

    /// A card's image failed to load; swap in the fallback image. Returns
    /// false when no card has this id.
    pub fn image_error(&mut self, id: ElementId) -> bool {
        match self.grid.cards_mut().iter_mut().find(|c| c.id == id) {
            Some(card) => {
                card.image.on_error();
                true
            }
            None => false,
        }
    }

    /// Advance the observer clock so delayed registrations become active.
    pub fn advance(&mut self, elapsed: Duration) {
        self.observer.advance(elapsed);
    }

    /// Register a callback invoked whenever the grid content is replaced.
    pub fn on_change<F>(&mut self, cb: F)
    where
        F: Fn(&GridContent) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(cb));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn grid(&self) -> &GridContent {
        &self.grid
    }

    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    pub fn current_filter(&self) -> &Filter {
        &self.current
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn observer(&self) -> &RevealObserver {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut RevealObserver {
        &mut self.observer
    }

    fn render_current(&mut self) {
        self.release_cards();
        let opts = self.config.card_options();
        let subset = self.current.apply(&self.projects);
        let grid = build_grid(subset, &mut self.observer, &opts, self.config.observe_delay);
        debug!("filter '{}' shows {} cards", self.current, grid.cards().len());
        self.set_grid(grid);
    }

    // Cards about to be replaced no longer need observing.
    fn release_cards(&mut self) {
        for card in self.grid.cards() {
            self.observer.unobserve(card.id);
        }
    }

    fn set_grid(&mut self, grid: GridContent) {
        self.grid = grid;
        if let Some(cb) = &self.on_change {
            cb(&self.grid);
        }
    }
}

fn build_grid<'a, I>(
    subset: I,
    observer: &mut RevealObserver,
    opts: &CardOptions,
    observe_delay: Duration,
) -> GridContent
where
    I: IntoIterator<Item = &'a Project>,
{
    let cards: Vec<Card> = subset
        .into_iter()
        .enumerate()
        .map(|(index, project)| {
            let id = observer.allocate();
            observer.observe_after(id, observe_delay);
            Card::from_project(project, index, id, opts)
        })
        .collect();

    if cards.is_empty() {
        GridContent::Empty
    } else {
        GridContent::Cards(cards)
    }
}
