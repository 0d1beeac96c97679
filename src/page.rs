//! Host page model: discovers the page's interactive surfaces from its HTML
//! and routes page events to the renderer and effects.

use crate::effects::{
    ElementId, IntersectionEntry, MenuToggle, NavbarStyler, Rect, ACTIVE_CLASS,
};
use crate::filter::{Filter, FilterControl, FilterControls};
use crate::renderer::PortfolioRenderer;
use crate::rendering::{ClassList, GridContent, InlineStyle};
use crate::source::ProjectSource;
use crate::{Error, PortfolioConfig, Result};
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::time::Duration;

const GRID_SELECTOR: &str = "#portfolio-grid";
const NAVBAR_SELECTOR: &str = ".navbar";
const FILTER_SELECTOR: &str = ".filter-btn";
const HAMBURGER_SELECTOR: &str = ".hamburger";
const MENU_SELECTOR: &str = ".nav-links";
const REVEAL_SELECTOR: &str = ".reveal";

/// A pre-existing page element animated on scroll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealTarget {
    pub id: ElementId,
    /// The element's `id` attribute, or its tag name
    pub name: String,
    pub classes: ClassList,
}

impl RevealTarget {
    pub fn is_revealed(&self) -> bool {
        self.classes.contains(ACTIVE_CLASS)
    }
}

/// Serializable view of all presentation state on the page.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub scroll_y: f64,
    pub navbar_class: Option<String>,
    pub menu_style: Option<String>,
    pub menu_open: bool,
    pub filters: FilterControls,
    pub current_filter: Filter,
    pub grid: GridContent,
    pub grid_html: String,
    pub reveal_targets: Vec<RevealTarget>,
}

pub struct Page {
    renderer: PortfolioRenderer,
    navbar: Option<ClassList>,
    navbar_styler: NavbarStyler,
    menu: Option<InlineStyle>,
    has_hamburger: bool,
    menu_toggle: MenuToggle,
    reveal_targets: Vec<RevealTarget>,
    scroll_y: f64,
}

impl Page {
    /// Discover the page structure from `html`.
    ///
    /// Only the portfolio grid container is required; pages without a
    /// navbar, filters or hamburger simply ignore those events. Static
    /// `.reveal` elements are observed straight away.
    pub fn from_html(
        html: &str,
        config: PortfolioConfig,
        source: Box<dyn ProjectSource>,
    ) -> Result<Self> {
        config.validate()?;
        let document = Html::parse_document(html);

        if document.select(&selector(GRID_SELECTOR)?).next().is_none() {
            return Err(Error::PageError(format!("no {} element", GRID_SELECTOR)));
        }

        let navbar = document
            .select(&selector(NAVBAR_SELECTOR)?)
            .next()
            .map(|el| ClassList::parse(el.value().attr("class").unwrap_or_default()));
        if navbar.is_none() {
            warn!("page has no {} element; scroll styling disabled", NAVBAR_SELECTOR);
        }

        let controls = FilterControls::new(
            document
                .select(&selector(FILTER_SELECTOR)?)
                .filter_map(filter_control)
                .collect(),
        );

        let has_hamburger = document.select(&selector(HAMBURGER_SELECTOR)?).next().is_some();
        let menu = document
            .select(&selector(MENU_SELECTOR)?)
            .next()
            .map(|el| InlineStyle::parse(el.value().attr("style").unwrap_or_default()));
        if has_hamburger && menu.is_none() {
            warn!("page has a menu toggle but no {} container", MENU_SELECTOR);
        }

        let navbar_styler = NavbarStyler::new(config.navbar_threshold);
        let mut renderer = PortfolioRenderer::new(config, source).with_controls(controls);

        let observer = renderer.observer_mut();
        let reveal_targets: Vec<RevealTarget> = document
            .select(&selector(REVEAL_SELECTOR)?)
            .map(|el| {
                let id = observer.allocate();
                observer.observe(id);
                RevealTarget {
                    id,
                    name: el.value().id().unwrap_or(el.value().name()).to_string(),
                    classes: ClassList::parse(el.value().attr("class").unwrap_or_default()),
                }
            })
            .collect();

        debug!(
            "page discovered: {} filters, {} reveal targets, hamburger: {}",
            renderer.controls().len(),
            reveal_targets.len(),
            has_hamburger
        );

        Ok(Self {
            renderer,
            navbar,
            navbar_styler,
            menu,
            has_hamburger,
            menu_toggle: MenuToggle::new(),
            reveal_targets,
            scroll_y: 0.0,
        })
    }

    /// Page-load work: fetch and render the portfolio.
    pub fn start(&mut self) -> Result<usize> {
        self.renderer.load()
    }

    /// Scroll event at vertical offset `y`.
    pub fn scroll(&mut self, y: f64) {
        self.scroll_y = y;
        if let Some(navbar) = self.navbar.as_mut() {
            self.navbar_styler.on_scroll(y, navbar);
        }
    }

    /// Click on the filter control at `index`. Returns false if there is no
    /// such control.
    pub fn click_filter(&mut self, index: usize) -> bool {
        let Some(filter) = self.renderer.controls().get(index).map(|c| c.filter.clone()) else {
            return false;
        };
        self.renderer.filter(&filter);
        true
    }

    /// Click on the filter control whose value is `value`.
    pub fn click_filter_value(&mut self, value: &str) -> bool {
        let filter = Filter::parse(value);
        match self
            .renderer
            .controls()
            .controls()
            .iter()
            .position(|c| c.filter == filter)
        {
            Some(index) => self.click_filter(index),
            None => false,
        }
    }

    /// Click on the menu toggle. Returns the menu's new open state, or
    /// `None` when the page has no toggle or menu.
    pub fn toggle_menu(&mut self) -> Option<bool> {
        if !self.has_hamburger {
            return None;
        }
        let menu = self.menu.as_mut()?;
        Some(self.menu_toggle.toggle(menu))
    }

    /// Visibility reports for observed elements.
    pub fn intersect(&mut self, entries: &[IntersectionEntry]) -> Vec<ElementId> {
        let revealed = self.renderer.intersect(entries);
        for target in self.reveal_targets.iter_mut() {
            if revealed.contains(&target.id) {
                target.classes.add(ACTIVE_CLASS);
            }
        }
        revealed
    }

    /// Compute visibility from element bounds against `viewport` and
    /// process it.
    pub fn observe_viewport(
        &mut self,
        viewport: &Rect,
        bounds: &[(ElementId, Rect)],
    ) -> Vec<ElementId> {
        let entries: Vec<IntersectionEntry> = bounds
            .iter()
            .map(|(id, rect)| IntersectionEntry::from_bounds(*id, rect, viewport))
            .collect();
        self.intersect(&entries)
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.renderer.advance(elapsed);
    }

    pub fn image_error(&mut self, id: ElementId) -> bool {
        self.renderer.image_error(id)
    }

    pub fn renderer(&self) -> &PortfolioRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut PortfolioRenderer {
        &mut self.renderer
    }

    pub fn navbar(&self) -> Option<&ClassList> {
        self.navbar.as_ref()
    }

    pub fn menu(&self) -> Option<&InlineStyle> {
        self.menu.as_ref()
    }

    pub fn reveal_targets(&self) -> &[RevealTarget] {
        &self.reveal_targets
    }

    pub fn grid_html(&self) -> String {
        self.renderer.grid().to_html()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            scroll_y: self.scroll_y,
            navbar_class: self.navbar.as_ref().map(ClassList::to_attr),
            menu_style: self.menu.as_ref().map(InlineStyle::to_attr),
            menu_open: self.menu.as_ref().map(MenuToggle::is_open).unwrap_or(false),
            filters: self.renderer.controls().clone(),
            current_filter: self.renderer.current_filter().clone(),
            grid: self.renderer.grid().clone(),
            grid_html: self.grid_html(),
            reveal_targets: self.reveal_targets.clone(),
        }
    }
}

fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| Error::Other(format!("Invalid selector '{}': {:?}", s, e)))
}

fn filter_control(el: ElementRef<'_>) -> Option<FilterControl> {
    let Some(value) = el.value().attr("data-filter") else {
        warn!("filter control without data-filter ignored");
        return None;
    };
    Some(FilterControl {
        label: el.text().collect::<String>().trim().to_string(),
        filter: Filter::parse(value),
        classes: ClassList::parse(el.value().attr("class").unwrap_or_default()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Project;
    use crate::source::StaticSource;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<nav class="navbar">
  <ul class="nav-links"><li>Work</li></ul>
  <div class="hamburger"></div>
</nav>
<section id="hero" class="hero reveal"><h1>Hi</h1></section>
<div class="filters">
  <button class="filter-btn active" data-filter="all">All</button>
  <button class="filter-btn" data-filter="web">Web</button>
  <button class="filter-btn" data-filter="design">Design</button>
</div>
<div id="portfolio-grid"></div>
</body></html>"#;

    fn page() -> Page {
        let source = StaticSource::new(vec![Project::new("A", "web"), Project::new("B", "design")]);
        Page::from_html(PAGE, PortfolioConfig::default(), Box::new(source)).unwrap()
    }

    #[test]
    fn discovers_surfaces() {
        let p = page();
        assert_eq!(p.renderer().controls().len(), 3);
        assert_eq!(p.renderer().controls().active().unwrap().label, "All");
        assert_eq!(p.reveal_targets().len(), 1);
        assert_eq!(p.reveal_targets()[0].name, "hero");
        assert!(p.renderer().observer().is_observed(p.reveal_targets()[0].id));
    }

    #[test]
    fn missing_grid_is_an_error() {
        let err = Page::from_html(
            "<html><body></body></html>",
            PortfolioConfig::default(),
            Box::new(StaticSource::default()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::PageError(_)));
    }

    #[test]
    fn filter_clicks_move_marker() {
        let mut p = page();
        p.start().unwrap();
        assert!(p.click_filter_value("web"));
        assert_eq!(p.renderer().grid().titles(), vec!["A"]);
        let active: Vec<_> = p
            .renderer()
            .controls()
            .controls()
            .iter()
            .filter(|c| c.is_active())
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Web");
        assert!(!p.click_filter(9));
        assert!(!p.click_filter_value("print"));
    }

    #[test]
    fn scroll_toggles_navbar() {
        let mut p = page();
        p.scroll(0.0);
        assert!(!p.navbar().unwrap().contains("scrolled"));
        p.scroll(51.0);
        assert!(p.navbar().unwrap().contains("scrolled"));
        p.scroll(0.0);
        assert!(!p.navbar().unwrap().contains("scrolled"));
    }

    #[test]
    fn menu_toggle() {
        let mut p = page();
        assert_eq!(p.toggle_menu(), Some(true));
        assert_eq!(p.menu().unwrap().get("position"), Some("absolute"));
        assert_eq!(p.toggle_menu(), Some(false));

        let mut bare = Page::from_html(
            "<div id=\"portfolio-grid\"></div>",
            PortfolioConfig::default(),
            Box::new(StaticSource::default()),
        )
        .unwrap();
        assert_eq!(bare.toggle_menu(), None);
    }

    #[test]
    fn viewport_reveals_static_and_cards() {
        let mut p = page();
        p.start().unwrap();
        let hero = p.reveal_targets()[0].id;
        let card = p.renderer().grid().cards()[0].id;
        let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);
        let revealed = p.observe_viewport(
            &viewport,
            &[
                (hero, Rect::new(0.0, 0.0, 1280.0, 400.0)),
                (card, Rect::new(0.0, 700.0, 300.0, 200.0)),
            ],
        );
        // the card is 10% visible: below the threshold
        assert_eq!(revealed, vec![hero]);
        assert!(p.reveal_targets()[0].is_revealed());
        assert!(!p.renderer().grid().cards()[0].is_revealed());
    }

    #[test]
    fn snapshot_serializes() {
        let mut p = page();
        p.start().unwrap();
        p.scroll(120.0);
        let json = serde_json::to_value(p.snapshot()).unwrap();
        assert_eq!(json["navbar_class"], "navbar scrolled");
        assert_eq!(json["current_filter"], "all");
        assert_eq!(json["grid"]["state"], "cards");
        assert_eq!(json["grid"]["cards"][1]["title"], "B");
    }
}
