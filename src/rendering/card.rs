/// Typed mapping from a project record to portfolio card markup.

use super::escape;
use super::style::ClassList;
use crate::effects::{ElementId, ACTIVE_CLASS};
use crate::project::Project;
use serde::Serialize;

/// Inputs that shape a card beyond its project record.
#[derive(Debug, Clone)]
pub struct CardOptions {
    /// Image substituted when the project's image fails to load
    pub fallback_image: String,
    /// Transition delay added per render position, in seconds
    pub stagger_step_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardImage {
    pub src: String,
    pub alt: String,
    pub fallback_src: String,
}

impl CardImage {
    /// The image failed to load: swap in the fallback.
    pub fn on_error(&mut self) {
        if self.src != self.fallback_src {
            self.src = self.fallback_src.clone();
        }
    }
}

/// One rendered portfolio card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: ElementId,
    pub href: String,
    pub classes: ClassList,
    /// Reveal transition delay in seconds
    pub transition_delay_secs: f64,
    pub image: CardImage,
    pub category: String,
    pub title: String,
}

impl Card {
    /// Build the card for `project` at render position `index`.
    pub fn from_project(
        project: &Project,
        index: usize,
        id: ElementId,
        opts: &CardOptions,
    ) -> Self {
        let mut classes = ClassList::new();
        classes.add("portfolio-card");
        classes.add("reveal");

        Self {
            id,
            href: project.href().to_string(),
            classes,
            transition_delay_secs: stagger_delay(index, opts.stagger_step_secs),
            image: CardImage {
                src: project.image.clone(),
                alt: project.title.clone(),
                fallback_src: opts.fallback_image.clone(),
            },
            category: project.category.clone(),
            title: project.title.clone(),
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.classes.contains(ACTIVE_CLASS)
    }

    pub fn reveal(&mut self) {
        self.classes.add(ACTIVE_CLASS);
    }

    pub fn to_html(&self) -> String {
        // The fallback sits inside a single-quoted JS string in the handler.
        let fallback = self.image.fallback_src.replace('\'', "%27");
        format!(
            concat!(
                "<a href=\"{href}\" class=\"{class}\" style=\"transition-delay: {delay}s;\" data-id=\"{id}\">",
                "<div class=\"card-image-wrapper\">",
                "<img src=\"{src}\" alt=\"{alt}\" class=\"card-image\" onerror=\"this.src='{fallback}';\">",
                "<div class=\"card-overlay\"></div>",
                "<div class=\"card-content\">",
                "<span class=\"card-category\">{category}</span>",
                "<h3 class=\"card-title\">{title}</h3>",
                "</div></div></a>"
            ),
            href = escape(&self.href),
            class = self.classes.to_attr(),
            delay = self.transition_delay_secs,
            id = self.id,
            src = escape(&self.image.src),
            alt = escape(&self.image.alt),
            fallback = escape(&fallback),
            category = escape(&self.category),
            title = escape(&self.title),
        )
    }
}

/// `index × step`, rounded to the millisecond so `3 × 0.1` prints as `0.3`.
pub fn stagger_delay(index: usize, step_secs: f64) -> f64 {
    (index as f64 * step_secs * 1000.0).round() / 1000.0
}
