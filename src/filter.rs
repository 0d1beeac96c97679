//! Category filters and the filter controls that select them.

use crate::effects::ACTIVE_CLASS;
use crate::project::Project;
use crate::rendering::ClassList;
use serde::Serialize;
use std::fmt;

/// Control value meaning "no category restriction"
pub const ALL_SENTINEL: &str = "all";

/// The active category restriction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Interpret a control's `data-filter` value.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SENTINEL {
            Filter::All
        } else {
            Filter::Category(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => ALL_SENTINEL,
            Filter::Category(c) => c,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => project.category == *c,
        }
    }

    /// The subset of `projects` this filter admits, in their original order.
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Filter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A clickable control tagged with the filter it selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterControl {
    pub label: String,
    pub filter: Filter,
    pub classes: ClassList,
}

impl FilterControl {
    pub fn new(label: impl Into<String>, filter: Filter) -> Self {
        let mut classes = ClassList::new();
        classes.add("filter-btn");
        Self {
            label: label.into(),
            filter,
            classes,
        }
    }

    pub fn is_active(&self) -> bool {
        self.classes.contains(ACTIVE_CLASS)
    }
}

/// The set of filter controls on a page.
///
/// At most one control carries the active marker; after any successful
/// `activate` exactly one does.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterControls {
    controls: Vec<FilterControl>,
}

impl FilterControls {
    /// Build controls, keeping only the first active marker found. When
    /// none is marked, the "all" control (or else the first) becomes active.
    pub fn new(mut controls: Vec<FilterControl>) -> Self {
        let first_active = controls
            .iter()
            .position(FilterControl::is_active)
            .or_else(|| controls.iter().position(|c| c.filter == Filter::All))
            .or(if controls.is_empty() { None } else { Some(0) });

        for (i, c) in controls.iter_mut().enumerate() {
            c.classes.set(ACTIVE_CLASS, Some(i) == first_active);
        }
        Self { controls }
    }

    /// One control per filter value, labelled by the value itself.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(
            values
                .into_iter()
                .map(|v| FilterControl::new(v, Filter::parse(v)))
                .collect(),
        )
    }

    pub fn controls(&self) -> &[FilterControl] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FilterControl> {
        self.controls.get(index)
    }

    pub fn active(&self) -> Option<&FilterControl> {
        self.controls.iter().find(|c| c.is_active())
    }

    /// Move the active marker to the control for `filter`. Returns false
    /// and leaves the markers untouched when no control selects it.
    pub fn activate(&mut self, filter: &Filter) -> bool {
        let Some(target) = self.controls.iter().position(|c| c.filter == *filter) else {
            return false;
        };
        for (i, c) in self.controls.iter_mut().enumerate() {
            c.classes.set(ACTIVE_CLASS, i == target);
        }
        true
    }
}
