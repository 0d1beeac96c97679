//! One-shot scroll reveal, modelled on the browser's intersection observer.
//!
//! The observer tracks a set of element ids. The host reports how much of
//! each element is visible; once an observed element reaches the threshold
//! it is reported as revealed and dropped from the set for good.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// Identifier for an element tracked by the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis-aligned bounds in page units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Fraction of `element` that lies inside `viewport`, in `0.0..=1.0`.
pub fn intersection_ratio(element: &Rect, viewport: &Rect) -> f64 {
    let area = element.area();
    if area <= 0.0 {
        return 0.0;
    }
    element
        .intersection(viewport)
        .map(|i| (i.area() / area).min(1.0))
        .unwrap_or(0.0)
}

/// A visibility report for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: ElementId, ratio: f64) -> Self {
        Self { target, ratio }
    }

    pub fn from_bounds(target: ElementId, element: &Rect, viewport: &Rect) -> Self {
        Self::new(target, intersection_ratio(element, viewport))
    }

    pub fn is_intersecting(&self) -> bool {
        self.ratio > 0.0
    }
}

#[derive(Debug)]
pub struct RevealObserver {
    threshold: f64,
    observed: BTreeSet<ElementId>,
    // (due time, element) registrations waiting for layout to settle
    pending: Vec<(Duration, ElementId)>,
    now: Duration,
    next_id: u64,
}

impl RevealObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            observed: BTreeSet::new(),
            pending: Vec::new(),
            now: Duration::ZERO,
            next_id: 1,
        }
    }

    /// Hand out a fresh element id.
    pub fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn observe(&mut self, id: ElementId) {
        self.observed.insert(id);
    }

    /// Start observing `id` once `delay` has elapsed on the observer's clock.
    /// A zero delay observes immediately.
    pub fn observe_after(&mut self, id: ElementId, delay: Duration) {
        if delay.is_zero() {
            self.observe(id);
        } else {
            self.pending.push((self.now + delay, id));
        }
    }

    pub fn unobserve(&mut self, id: ElementId) {
        self.observed.remove(&id);
        self.pending.retain(|(_, p)| *p != id);
    }

    pub fn is_observed(&self, id: ElementId) -> bool {
        self.observed.contains(&id)
    }

    pub fn is_pending(&self, id: ElementId) -> bool {
        self.pending.iter().any(|(_, p)| *p == id)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Advance the clock, promoting any delayed registrations that are due.
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
        let now = self.now;
        let mut due = Vec::new();
        self.pending.retain(|(at, id)| {
            if *at <= now {
                due.push(*id);
                false
            } else {
                true
            }
        });
        for id in due {
            self.observe(id);
        }
    }

    /// Process visibility reports; returns the elements revealed by them.
    ///
    /// Revealed elements are unobserved, so later reports for them are
    /// ignored.
    pub fn process(&mut self, entries: &[IntersectionEntry]) -> Vec<ElementId> {
        let mut revealed = Vec::new();
        for entry in entries {
            if !entry.is_intersecting() || entry.ratio < self.threshold {
                continue;
            }
            if self.observed.remove(&entry.target) {
                revealed.push(entry.target);
            }
        }
        revealed
    }
}
