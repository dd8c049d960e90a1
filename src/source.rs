use std::collections::BTreeMap;

use kurbo::Rect;

use crate::core::{RegionId, RootMargin};
use crate::geometry;

/// One visibility sample for one region. Deliveries arrive in arbitrary
/// batches; `ratio` is the visible-area fraction in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEvent {
    pub region: RegionId,
    pub ratio: f64,
}

impl IntersectionEvent {
    pub fn new(region: impl Into<RegionId>, ratio: f64) -> Self {
        Self {
            region: region.into(),
            ratio,
        }
    }
}

struct Tracked {
    rect: Rect,
    margin: RootMargin,
}

/// Concrete viewport-observation mechanism: holds each tracked region's page
/// rect and measures visible fractions against a (margin-expanded) viewport.
///
/// This is the headless stand-in for the rendering environment's intersection
/// machinery; the animator only ever sees the [`IntersectionEvent`] batches it
/// produces. Sampling order is stable (sorted by region id).
#[derive(Default)]
pub struct ViewportTracker {
    regions: BTreeMap<RegionId, Tracked>,
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-registers) a region's page-coordinate rect and the
    /// margin applied to the viewport when testing it.
    pub fn track(&mut self, id: impl Into<RegionId>, rect: Rect, margin: RootMargin) {
        self.regions.insert(id.into(), Tracked { rect, margin });
    }

    pub fn forget(&mut self, id: &RegionId) {
        self.regions.remove(id);
    }

    pub fn tracked_count(&self) -> usize {
        self.regions.len()
    }

    /// Measures every tracked region against `viewport`.
    pub fn sample(&self, viewport: Rect) -> Vec<IntersectionEvent> {
        self.regions
            .iter()
            .map(|(id, tracked)| {
                let root = geometry::expand(viewport, tracked.margin);
                IntersectionEvent {
                    region: id.clone(),
                    ratio: geometry::visible_fraction(tracked.rect, root),
                }
            })
            .collect()
    }
}
