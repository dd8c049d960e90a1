use std::collections::{BTreeMap, BTreeSet};

use crate::core::RegionId;
use crate::model::{RegionSpec, RevealConfig};
use crate::schedule::{RevealTask, Scheduler};
use crate::source::IntersectionEvent;

/// One element whose presentation state flips to "visible".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealTarget {
    Container(RegionId),
    Child {
        region: RegionId,
        index: usize,
        handle: String,
    },
}

impl RevealTarget {
    pub fn container(id: impl Into<RegionId>) -> Self {
        Self::Container(id.into())
    }

    pub fn child(region: impl Into<RegionId>, index: usize, handle: impl Into<String>) -> Self {
        Self::Child {
            region: region.into(),
            index,
            handle: handle.into(),
        }
    }
}

/// The sole handshake with the styling layer: the sink is told, once per
/// target, that it is now visible. What "visible" looks like (a class flag,
/// a transition) is the consumer's concern.
pub trait RevealSink {
    fn mark_visible(&mut self, target: &RevealTarget);
}

/// In-crate sink recording visibility flags. Flags are monotonic: once a
/// target is visible it stays visible, and repeat marks are no-ops.
#[derive(Debug, Default)]
pub struct RevealLedger {
    visible: BTreeSet<RevealTarget>,
}

impl RevealLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, target: &RevealTarget) -> bool {
        self.visible.contains(target)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RevealTarget> {
        self.visible.iter()
    }
}

impl RevealSink for RevealLedger {
    fn mark_visible(&mut self, target: &RevealTarget) {
        self.visible.insert(target.clone());
    }
}

struct Observed {
    spec: RegionSpec,
}

/// The viewport entrance animator.
///
/// Each observed region independently waits for its first intersection sample
/// at or above its threshold. On trigger the container is marked visible
/// immediately, each stagger child is scheduled at `stagger_step_ms * index`,
/// and the region is permanently dropped from observation (one-shot: leaving
/// and re-entering the viewport cannot fire it again).
#[derive(Default)]
pub struct EntranceAnimator {
    observed: BTreeMap<RegionId, Observed>,
    fired: BTreeSet<RegionId>,
}

impl EntranceAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every region in `config` for observation.
    pub fn from_config(config: RevealConfig) -> Self {
        let mut animator = Self::new();
        for spec in config.regions {
            animator.observe(spec);
        }
        animator
    }

    /// Registers a region. Re-observing a not-yet-fired region replaces its
    /// registration; a region that has already fired stays fired and is not
    /// re-registered.
    pub fn observe(&mut self, spec: RegionSpec) {
        if self.fired.contains(&spec.id) {
            tracing::debug!(region = %spec.id, "observe ignored: region already fired");
            return;
        }
        self.observed.insert(spec.id.clone(), Observed { spec });
    }

    /// Stops tracking a region. Idempotent; a no-op for unknown or already
    /// fired regions. Stagger timers already handed to the scheduler are not
    /// retracted.
    pub fn unobserve(&mut self, id: &RegionId) {
        self.observed.remove(id);
    }

    pub fn is_observing(&self, id: &RegionId) -> bool {
        self.observed.contains_key(id)
    }

    pub fn has_fired(&self, id: &RegionId) -> bool {
        self.fired.contains(id)
    }

    /// Feeds one batch of intersection samples. Samples for unknown, fired,
    /// or below-threshold regions are no-ops, never errors.
    #[tracing::instrument(skip_all, fields(batch = events.len()))]
    pub fn on_intersection(
        &mut self,
        events: &[IntersectionEvent],
        scheduler: &mut dyn Scheduler,
        sink: &mut dyn RevealSink,
    ) {
        for event in events {
            let Some(observed) = self.observed.get(&event.region) else {
                continue;
            };
            let policy = observed.spec.policy;
            if !policy.threshold.is_met(event.ratio) {
                continue;
            }

            tracing::debug!(
                region = %event.region,
                ratio = event.ratio,
                children = observed.spec.children.len(),
                "region entered viewport, revealing"
            );

            sink.mark_visible(&RevealTarget::Container(event.region.clone()));
            for (index, handle) in observed.spec.children.iter().enumerate() {
                scheduler.schedule_after(
                    policy.stagger_delay(index),
                    RevealTask {
                        target: RevealTarget::child(event.region.clone(), index, handle.clone()),
                    },
                );
            }

            self.fired.insert(event.region.clone());
            self.observed.remove(&event.region);
        }
    }
}
