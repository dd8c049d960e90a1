//! Inview is a deterministic viewport-entrance reveal engine.
//!
//! It implements the classic "fade in sections as they scroll into view"
//! behavior as a headless state machine, decoupled from any particular
//! rendering environment:
//!
//! 1. **Measure**: [`ViewportTracker`] turns region rects + viewport bounds
//!    into [`IntersectionEvent`] batches (or bring your own event source)
//! 2. **Decide**: [`EntranceAnimator`] applies each region's [`RevealPolicy`]
//!    (threshold, root margin, stagger step) with a one-shot latch per region
//! 3. **Schedule**: staggered child reveals are handed to a [`Scheduler`];
//!    the in-crate [`TimerQueue`] is a deterministic event-loop stand-in
//! 4. **Apply**: visibility flips flow to a [`RevealSink`], the sole
//!    handshake with the styling layer
//!
//! Visibility is monotonic (once visible, always visible), triggers are
//! one-shot per region, and every step is pure and deterministic for a given
//! event sequence.
#![forbid(unsafe_code)]

pub mod core;
pub mod error;
pub mod geometry;
pub mod model;
pub mod reveal;
pub mod schedule;
pub mod source;

pub use crate::core::{MarginValue, Millis, RegionId, RootMargin, Threshold};
pub use error::{InviewError, InviewResult};
pub use model::{RegionSpec, RegionSpecBuilder, RevealConfig, RevealPolicy};
pub use reveal::{EntranceAnimator, RevealLedger, RevealSink, RevealTarget};
pub use schedule::{RevealTask, Scheduler, TimerQueue};
pub use source::{IntersectionEvent, ViewportTracker};
