//! End-to-end scroll simulation: regions laid out down a page, a viewport
//! scrolling over them, and the full measure -> decide -> schedule -> apply
//! loop driving the ledger.

use inview::{
    EntranceAnimator, Millis, RegionSpecBuilder, RevealLedger, RevealSink, RevealTarget,
    RootMargin, TimerQueue, ViewportTracker,
};
use kurbo::Rect;

const VIEWPORT_H: f64 = 600.0;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn viewport_at(scroll_y: f64) -> Rect {
    Rect::new(0.0, scroll_y, 1000.0, scroll_y + VIEWPORT_H)
}

struct Page {
    animator: EntranceAnimator,
    tracker: ViewportTracker,
    queue: TimerQueue,
    ledger: RevealLedger,
}

impl Page {
    fn portfolio() -> Self {
        let mut animator = EntranceAnimator::new();
        let mut tracker = ViewportTracker::new();

        let sections: &[(&str, f64, f64, &[&str])] = &[
            ("hero", 0.0, 600.0, &[]),
            ("stats", 650.0, 1000.0, &["s0", "s1", "s2"]),
            ("skills", 1050.0, 1600.0, &["k0", "k1", "k2", "k3"]),
            ("timeline", 1700.0, 2600.0, &["j0", "j1", "j2"]),
        ];
        for (id, top, bottom, children) in sections {
            let step = if *id == "timeline" { 200 } else { 100 };
            animator.observe(
                RegionSpecBuilder::new(*id)
                    .stagger_step_ms(step)
                    .children(children.iter().copied())
                    .build(),
            );
            tracker.track(
                *id,
                Rect::new(0.0, *top, 1000.0, *bottom),
                RootMargin::ZERO,
            );
        }

        Self {
            animator,
            tracker,
            queue: TimerQueue::new(),
            ledger: RevealLedger::new(),
        }
    }

    /// One frame: sample at the given scroll offset, then let `dt` elapse.
    fn frame(&mut self, scroll_y: f64, dt: u64) {
        let events = self.tracker.sample(viewport_at(scroll_y));
        self.animator
            .on_intersection(&events, &mut self.queue, &mut self.ledger);
        for task in self.queue.advance(Millis(dt)) {
            self.ledger.mark_visible(&task.target);
        }
    }

    fn container_visible(&self, id: &str) -> bool {
        self.ledger.is_visible(&RevealTarget::container(id))
    }
}

#[test]
fn sections_reveal_as_the_page_scrolls() {
    init_tracing();
    let mut page = Page::portfolio();

    // Initial paint: only the hero is on screen.
    page.frame(0.0, 16);
    assert!(page.container_visible("hero"));
    assert!(!page.container_visible("stats"));
    assert!(!page.container_visible("timeline"));

    // Scroll until stats and skills are well inside the viewport.
    page.frame(700.0, 16);
    assert!(page.container_visible("stats"));
    assert!(page.container_visible("skills"));
    assert!(!page.container_visible("timeline"));

    // Jump to the bottom, then give the staggers time to run out.
    page.frame(2000.0, 16);
    assert!(page.container_visible("timeline"));
    page.frame(2000.0, 5_000);

    // Every container and every child ended up visible exactly once.
    assert_eq!(page.ledger.visible_count(), 4 + 10);
}

#[test]
fn scrolling_back_up_does_not_hide_anything() {
    init_tracing();
    let mut page = Page::portfolio();

    page.frame(0.0, 5_000);
    page.frame(700.0, 5_000);
    assert!(page.container_visible("hero"));
    assert!(page.container_visible("stats"));
    let settled = page.ledger.visible_count();

    // Back to the top: stats is off screen again, ledger unchanged.
    page.frame(0.0, 5_000);
    assert!(page.container_visible("stats"));
    assert_eq!(page.ledger.visible_count(), settled);

    // And scrolling down again does not re-fire the one-shot regions.
    page.frame(700.0, 5_000);
    assert_eq!(page.ledger.visible_count(), settled);
}

#[test]
fn frame_scenarios_match_threshold_semantics() {
    init_tracing();
    let mut page = Page::portfolio();

    // Stats spans y 650..1000 (350 tall). At scroll 100 the viewport ends at
    // 700, so 50/350 ~ 14% is visible: above the 10% threshold.
    page.frame(100.0, 16);
    assert!(page.container_visible("stats"));

    // Skills spans y 1050..1600. At scroll 100 it is entirely below the fold.
    assert!(!page.container_visible("skills"));
}
