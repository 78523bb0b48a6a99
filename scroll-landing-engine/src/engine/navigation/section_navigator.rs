use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::navigation_settings::{SCROLL_DEBOUNCE_MS, SNAP_COOLDOWN_MS};
use crate::engine::navigation::scheduled_task::ScheduledTask;
use crate::engine::navigation::scroll_container::ScrollSurface;

/// Timing knobs for snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorSettings {
    /// Quiet period after the last scroll event before snapping.
    pub debounce_ms: u64,
    /// How long scroll-driven snaps are ignored after a seek.
    pub snap_cooldown_ms: u64,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            debounce_ms: SCROLL_DEBOUNCE_MS,
            snap_cooldown_ms: SNAP_COOLDOWN_MS,
        }
    }
}

impl NavigatorSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn snap_cooldown(&self) -> Duration {
        Duration::from_millis(self.snap_cooldown_ms)
    }
}

/// Owns the current section index and turns scroll, resize and touch input
/// into section seeks.
///
/// Every entry point takes the current logical time so timers can be driven by
/// the frame loop or by a test. The index is clamped on every path, so an out
/// of range value is never stored.
#[derive(Resource, Debug, Clone)]
pub struct SectionNavigator {
    section_count: usize,
    current_index: usize,
    section_height: f32,
    settings: NavigatorSettings,
    /// Pending snap carrying the scroll offset of the latest scroll event.
    scroll_debounce: ScheduledTask<f32>,
    /// Pending end of the post-seek guard. While armed, the navigator is snapping.
    snap_cooldown: ScheduledTask<()>,
    touch_start_y: Option<f32>,
}

impl SectionNavigator {
    pub fn new(section_count: usize, section_height: f32, settings: NavigatorSettings) -> Self {
        Self {
            section_count: section_count.max(1),
            current_index: 0,
            section_height,
            settings,
            scroll_debounce: ScheduledTask::default(),
            snap_cooldown: ScheduledTask::default(),
            touch_start_y: None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn is_final_section(&self) -> bool {
        self.current_index == self.last_index()
    }

    /// True only while the post-seek cool-down is armed.
    pub fn is_snapping(&self) -> bool {
        self.snap_cooldown.is_pending()
    }

    /// Like `is_snapping`, but treats a cool-down already due at `now` as
    /// lifted even before the next `tick` clears it.
    pub fn is_snapping_at(&self, now: Duration) -> bool {
        self.snap_cooldown.due_at().is_some_and(|due| now < due)
    }

    pub fn section_height(&self) -> f32 {
        self.section_height
    }

    pub fn settings(&self) -> &NavigatorSettings {
        &self.settings
    }

    pub fn has_pending_snap(&self) -> bool {
        self.scroll_debounce.is_pending()
    }

    fn last_index(&self) -> usize {
        self.section_count - 1
    }

    pub fn clamp_index(&self, index: isize) -> usize {
        index.clamp(0, self.last_index() as isize) as usize
    }

    /// Smooth-scroll to section `index` (clamped), update the index right away
    /// and (re)arm the snap cool-down. Re-entrant calls restart the cool-down
    /// rather than queue. Returns the section landed on, or `None` when the
    /// surface is not mounted or the section height is unknown.
    pub fn seek_to<S: ScrollSurface + ?Sized>(
        &mut self,
        index: isize,
        now: Duration,
        surface: &mut S,
    ) -> Option<usize> {
        if !surface.is_mounted() {
            debug!("Seek to section {} ignored: container not mounted", index);
            return None;
        }
        if self.section_height <= 0.0 {
            debug!("Seek to section {} ignored: degenerate section height", index);
            return None;
        }

        let target = self.clamp_index(index);
        surface.smooth_scroll_to(target as f32 * self.section_height);
        self.current_index = target;
        // The seek decides the destination; a stale pending snap must not undo it.
        self.scroll_debounce.cancel();
        self.snap_cooldown.arm(now, self.settings.snap_cooldown(), ());
        debug!("Seeking to section {}/{}", target + 1, self.section_count);
        Some(target)
    }

    /// Programmatic skip to the final section, regardless of the snap guard.
    pub fn skip_to_end<S: ScrollSurface + ?Sized>(
        &mut self,
        now: Duration,
        surface: &mut S,
    ) -> Option<usize> {
        self.seek_to(self.last_index() as isize, now, surface)
    }

    /// Record a scroll event. While snapping the event is dropped; otherwise
    /// the debounce timer restarts with this offset. Returns whether a snap is
    /// now pending.
    pub fn on_scroll(&mut self, now: Duration, scroll_top: f32) -> bool {
        self.settle(now);
        if self.is_snapping() {
            return false;
        }
        self.scroll_debounce
            .arm(now, self.settings.debounce(), scroll_top);
        true
    }

    /// Adopt a new viewport height for future snap computations. Never issues
    /// a scroll, so a seek already in flight keeps its target.
    pub fn on_resize(&mut self, viewport_height: f32) {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            debug!("Ignoring degenerate resize to {}", viewport_height);
            return;
        }
        self.section_height = viewport_height;
    }

    pub fn on_touch_start(&mut self, y: f32) {
        self.touch_start_y = Some(y);
    }

    /// Finish a swipe. Only the sign of the vertical travel matters: swiping
    /// up moves one section forward, swiping down one section back.
    pub fn on_touch_end<S: ScrollSurface + ?Sized>(
        &mut self,
        y: f32,
        now: Duration,
        surface: &mut S,
    ) -> Option<usize> {
        let start_y = self.touch_start_y.take()?;
        let delta = start_y - y;
        let step: isize = if delta > 0.0 {
            1
        } else if delta < 0.0 {
            -1
        } else {
            return None;
        };
        self.seek_to(self.current_index as isize + step, now, surface)
    }

    pub fn on_touch_cancel(&mut self) {
        self.touch_start_y = None;
    }

    /// Advance timers to `now`: expire the cool-down and run a due snap.
    /// Returns the section landed on if a snap ran.
    pub fn tick<S: ScrollSurface + ?Sized>(&mut self, now: Duration, surface: &mut S) -> Option<usize> {
        self.settle(now);
        let scroll_top = self.scroll_debounce.take_due(now)?;

        if self.is_snapping() {
            debug!("Dropping scroll snap during cool-down");
            return None;
        }
        if self.section_height <= 0.0 {
            return None;
        }

        let nearest = (scroll_top / self.section_height).round() as isize;
        self.seek_to(nearest, now, surface)
    }

    fn settle(&mut self, now: Duration) {
        if self.snap_cooldown.take_due(now).is_some() {
            debug!("Snap cool-down elapsed at section {}", self.current_index + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that records every smooth-scroll command it receives.
    #[derive(Default)]
    struct RecordingSurface {
        unmounted: bool,
        scroll_top: f32,
        commands: Vec<f32>,
    }

    impl ScrollSurface for RecordingSurface {
        fn is_mounted(&self) -> bool {
            !self.unmounted
        }

        fn scroll_top(&self) -> f32 {
            self.scroll_top
        }

        fn smooth_scroll_to(&mut self, offset: f32) {
            self.commands.push(offset);
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn navigator() -> SectionNavigator {
        SectionNavigator::new(6, 800.0, NavigatorSettings::default())
    }

    #[test]
    fn seek_clamps_out_of_range_requests() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        assert_eq!(nav.seek_to(-3, ms(0), &mut surface), Some(0));
        assert_eq!(nav.current_index(), 0);

        assert_eq!(nav.seek_to(99, ms(10), &mut surface), Some(5));
        assert_eq!(nav.current_index(), 5);
        assert!(nav.is_final_section());
        assert_eq!(surface.commands, vec![0.0, 4000.0]);
    }

    #[test]
    fn scroll_burst_coalesces_into_one_snap() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        for (t, top) in [(0, 300.0), (20, 700.0), (40, 1100.0), (60, 1250.0)] {
            assert!(nav.on_scroll(ms(t), top));
            assert_eq!(nav.tick(ms(t), &mut surface), None);
        }

        assert_eq!(nav.tick(ms(159), &mut surface), None);
        assert_eq!(nav.tick(ms(160), &mut surface), Some(2));
        assert_eq!(surface.commands, vec![1600.0]);
        assert!(!nav.has_pending_snap());
    }

    #[test]
    fn snap_rounds_to_the_nearest_section() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        nav.on_scroll(ms(0), 1199.0);
        assert_eq!(nav.tick(ms(100), &mut surface), Some(1));

        let mut nav = navigator();
        nav.on_scroll(ms(0), 1201.0);
        assert_eq!(nav.tick(ms(100), &mut surface), Some(2));
    }

    #[test]
    fn scroll_during_cooldown_triggers_no_snap() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        nav.on_scroll(ms(0), 900.0);
        assert_eq!(nav.tick(ms(100), &mut surface), Some(1));
        assert!(nav.is_snapping());

        assert!(!nav.on_scroll(ms(150), 2400.0));
        assert_eq!(nav.tick(ms(400), &mut surface), None);
        assert_eq!(surface.commands.len(), 1);

        // Guard lifts after the cool-down.
        assert_eq!(nav.tick(ms(1100), &mut surface), None);
        assert!(!nav.is_snapping());
        assert!(nav.on_scroll(ms(1200), 2400.0));
        assert_eq!(nav.tick(ms(1300), &mut surface), Some(3));
    }

    #[test]
    fn reentrant_seek_restarts_cooldown() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        nav.seek_to(1, ms(0), &mut surface);
        nav.seek_to(2, ms(900), &mut surface);

        nav.tick(ms(1000), &mut surface);
        assert!(nav.is_snapping());
        nav.tick(ms(1900), &mut surface);
        assert!(!nav.is_snapping());
    }

    #[test]
    fn skip_ignores_the_snap_guard() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        nav.seek_to(1, ms(0), &mut surface);
        assert!(nav.is_snapping());
        assert_eq!(nav.skip_to_end(ms(10), &mut surface), Some(5));
        assert_eq!(surface.commands.last(), Some(&4000.0));
    }

    #[test]
    fn swipe_moves_one_section_by_direction() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        nav.on_touch_start(500.0);
        assert_eq!(nav.on_touch_end(200.0, ms(0), &mut surface), Some(1));

        nav.on_touch_start(200.0);
        assert_eq!(nav.on_touch_end(500.0, ms(10), &mut surface), Some(0));

        nav.on_touch_start(200.0);
        assert_eq!(nav.on_touch_end(500.0, ms(20), &mut surface), Some(0));
    }

    #[test]
    fn swipe_is_bounded_at_the_last_section() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();
        nav.skip_to_end(ms(0), &mut surface);

        nav.on_touch_start(900.0);
        assert_eq!(nav.on_touch_end(10.0, ms(10), &mut surface), Some(5));
    }

    #[test]
    fn swipe_magnitude_is_ignored() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        nav.on_touch_start(500.0);
        assert_eq!(nav.on_touch_end(499.0, ms(0), &mut surface), Some(1));

        nav.on_touch_start(100.0);
        assert_eq!(nav.on_touch_end(100.0, ms(10), &mut surface), None);
        assert_eq!(nav.on_touch_end(0.0, ms(20), &mut surface), None);
    }

    #[test]
    fn touch_cancel_discards_the_gesture() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        nav.on_touch_start(500.0);
        nav.on_touch_cancel();
        assert_eq!(nav.on_touch_end(100.0, ms(0), &mut surface), None);
        assert_eq!(nav.current_index(), 0);
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn snapping_state_lifts_when_cooldown_is_due() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        nav.seek_to(1, ms(0), &mut surface);
        assert!(nav.is_snapping_at(ms(999)));
        assert!(!nav.is_snapping_at(ms(1000)));
        // Not yet cleared by a tick.
        assert!(nav.is_snapping());

        nav.tick(ms(1000), &mut surface);
        assert!(!nav.is_snapping_at(ms(1000)));
        assert!(!nav.is_snapping());
    }

    #[test]
    fn resize_mid_snap_keeps_issued_target() {
        let mut nav = navigator();
        let mut surface = RecordingSurface::default();

        nav.seek_to(2, ms(0), &mut surface);
        nav.on_resize(600.0);
        assert_eq!(surface.commands, vec![1600.0]);

        // Only the next scroll-driven snap uses the new height.
        nav.tick(ms(1000), &mut surface);
        nav.on_scroll(ms(1010), 1250.0);
        assert_eq!(nav.tick(ms(1110), &mut surface), Some(2));
        assert_eq!(surface.commands, vec![1600.0, 1200.0]);
    }

    #[test]
    fn unmounted_surface_makes_seek_a_noop() {
        let mut nav = navigator();
        let mut surface = RecordingSurface {
            unmounted: true,
            ..Default::default()
        };

        assert_eq!(nav.seek_to(3, ms(0), &mut surface), None);
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.is_snapping());
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn degenerate_resize_is_ignored() {
        let mut nav = navigator();
        nav.on_resize(0.0);
        assert_eq!(nav.section_height(), 800.0);
    }
}
