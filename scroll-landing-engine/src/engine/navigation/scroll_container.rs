use bevy::prelude::*;

use crate::constants::navigation_settings::{SMOOTH_SCROLL_RATE, SMOOTH_SCROLL_SNAP_EPSILON};
use crate::engine::animation::easing::approach_factor;

/// Scrollable surface the navigator issues seeks against.
pub trait ScrollSurface {
    /// Whether the surface has live metrics to scroll against.
    fn is_mounted(&self) -> bool;

    fn scroll_top(&self) -> f32;

    /// Start a smooth scroll to `offset`, superseding any scroll in flight.
    fn smooth_scroll_to(&mut self, offset: f32);
}

/// Virtual scroll container holding every section stacked vertically, one
/// viewport tall each.
#[derive(Resource, Debug, Clone)]
pub struct ScrollContainer {
    scroll_top: f32,
    viewport_height: f32,
    section_count: usize,
    target: Option<f32>,
    mounted: bool,
}

impl ScrollContainer {
    pub fn new(section_count: usize) -> Self {
        Self {
            scroll_top: 0.0,
            viewport_height: 0.0,
            section_count,
            target: None,
            mounted: false,
        }
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn scroll_height(&self) -> f32 {
        self.section_count as f32 * self.viewport_height
    }

    pub fn max_scroll_top(&self) -> f32 {
        (self.scroll_height() - self.viewport_height).max(0.0)
    }

    /// Offset a smooth scroll is currently heading for.
    pub fn smooth_target(&self) -> Option<f32> {
        self.target
    }

    /// Take new viewport metrics. The scroll position is left where it is,
    /// even past the new `max_scroll_top`; the next wheel scroll or smooth
    /// scroll clamps it back into range.
    pub fn resize(&mut self, viewport_height: f32) {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            debug!("Ignoring degenerate viewport height {}", viewport_height);
            return;
        }
        self.viewport_height = viewport_height;
        if !self.mounted {
            self.mounted = true;
            info!(
                "Scroll container mounted: {} sections, {:.0}px each",
                self.section_count, viewport_height
            );
        }
    }

    /// Apply user scrolling. Cancels any smooth scroll in flight, the way a
    /// browser hands control back to the wheel. Returns whether the offset
    /// moved.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        if !self.mounted || delta == 0.0 {
            return false;
        }
        self.target = None;
        let previous = self.scroll_top;
        self.scroll_top = (self.scroll_top + delta).clamp(0.0, self.max_scroll_top());
        self.scroll_top != previous
    }

    /// Move one frame toward the smooth-scroll target. Returns whether the
    /// offset moved, which the caller treats as a scroll event.
    pub fn advance(&mut self, delta_secs: f32) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let previous = self.scroll_top;
        let factor = approach_factor(SMOOTH_SCROLL_RATE, delta_secs);
        let next = previous + (target - previous) * factor;
        if (target - next).abs() <= SMOOTH_SCROLL_SNAP_EPSILON {
            self.scroll_top = target;
            self.target = None;
        } else {
            self.scroll_top = next;
        }
        self.scroll_top != previous
    }
}

impl ScrollSurface for ScrollContainer {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn smooth_scroll_to(&mut self, offset: f32) {
        if !self.mounted {
            return;
        }
        self.target = Some(offset.clamp(0.0, self.max_scroll_top()));
    }
}
