// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll state of the container wrapping the editor.
//!
//! The container presents a clamped height while the editor keeps its natural
//! height, so overflowing content scrolls. [`ScrollState`] tracks the content
//! size, the scroll offset and scroll-indicator flashes, and answers the
//! tail-anchoring question used to keep the view pinned to the bottom:
//!
//! 1. Before mutating, ask [`ScrollState::is_at_tail`] for the current viewport.
//! 2. Update the content size.
//! 3. If it was at the tail, call [`ScrollState::scroll_to_tail`] with the new
//!    viewport.
//!
//! Unlike the tolerant anchoring of chat-style lists, "at the tail" here is an
//! exact comparison against `content - viewport`: a user who scrolled even
//! slightly up is left alone. The comparison is not clamped, so content shorter
//! than its viewport (a minimum height taller than the text) is never at the
//! tail. Scrolling to the tail does clamp, and never produces a negative offset.

use kurbo::{Size, Vec2};

/// Content size, scroll offset and indicator state of a scroll container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollState {
    content_size: Size,
    offset: Vec2,
    indicator_flashes: u64,
}

impl ScrollState {
    /// Creates an unscrolled state with empty content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the scrollable content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Sets the size of the scrollable content. The offset is left untouched.
    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    /// Current scroll offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Sets the scroll offset, as a user scroll or programmatic jump would.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Vertical offset that shows the end of the content in a viewport.
    ///
    /// Zero when the content fits entirely inside the viewport.
    #[must_use]
    pub fn tail_offset(&self, viewport_height: f64) -> f64 {
        (self.content_size.height - viewport_height).max(0.0)
    }

    /// Returns `true` if the vertical offset is exactly `content - viewport`.
    ///
    /// Content shorter than the viewport has a negative tail, which no offset
    /// reaches.
    #[must_use]
    pub fn is_at_tail(&self, viewport_height: f64) -> bool {
        self.offset.y == self.content_size.height - viewport_height
    }

    /// Scrolls vertically so the end of the content is visible.
    pub fn scroll_to_tail(&mut self, viewport_height: f64) {
        self.offset.y = self.tail_offset(viewport_height);
    }

    /// Returns `true` if the content is taller than the viewport.
    #[must_use]
    pub fn overflows(&self, viewport_height: f64) -> bool {
        self.content_size.height > viewport_height
    }

    /// Records a scroll-indicator flash.
    pub fn flash_indicators(&mut self) {
        self.indicator_flashes += 1;
    }

    /// Number of indicator flashes so far.
    ///
    /// Hosts compare this against the last value they saw and flash their
    /// scroll bars when it grows.
    #[must_use]
    pub fn indicator_flashes(&self) -> u64 {
        self.indicator_flashes
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollState;
    use kurbo::{Size, Vec2};

    #[test]
    fn tail_offset_is_content_minus_viewport() {
        let mut scroll = ScrollState::new();
        scroll.set_content_size(Size::new(300.0, 200.0));
        assert_eq!(scroll.tail_offset(80.0), 120.0);
        // Content that fits never scrolls.
        assert_eq!(scroll.tail_offset(500.0), 0.0);
    }

    #[test]
    fn tail_detection_is_exact() {
        let mut scroll = ScrollState::new();
        scroll.set_content_size(Size::new(300.0, 200.0));
        assert!(!scroll.is_at_tail(80.0));
        scroll.scroll_to_tail(80.0);
        assert!(scroll.is_at_tail(80.0));
        scroll.set_offset(Vec2::new(0.0, 119.5));
        assert!(!scroll.is_at_tail(80.0));
    }

    #[test]
    fn exactly_fitting_content_is_at_tail_when_unscrolled() {
        let mut scroll = ScrollState::new();
        scroll.set_content_size(Size::new(300.0, 60.0));
        assert!(scroll.is_at_tail(60.0));
        assert!(!scroll.overflows(60.0));
    }

    #[test]
    fn content_shorter_than_the_viewport_is_never_at_tail() {
        let mut scroll = ScrollState::new();
        scroll.set_content_size(Size::new(300.0, 40.0));
        assert!(!scroll.is_at_tail(60.0));
        scroll.scroll_to_tail(60.0);
        assert_eq!(scroll.offset().y, 0.0);
        assert!(!scroll.is_at_tail(60.0));
    }

    #[test]
    fn scroll_to_tail_keeps_horizontal_offset() {
        let mut scroll = ScrollState::new();
        scroll.set_content_size(Size::new(300.0, 200.0));
        scroll.set_offset(Vec2::new(12.0, 0.0));
        scroll.scroll_to_tail(50.0);
        assert_eq!(scroll.offset(), Vec2::new(12.0, 150.0));
    }
}
