// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout passes of a [`GrowingTextView`].
//!
//! A pass measures the editor's natural size at the current width, sizes the
//! editor and the scroll content to it, clamps the presented height through
//! the [`HeightPolicy`](crate::HeightPolicy), and applies the result to the
//! container frame. Along the way it:
//!
//! - announces an upcoming height change through
//!   [`will_change_height`](crate::GrowingTextListener::will_change_height)
//!   and flashes the scroll indicators, but only when the new height is within
//!   the maximum;
//! - keeps the view pinned to the bottom if it was pinned before the pass and
//!   auto-scroll is enabled;
//! - invalidates the intrinsic size;
//! - reports the final height through
//!   [`did_change_height`](crate::GrowingTextListener::did_change_height),
//!   on every pass.
//!
//! Width changes are detected by [`GrowingTextView::layout`], which hosts call
//! from their own layout hook after resizing the view.

use kurbo::{Point, Rect, Size};

use crate::editor::TextEditor;
use crate::listener::GrowingTextListener;
use crate::probe::EditorProbe;
use crate::view::GrowingTextView;

/// Outcome of one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPass {
    /// Presented height before the pass.
    pub previous_height: f64,
    /// Presented height after the pass.
    pub height: f64,
    /// Natural content height of the editor.
    pub content_height: f64,
    /// Whether the pass announced a height change.
    pub announced: bool,
    /// Whether the view was pinned to the bottom when the pass started.
    pub was_at_bottom: bool,
}

impl LayoutPass {
    /// Returns `true` if the presented height changed.
    #[must_use]
    pub fn height_changed(&self) -> bool {
        self.height != self.previous_height
    }
}

impl<E: TextEditor, L> GrowingTextView<E, L> {
    /// The frame the view would present for content of `content_size`.
    ///
    /// Only the height is clamped; origin and width stay those of the current
    /// frame.
    #[must_use]
    pub fn measure_frame(&self, content_size: Size) -> Rect {
        let height = self.policy.clamp(content_size.height, self.editor.has_text());
        self.frame.with_size(Size::new(self.frame.width(), height))
    }

    /// Size the view would like to present for its current content.
    ///
    /// Pure: safe to call at any time, including before the first layout pass.
    #[must_use]
    pub fn intrinsic_content_size(&self) -> Size {
        self.measure_frame(self.editor.measure(self.frame.width())).size()
    }

    /// Moves or resizes the container.
    ///
    /// Layout is not run; call [`layout`](Self::layout) afterwards, as a host
    /// layout hook would.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub(crate) fn recompute_bounds(&mut self) {
        let mut probe = EditorProbe::new(&mut self.editor, self.frame.width());
        self.policy.recompute_bounds(&mut probe);
    }
}

impl<E: TextEditor, L: GrowingTextListener<E>> GrowingTextView<E, L> {
    /// Layout hook: relayouts if the width changed since the last pass.
    ///
    /// A new width re-derives the height bounds (line heights depend on
    /// wrapping) before relaying out. An unchanged width does nothing and
    /// returns `None`.
    pub fn layout(&mut self) -> Option<LayoutPass> {
        let width = self.frame.width();
        if width == self.last_known_width {
            return None;
        }
        log::debug!("width changed from {} to {width}", self.last_known_width);
        self.last_known_width = width;
        self.recompute_bounds();
        Some(self.relayout())
    }

    /// Measures the content and applies the resulting geometry.
    pub fn relayout(&mut self) -> LayoutPass {
        let previous_height = self.frame.height();
        let was_at_bottom = self.scroll.is_at_tail(previous_height);

        let width = self.frame.width();
        let natural = self.editor.measure(width);
        let content = Rect::from_origin_size(Point::ZERO, Size::new(width, natural.height));
        self.editor.set_frame(content);
        self.scroll.set_content_size(content.size());

        let height = self.policy.clamp(natural.height, self.editor.has_text());
        // Announce only heights within the maximum. With no maximum (`0`) no
        // height qualifies, so unbounded views never announce.
        let announced = height != previous_height && height <= self.policy.max_height();
        if announced {
            log::debug!("presented height {previous_height} -> {height}");
            self.scroll.flash_indicators();
            self.listener.will_change_height(height);
        }

        self.frame = self.frame.with_size(Size::new(width, height));

        if was_at_bottom && self.auto_scroll_to_bottom {
            self.scroll.scroll_to_tail(height);
        }

        self.intrinsic_size_invalidated = true;
        self.layout_revision += 1;
        debug_assert!(height >= 0.0, "presented height must be non-negative");

        log::trace!(
            "layout pass {}: content {} presented {height}",
            self.layout_revision,
            natural.height
        );
        self.listener.did_change_height(self.frame.height());

        LayoutPass {
            previous_height,
            height,
            content_height: natural.height,
            announced,
            was_at_bottom,
        }
    }
}
