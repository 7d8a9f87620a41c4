// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic fixed-advance [`TextEditor`].
//!
//! [`MonospaceEditor`] lays text out on a grid: every character advances by
//! `font.size * advance_ratio`, lines break at `'\n'`, and lines wider than the
//! text container wrap at character granularity. Each visual row is as tall as
//! the tallest font (or attachment) touching its source line.
//!
//! It is meant for tests, terminal-like surfaces, and as a reference for hosts
//! writing an adapter over a real text stack.

use core::ops::Range;

use kurbo::{Insets, Rect, Size};

use crate::editor::{AttributedText, Font, TextEditor, clamp_range, non_negative};
use crate::traits::TextTraits;

/// A fixed-advance text editor.
#[derive(Clone, Debug)]
pub struct MonospaceEditor {
    content: AttributedText,
    font: Font,
    inset: Insets,
    advance_ratio: f64,
    selection: Range<usize>,
    frame: Rect,
    focused: bool,
    focusable: bool,
    hidden: bool,
    notifications: bool,
    change_revision: u64,
    last_scrolled_range: Option<Range<usize>>,
    traits: TextTraits,
}

impl MonospaceEditor {
    /// Default padding between the frame and the text container.
    pub const DEFAULT_INSET: Insets = Insets::new(0.0, 8.0, 0.0, 8.0);

    /// Default character advance as a multiple of the font size.
    pub const DEFAULT_ADVANCE_RATIO: f64 = 0.6;

    /// Creates an empty editor with the system font and default insets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: AttributedText::default(),
            font: Font::default(),
            inset: Self::DEFAULT_INSET,
            advance_ratio: Self::DEFAULT_ADVANCE_RATIO,
            selection: 0..0,
            frame: Rect::ZERO,
            focused: false,
            focusable: true,
            hidden: false,
            notifications: true,
            change_revision: 0,
            last_scrolled_range: None,
            traits: TextTraits::default(),
        }
    }

    /// Sets the base font.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Sets the text container inset.
    #[must_use]
    pub fn with_inset(mut self, inset: Insets) -> Self {
        self.inset = inset;
        self
    }

    /// Sets the character advance as a multiple of the font size.
    #[must_use]
    pub fn with_advance_ratio(mut self, ratio: f64) -> Self {
        self.advance_ratio = ratio;
        self
    }

    /// Controls whether focus requests are honored.
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
        if !focusable {
            self.focused = false;
        }
    }

    /// Horizontal advance of one character.
    #[must_use]
    pub fn advance(&self) -> f64 {
        non_negative(self.font.size) * non_negative(self.advance_ratio)
    }

    /// Counter bumped on every content change made while change notifications
    /// are attached.
    #[must_use]
    pub fn change_revision(&self) -> u64 {
        self.change_revision
    }

    /// The range most recently passed to [`TextEditor::scroll_range_to_visible`].
    #[must_use]
    pub fn last_scrolled_range(&self) -> Option<Range<usize>> {
        self.last_scrolled_range.clone()
    }

    fn columns(&self, text_width: f64) -> usize {
        let advance = self.advance();
        if advance <= 0.0 {
            return usize::MAX;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "column counts are small and the cast saturates"
        )]
        let columns = (text_width / advance) as usize;
        columns.max(1)
    }

    fn row_extent(&self, line: Range<usize>) -> f64 {
        self.content
            .attributes_overlapping(line)
            .filter_map(|attributes| {
                let font = attributes.font.as_ref().map(Font::line_extent);
                let attachment = attributes
                    .attachment
                    .as_ref()
                    .map(|attachment| non_negative(attachment.size.height));
                match (font, attachment) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                }
            })
            .fold(self.font.line_extent(), f64::max)
    }

    fn content_changed(&mut self) {
        if self.notifications {
            self.change_revision += 1;
        }
    }
}

impl Default for MonospaceEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn wrapped_rows(chars: usize, columns: usize) -> usize {
    if chars == 0 { 1 } else { chars.div_ceil(columns) }
}

impl TextEditor for MonospaceEditor {
    fn attributed_text(&self) -> &AttributedText {
        &self.content
    }

    fn set_attributed_text(&mut self, text: AttributedText) {
        self.content = text;
        self.selection = clamp_range(self.content.as_str(), self.selection.clone());
        self.content_changed();
    }

    fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        let replaced = self.content.replace_range(range, replacement);
        let caret = replaced.start + replacement.len();
        self.selection = caret..caret;
        self.content_changed();
    }

    fn font(&self) -> &Font {
        &self.font
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn text_container_inset(&self) -> Insets {
        self.inset
    }

    fn set_text_container_inset(&mut self, inset: Insets) {
        self.inset = inset;
    }

    fn measure(&self, width: f64) -> Size {
        let width = non_negative(width);
        let columns = self.columns(non_negative(width - self.inset.x_value()));

        let mut height = 0.0;
        let mut line_start = 0;
        for line in self.content.as_str().split('\n') {
            let range = line_start..line_start + line.len();
            line_start = range.end + 1;
            let rows = wrapped_rows(line.chars().count(), columns);
            height += rows as f64 * self.row_extent(range);
        }
        Size::new(width, non_negative(height + self.inset.y_value()))
    }

    fn selected_range(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn set_selected_range(&mut self, range: Range<usize>) {
        self.selection = clamp_range(self.content.as_str(), range);
    }

    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) -> bool {
        if focused && !self.focusable {
            return false;
        }
        self.focused = focused;
        true
    }

    fn traits(&self) -> &TextTraits {
        &self.traits
    }

    fn traits_mut(&mut self) -> &mut TextTraits {
        &mut self.traits
    }

    fn change_notifications_enabled(&self) -> bool {
        self.notifications
    }

    fn set_change_notifications(&mut self, enabled: bool) {
        self.notifications = enabled;
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn scroll_range_to_visible(&mut self, range: Range<usize>) {
        self.last_scrolled_range = Some(clamp_range(self.content.as_str(), range));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{TextAttachment, TextAttributes};

    fn editor() -> MonospaceEditor {
        // 10px characters, 20px rows, no insets.
        MonospaceEditor::new()
            .with_font(Font::system(10.0).with_line_height(2.0))
            .with_advance_ratio(1.0)
            .with_inset(Insets::ZERO)
    }

    #[test]
    fn empty_text_measures_one_row() {
        let e = editor();
        assert_eq!(e.measure(100.0), Size::new(100.0, 20.0));
    }

    #[test]
    fn long_lines_wrap_by_character() {
        let mut e = editor();
        // 25 characters in 10 columns: three rows.
        e.set_text("abcdefghijklmnopqrstuvwxy");
        assert_eq!(e.measure(100.0).height, 60.0);
        // Explicit line breaks, including a trailing empty line.
        e.set_text("a\nb\n");
        assert_eq!(e.measure(100.0).height, 60.0);
    }

    #[test]
    fn insets_reduce_columns_and_add_height() {
        let mut e = editor().with_inset(Insets::new(5.0, 3.0, 5.0, 7.0));
        // 90px of text width: nine columns, so ten characters take two rows.
        e.set_text("0123456789");
        assert_eq!(e.measure(100.0).height, 2.0 * 20.0 + 10.0);
    }

    #[test]
    fn attribute_fonts_and_attachments_raise_their_rows() {
        let text = AttributedText::new("ab\ncd\nef")
            .with_span(
                0..1,
                TextAttributes {
                    font: Some(Font::system(20.0).with_line_height(2.0)),
                    ..TextAttributes::default()
                },
            )
            .with_span(
                6..7,
                TextAttributes {
                    attachment: Some(TextAttachment {
                        id: 7,
                        size: Size::new(10.0, 50.0),
                    }),
                    ..TextAttributes::default()
                },
            );
        let mut e = editor();
        e.set_attributed_text(text);
        assert_eq!(e.measure(100.0).height, 40.0 + 20.0 + 50.0);
    }

    #[test]
    fn edits_move_the_caret_and_bump_the_revision() {
        let mut e = editor();
        e.set_text("hello");
        let revision = e.change_revision();
        e.replace_range(5..5, " world");
        assert_eq!(e.text(), "hello world");
        assert_eq!(e.selected_range(), 11..11);
        assert_eq!(e.change_revision(), revision + 1);

        e.set_change_notifications(false);
        e.set_text("quiet");
        assert_eq!(e.change_revision(), revision + 1, "detached edits are silent");
    }

    #[test]
    fn unfocusable_editor_rejects_focus() {
        let mut e = editor();
        e.set_focusable(false);
        assert!(!e.set_focused(true));
        assert!(!e.is_focused());
        assert!(e.set_focused(false));
    }
}
