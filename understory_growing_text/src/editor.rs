// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text editing collaborator and the text model it exchanges with the view.
//!
//! A [`GrowingTextView`](crate::GrowingTextView) never edits or lays out text
//! itself. It drives an implementation of [`TextEditor`], which owns the live
//! content, font, insets and selection, and which can report the natural size
//! of its content at a given width.
//!
//! Ranges are byte ranges into the UTF-8 text. Implementations clamp ranges to
//! the text length and snap them down to character boundaries, so callers may
//! pass stale ranges without panicking.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Insets, Rect, Size};
use peniko::Color;

use crate::traits::TextTraits;

/// A font description used for measurement.
///
/// Only the metrics that influence line height are modeled here; shaping and
/// glyph selection belong to the editor implementation.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Family name passed through to the editor.
    pub family: Cow<'static, str>,
    /// Font size in logical pixels.
    pub size: f64,
    /// Line height as a multiple of `size`.
    pub line_height: f64,
}

impl Font {
    /// Size of the default system font.
    pub const DEFAULT_SIZE: f64 = 16.0;

    /// Line height multiple applied by [`Font::system`].
    pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

    /// Creates the system UI font at the given size.
    #[must_use]
    pub fn system(size: f64) -> Self {
        Self {
            family: Cow::Borrowed("system-ui"),
            size,
            line_height: Self::DEFAULT_LINE_HEIGHT,
        }
    }

    /// Returns a copy of this font with a different line height multiple.
    #[must_use]
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    /// Height of one line set in this font.
    ///
    /// Negative and NaN metrics count as zero.
    #[must_use]
    pub fn line_extent(&self) -> f64 {
        non_negative(self.size) * non_negative(self.line_height)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(Self::DEFAULT_SIZE)
    }
}

/// An inline attachment (image, file chip, ...) embedded in attributed text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextAttachment {
    /// Host-defined identifier for the attachment payload.
    pub id: u64,
    /// Size the attachment occupies when laid out.
    pub size: Size,
}

/// Attributes applied to a run of attributed text.
///
/// Every field is optional; `None` means "inherit from the editor".
#[derive(Clone, Debug, Default)]
pub struct TextAttributes {
    /// Font override for the run.
    pub font: Option<Font>,
    /// Foreground color override for the run.
    pub color: Option<Color>,
    /// Link target, if the run is a link.
    pub link: Option<String>,
    /// Attachment carried by the run.
    pub attachment: Option<TextAttachment>,
}

/// A run of attributes over a byte range.
#[derive(Clone, Debug)]
pub struct AttributeSpan {
    /// Byte range the attributes apply to.
    pub range: Range<usize>,
    /// The attributes.
    pub attributes: TextAttributes,
}

/// Text plus attribute runs.
///
/// Plain text is attributed text without spans; converting from `&str` or
/// `String` yields exactly that.
#[derive(Clone, Debug, Default)]
pub struct AttributedText {
    text: String,
    spans: Vec<AttributeSpan>,
}

impl AttributedText {
    /// Creates attributed text with no attribute runs.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Adds an attribute run, clamping its range to the text.
    ///
    /// Empty runs are dropped.
    #[must_use]
    pub fn with_span(mut self, range: Range<usize>, attributes: TextAttributes) -> Self {
        self.push_span(range, attributes);
        self
    }

    /// Adds an attribute run, clamping its range to the text.
    pub fn push_span(&mut self, range: Range<usize>, attributes: TextAttributes) {
        let range = clamp_range(&self.text, range);
        if range.is_empty() {
            return;
        }
        self.spans.push(AttributeSpan { range, attributes });
    }

    /// The plain text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Attribute runs in insertion order.
    #[must_use]
    pub fn spans(&self) -> &[AttributeSpan] {
        &self.spans
    }

    /// Returns `true` if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of the text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Replaces `range` with `replacement`, keeping attribute runs aligned.
    ///
    /// Runs that fully contain the edited range grow or shrink with it, runs
    /// after it shift, and runs that end up empty are removed. Returns the
    /// range actually replaced after clamping.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> Range<usize> {
        let range = clamp_range(&self.text, range);
        self.text.replace_range(range.clone(), replacement);

        let removed = range.end - range.start;
        let inserted = replacement.len();
        let shift = |offset: usize| {
            if offset <= range.start {
                offset
            } else if offset >= range.end {
                offset - removed + inserted
            } else {
                range.start
            }
        };
        self.spans.retain_mut(|span| {
            span.range = shift(span.range.start)..shift(span.range.end);
            !span.range.is_empty()
        });
        range
    }

    /// Iterates over the attributes of runs overlapping `range`.
    pub fn attributes_overlapping(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = &TextAttributes> + '_ {
        self.spans
            .iter()
            .filter(move |span| span.range.start < range.end && range.start < span.range.end)
            .map(|span| &span.attributes)
    }
}

impl From<&str> for AttributedText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for AttributedText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// The text editing collaborator driven by a growing text view.
///
/// Implementations own the live content and report their natural size via
/// [`TextEditor::measure`], which must be a pure function of the current
/// content, font, insets and the given width.
///
/// The optional hooks ([`set_change_notifications`](TextEditor::set_change_notifications),
/// [`set_hidden`](TextEditor::set_hidden),
/// [`scroll_range_to_visible`](TextEditor::scroll_range_to_visible)) default to
/// no-ops for editors that have no such concept, and their getters then report
/// an attached, visible editor.
pub trait TextEditor {
    /// Current content with attributes.
    fn attributed_text(&self) -> &AttributedText;

    /// Replaces the content with attributed text.
    fn set_attributed_text(&mut self, text: AttributedText);

    /// Commits a user edit replacing `range` with `replacement`.
    fn replace_range(&mut self, range: Range<usize>, replacement: &str);

    /// The base font.
    fn font(&self) -> &Font;

    /// Sets the base font.
    fn set_font(&mut self, font: Font);

    /// Padding between the editor frame and its text container.
    fn text_container_inset(&self) -> Insets;

    /// Sets the padding between the editor frame and its text container.
    fn set_text_container_inset(&mut self, inset: Insets);

    /// Natural size of the content laid out at `width` with unbounded height.
    fn measure(&self, width: f64) -> Size;

    /// Current selection as a byte range.
    fn selected_range(&self) -> Range<usize>;

    /// Sets the selection.
    fn set_selected_range(&mut self, range: Range<usize>);

    /// The editor's frame inside the scroll container.
    fn frame(&self) -> Rect;

    /// Sets the editor's frame inside the scroll container.
    fn set_frame(&mut self, frame: Rect);

    /// Returns `true` if the editor holds keyboard focus.
    fn is_focused(&self) -> bool;

    /// Requests or releases keyboard focus, returning whether the request was honored.
    fn set_focused(&mut self, focused: bool) -> bool;

    /// Pass-through configuration.
    fn traits(&self) -> &TextTraits;

    /// Mutable pass-through configuration.
    fn traits_mut(&mut self) -> &mut TextTraits;

    /// Current content as plain text.
    fn text(&self) -> &str {
        self.attributed_text().as_str()
    }

    /// Replaces the content with plain text, dropping attribute runs.
    fn set_text(&mut self, text: &str) {
        self.set_attributed_text(AttributedText::new(text));
    }

    /// Returns `true` if there is any text to show.
    fn has_text(&self) -> bool {
        !self.text().is_empty()
    }

    /// Returns `true` while the change-notification path is attached.
    fn change_notifications_enabled(&self) -> bool {
        true
    }

    /// Attaches or detaches the editor's change-notification path.
    fn set_change_notifications(&mut self, enabled: bool) {
        let _ = enabled;
    }

    /// Returns `true` while the editor is hidden.
    fn is_hidden(&self) -> bool {
        false
    }

    /// Hides or shows the editor.
    fn set_hidden(&mut self, hidden: bool) {
        let _ = hidden;
    }

    /// Scrolls the editor so that `range` is visible.
    fn scroll_range_to_visible(&mut self, range: Range<usize>) {
        let _ = range;
    }
}

/// Clamps `range` to `text`, snapping both ends down to character boundaries.
pub(crate) fn clamp_range(text: &str, range: Range<usize>) -> Range<usize> {
    let end = floor_char_boundary(text, range.end);
    let start = floor_char_boundary(text, range.start.min(end));
    start..end
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Treats negative and NaN extents as zero.
pub(crate) fn non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}
