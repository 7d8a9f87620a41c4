// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The growing text view: configuration, pass-through properties, focus and
//! user-input entry points.
//!
//! Layout passes are implemented in the `layout` module.

use core::ops::Range;

use kurbo::{Insets, Point, Rect, Size, Vec2};
use peniko::Color;

use crate::editor::{AttributedText, Font, TextAttachment, TextAttributes, TextEditor};
use crate::listener::{GrowingTextListener, NoopListener};
use crate::policy::HeightPolicy;
use crate::probe::EditorProbe;
use crate::scroll::ScrollState;
use crate::traits::{
    AutocorrectionType, DataDetectorTypes, InputViewId, KeyboardType, ReturnKeyType,
    TextAlignment,
};

/// Initial configuration of a [`GrowingTextView`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowingTextConfig {
    /// Minimum number of visible lines.
    pub min_lines: usize,
    /// Maximum number of visible lines before content scrolls.
    pub max_lines: usize,
    /// Keep the view pinned to the bottom as content grows, if it was there.
    pub auto_scroll_to_bottom: bool,
}

impl Default for GrowingTextConfig {
    fn default() -> Self {
        Self {
            min_lines: HeightPolicy::DEFAULT_MIN_LINES,
            max_lines: HeightPolicy::DEFAULT_MAX_LINES,
            auto_scroll_to_bottom: true,
        }
    }
}

/// A text input that grows with its content between a minimum and a maximum
/// number of lines, scrolling once the maximum is reached.
///
/// The view owns a [`TextEditor`] and a [`GrowingTextListener`]. Every mutator
/// that can change the content height relayouts before returning, so
/// [`frame`](Self::frame) always reflects the current content.
#[derive(Debug)]
pub struct GrowingTextView<E, L = NoopListener> {
    pub(crate) editor: E,
    pub(crate) listener: L,
    pub(crate) policy: HeightPolicy,
    pub(crate) scroll: ScrollState,
    pub(crate) frame: Rect,
    pub(crate) last_known_width: f64,
    pub(crate) auto_scroll_to_bottom: bool,
    pub(crate) layout_revision: u64,
    pub(crate) intrinsic_size_invalidated: bool,
}

impl<E: TextEditor> GrowingTextView<E> {
    /// Wraps `editor` in a view occupying `frame`, with default configuration.
    pub fn new(editor: E, frame: Rect) -> Self {
        Self::with_config(editor, frame, GrowingTextConfig::default())
    }

    /// Wraps `editor` in a view occupying `frame`.
    ///
    /// Bounds are derived at the frame's width and a first layout pass runs,
    /// so the returned view already presents its minimum height.
    pub fn with_config(mut editor: E, frame: Rect, config: GrowingTextConfig) -> Self {
        editor.set_frame(Rect::from_origin_size(Point::ZERO, frame.size()));
        let mut view = Self {
            editor,
            listener: NoopListener,
            policy: HeightPolicy::with_lines(config.min_lines, config.max_lines),
            scroll: ScrollState::new(),
            frame,
            last_known_width: frame.width(),
            auto_scroll_to_bottom: config.auto_scroll_to_bottom,
            layout_revision: 0,
            intrinsic_size_invalidated: false,
        };
        view.recompute_bounds();
        view.relayout();
        view
    }
}

impl<E: TextEditor, L> GrowingTextView<E, L> {
    /// Replaces the listener, possibly with one of a different type.
    pub fn with_listener<M: GrowingTextListener<E>>(self, listener: M) -> GrowingTextView<E, M> {
        GrowingTextView {
            editor: self.editor,
            listener,
            policy: self.policy,
            scroll: self.scroll,
            frame: self.frame,
            last_known_width: self.last_known_width,
            auto_scroll_to_bottom: self.auto_scroll_to_bottom,
            layout_revision: self.layout_revision,
            intrinsic_size_invalidated: self.intrinsic_size_invalidated,
        }
    }

    /// Splits the view into its editor and listener.
    pub fn into_parts(self) -> (E, L) {
        (self.editor, self.listener)
    }

    /// The wrapped editor.
    #[must_use]
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Mutable access to the wrapped editor.
    ///
    /// Changes made here bypass layout; follow content changes with
    /// [`text_did_change`](Self::text_did_change) or
    /// [`relayout`](Self::relayout).
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// The listener.
    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Mutable access to the listener.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// The height policy in effect.
    #[must_use]
    pub fn policy(&self) -> &HeightPolicy {
        &self.policy
    }

    /// The container's frame; its height is the presented height.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The presented height.
    #[must_use]
    pub fn current_height(&self) -> f64 {
        self.frame.height()
    }

    /// Derived minimum presented height.
    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.policy.min_height()
    }

    /// Derived maximum presented height; `0` means unbounded.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.policy.max_height()
    }

    /// Size of the scrollable content (the editor's natural size).
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.scroll.content_size()
    }

    /// Current scroll offset.
    #[must_use]
    pub fn content_offset(&self) -> Vec2 {
        self.scroll.offset()
    }

    /// Scrolls the container, as a user drag would.
    pub fn set_content_offset(&mut self, offset: Vec2) {
        self.scroll.set_offset(offset);
    }

    /// Scroll state of the container.
    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Number of scroll-indicator flashes requested so far.
    #[must_use]
    pub fn indicator_flashes(&self) -> u64 {
        self.scroll.indicator_flashes()
    }

    /// Number of layout passes run so far.
    #[must_use]
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision
    }

    /// Returns whether the intrinsic size was invalidated since the last call,
    /// and clears the flag.
    ///
    /// Hosts with an enclosing layout (a stack, a flex container) poll this to
    /// know when to re-query [`intrinsic_content_size`](Self::intrinsic_content_size).
    pub fn take_intrinsic_size_invalidation(&mut self) -> bool {
        core::mem::take(&mut self.intrinsic_size_invalidated)
    }

    /// Whether the view keeps itself pinned to the bottom as content grows.
    #[must_use]
    pub fn auto_scroll_to_bottom(&self) -> bool {
        self.auto_scroll_to_bottom
    }

    /// Enables or disables pinning to the bottom.
    pub fn set_auto_scroll_to_bottom(&mut self, enabled: bool) {
        self.auto_scroll_to_bottom = enabled;
    }

    /// Returns `true` if the editor holds keyboard focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.editor.is_focused()
    }

    /// Current content as plain text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.editor.text()
    }

    /// Current content with attributes.
    #[must_use]
    pub fn attributed_text(&self) -> &AttributedText {
        self.editor.attributed_text()
    }

    /// The editor's base font.
    #[must_use]
    pub fn font(&self) -> &Font {
        self.editor.font()
    }

    /// The editor's text container inset.
    #[must_use]
    pub fn text_container_inset(&self) -> Insets {
        self.editor.text_container_inset()
    }

    /// Configured minimum line count.
    #[must_use]
    pub fn min_number_of_lines(&self) -> usize {
        self.policy.min_lines()
    }

    /// Configured maximum line count.
    #[must_use]
    pub fn max_number_of_lines(&self) -> usize {
        self.policy.max_lines()
    }

    /// Current selection as a byte range.
    #[must_use]
    pub fn selected_range(&self) -> Range<usize> {
        self.editor.selected_range()
    }

    /// Sets the selection without notifying the listener.
    pub fn set_selected_range(&mut self, range: Range<usize>) {
        self.editor.set_selected_range(range);
    }

    /// Asks the editor to scroll `range` into view.
    pub fn scroll_range_to_visible(&mut self, range: Range<usize>) {
        self.editor.scroll_range_to_visible(range);
    }

    /// Attributes applied to newly typed text.
    #[must_use]
    pub fn typing_attributes(&self) -> &TextAttributes {
        &self.editor.traits().typing_attributes
    }

    /// Sets the attributes applied to newly typed text.
    pub fn set_typing_attributes(&mut self, attributes: TextAttributes) {
        self.editor.traits_mut().typing_attributes = attributes;
    }

    /// Attributes applied to link runs.
    #[must_use]
    pub fn link_attributes(&self) -> &TextAttributes {
        &self.editor.traits().link_attributes
    }

    /// Sets the attributes applied to link runs.
    pub fn set_link_attributes(&mut self, attributes: TextAttributes) {
        self.editor.traits_mut().link_attributes = attributes;
    }

    /// Text shown while the editor is empty.
    #[must_use]
    pub fn placeholder_attributed_text(&self) -> Option<&AttributedText> {
        self.editor.traits().placeholder.as_ref()
    }

    /// Sets the text shown while the editor is empty.
    pub fn set_placeholder_attributed_text(&mut self, placeholder: Option<AttributedText>) {
        self.editor.traits_mut().placeholder = placeholder;
    }
}

macro_rules! forward_traits {
    ($($(#[$doc:meta])* $field:ident, $setter:ident: $ty:ty;)*) => {
        impl<E: TextEditor, L> GrowingTextView<E, L> {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $field(&self) -> $ty {
                    self.editor.traits().$field
                }

                #[doc = concat!(
                    "Sets [`", stringify!($field), "`](Self::", stringify!($field), ")."
                )]
                pub fn $setter(&mut self, value: $ty) {
                    self.editor.traits_mut().$field = value;
                }
            )*
        }
    };
}

forward_traits! {
    /// Base text color.
    text_color, set_text_color: Color;
    /// Line alignment.
    alignment, set_alignment: TextAlignment;
    /// Content kinds the editor detects and makes interactive.
    data_detector_types, set_data_detector_types: DataDetectorTypes;
    /// Whether text can be selected.
    selectable, set_selectable: bool;
    /// Whether the user may edit text attributes.
    allows_editing_text_attributes, set_allows_editing_text_attributes: bool;
    /// Requested keyboard layout.
    keyboard_type, set_keyboard_type: KeyboardType;
    /// Requested autocorrection behavior.
    autocorrection_type, set_autocorrection_type: AutocorrectionType;
    /// Return key label.
    return_key_type, set_return_key_type: ReturnKeyType;
    /// Custom input view replacing the system keyboard.
    input_view, set_input_view: Option<InputViewId>;
    /// Accessory view shown above the keyboard.
    input_accessory_view, set_input_accessory_view: Option<InputViewId>;
    /// Whether inserting text replaces the previous content.
    clears_on_insertion, set_clears_on_insertion: bool;
}

impl<E: TextEditor, L: GrowingTextListener<E>> GrowingTextView<E, L> {
    /// Replaces the content with plain text and relayouts.
    pub fn set_text(&mut self, text: &str) {
        self.editor.set_text(text);
        self.relayout();
    }

    /// Replaces the content with attributed text and relayouts.
    pub fn set_attributed_text(&mut self, text: AttributedText) {
        self.editor.set_attributed_text(text);
        self.relayout();
    }

    /// Sets the base font, re-derives the height bounds and relayouts.
    pub fn set_font(&mut self, font: Font) {
        self.editor.set_font(font);
        self.update_bounds_and_relayout();
    }

    /// Sets the text container inset, re-derives the height bounds and relayouts.
    pub fn set_text_container_inset(&mut self, inset: Insets) {
        self.editor.set_text_container_inset(inset);
        self.update_bounds_and_relayout();
    }

    /// Sets the minimum line count and relayouts.
    ///
    /// Counts of `1` or less mean a one-line minimum.
    pub fn set_min_number_of_lines(&mut self, lines: usize) {
        let mut probe = EditorProbe::new(&mut self.editor, self.frame.width());
        self.policy.set_min_lines(lines, &mut probe);
        self.relayout();
    }

    /// Sets the maximum line count and relayouts.
    ///
    /// Counts of `1` or less mean a one-line maximum, not an unbounded one.
    pub fn set_max_number_of_lines(&mut self, lines: usize) {
        let mut probe = EditorProbe::new(&mut self.editor, self.frame.width());
        self.policy.set_max_lines(lines, &mut probe);
        self.relayout();
    }

    /// Fixes the minimum presented height and relayouts.
    pub fn set_min_height(&mut self, height: f64) {
        self.policy.set_min_height(height);
        self.relayout();
    }

    /// Fixes the maximum presented height and relayouts; `0` lifts the cap.
    pub fn set_max_height(&mut self, height: f64) {
        self.policy.set_max_height(height);
        self.relayout();
    }

    /// Requests keyboard focus.
    ///
    /// Consults [`GrowingTextListener::should_begin_editing`] first. Returns
    /// `true` if the editor holds focus afterwards.
    pub fn become_focused(&mut self) -> bool {
        if self.editor.is_focused() {
            return true;
        }
        if !self.listener.should_begin_editing(&self.editor) || !self.editor.set_focused(true) {
            return false;
        }
        self.listener.did_begin_editing(&self.editor);
        true
    }

    /// Gives up keyboard focus.
    ///
    /// Consults [`GrowingTextListener::should_end_editing`] first. Returns
    /// `true` if the editor no longer holds focus afterwards.
    pub fn resign_focused(&mut self) -> bool {
        if !self.editor.is_focused() {
            return true;
        }
        if !self.listener.should_end_editing(&self.editor) || !self.editor.set_focused(false) {
            return false;
        }
        self.listener.did_end_editing(&self.editor);
        true
    }

    /// Applies a user edit replacing `range` with `replacement`.
    ///
    /// The edit is offered to [`GrowingTextListener::should_change_text`]
    /// first; when rejected nothing changes and `false` is returned.
    pub fn handle_edit(&mut self, range: Range<usize>, replacement: &str) -> bool {
        if !self.listener.should_change_text(&self.editor, range.clone(), replacement) {
            return false;
        }
        self.editor.replace_range(range, replacement);
        self.text_did_change();
        true
    }

    /// Reports that the editor's text changed on its own (user typing routed
    /// elsewhere, IME commit, ...). Notifies the listener, then relayouts.
    pub fn text_did_change(&mut self) {
        self.listener.did_change(&self.editor);
        self.relayout();
    }

    /// Applies a user selection change and notifies the listener.
    pub fn handle_selection_change(&mut self, range: Range<usize>) {
        self.editor.set_selected_range(range);
        self.listener.did_change_selection(&self.editor);
    }

    /// Asks whether following the link at `range` is allowed.
    pub fn handle_url_interaction(&mut self, url: &str, range: Range<usize>) -> bool {
        self.listener.should_interact_with_url(&self.editor, url, range)
    }

    /// Asks whether activating the attachment at `range` is allowed.
    pub fn handle_attachment_interaction(
        &mut self,
        attachment: &TextAttachment,
        range: Range<usize>,
    ) -> bool {
        self.listener
            .should_interact_with_attachment(&self.editor, attachment, range)
    }

    fn update_bounds_and_relayout(&mut self) {
        self.recompute_bounds();
        self.relayout();
    }
}
