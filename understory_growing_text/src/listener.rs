// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hooks invoked by a growing text view.
//!
//! [`GrowingTextListener`] has one method per event, each with a default, so
//! implementors override only what they care about. The `should_*` methods are
//! gates: they are consulted before the change they guard is applied, and
//! returning `false` drops the change without further effect. Every gate
//! defaults to `true`.
//!
//! [`EventRecorder`] implements every hook by appending a [`TextViewEvent`],
//! which makes it a convenient observer in tests and inspectors.
//!
//! ```rust
//! use understory_growing_text::{
//!     GrowingTextListener, GrowingTextView, MonospaceEditor, TextEditor,
//! };
//! use kurbo::Rect;
//!
//! /// Rejects edits that would insert a tab.
//! struct NoTabs;
//!
//! impl<E: TextEditor> GrowingTextListener<E> for NoTabs {
//!     fn should_change_text(&mut self, _: &E, _: core::ops::Range<usize>, text: &str) -> bool {
//!         !text.contains('\t')
//!     }
//! }
//!
//! let frame = Rect::new(0.0, 0.0, 300.0, 0.0);
//! let mut view = GrowingTextView::new(MonospaceEditor::new(), frame).with_listener(NoTabs);
//! assert!(view.handle_edit(0..0, "hello"));
//! assert!(!view.handle_edit(5..5, "\t"));
//! assert_eq!(view.text(), "hello");
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::editor::TextAttachment;

/// Observer and gatekeeper for a growing text view over editor `E`.
pub trait GrowingTextListener<E: ?Sized> {
    /// Gate consulted before a user edit replaces `range` with `replacement`.
    fn should_change_text(
        &mut self,
        _editor: &E,
        _range: Range<usize>,
        _replacement: &str,
    ) -> bool {
        true
    }

    /// Gate consulted before a link in `range` is followed.
    fn should_interact_with_url(&mut self, _editor: &E, _url: &str, _range: Range<usize>) -> bool {
        true
    }

    /// Gate consulted before an attachment in `range` is activated.
    fn should_interact_with_attachment(
        &mut self,
        _editor: &E,
        _attachment: &TextAttachment,
        _range: Range<usize>,
    ) -> bool {
        true
    }

    /// Gate consulted before the editor takes focus.
    fn should_begin_editing(&mut self, _editor: &E) -> bool {
        true
    }

    /// Gate consulted before the editor gives up focus.
    fn should_end_editing(&mut self, _editor: &E) -> bool {
        true
    }

    /// The editor took focus.
    fn did_begin_editing(&mut self, _editor: &E) {}

    /// The editor gave up focus.
    fn did_end_editing(&mut self, _editor: &E) {}

    /// The user changed the selection.
    fn did_change_selection(&mut self, _editor: &E) {}

    /// The user changed the text. Fired before the resulting relayout.
    fn did_change(&mut self, _editor: &E) {}

    /// The presented height is about to change to `height`.
    fn will_change_height(&mut self, _height: f64) {}

    /// A layout pass finished with the presented height at `height`.
    ///
    /// Fired after every pass, including passes that left the height as it was.
    fn did_change_height(&mut self, _height: f64) {}
}

/// A listener that observes nothing and allows everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl<E: ?Sized> GrowingTextListener<E> for NoopListener {}

/// An event observed by an [`EventRecorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum TextViewEvent {
    /// [`GrowingTextListener::should_change_text`] was consulted.
    ShouldChangeText {
        /// Range about to be replaced.
        range: Range<usize>,
        /// Replacement text.
        replacement: String,
    },
    /// [`GrowingTextListener::should_interact_with_url`] was consulted.
    ShouldInteractWithUrl {
        /// Link target.
        url: String,
        /// Range of the link run.
        range: Range<usize>,
    },
    /// [`GrowingTextListener::should_interact_with_attachment`] was consulted.
    ShouldInteractWithAttachment {
        /// The attachment.
        attachment: TextAttachment,
        /// Range of the attachment run.
        range: Range<usize>,
    },
    /// [`GrowingTextListener::should_begin_editing`] was consulted.
    ShouldBeginEditing,
    /// [`GrowingTextListener::should_end_editing`] was consulted.
    ShouldEndEditing,
    /// The editor took focus.
    DidBeginEditing,
    /// The editor gave up focus.
    DidEndEditing,
    /// The user changed the selection.
    DidChangeSelection,
    /// The user changed the text.
    DidChange,
    /// The presented height is about to change.
    WillChangeHeight(f64),
    /// A layout pass finished.
    DidChangeHeight(f64),
}

/// Answers returned by an [`EventRecorder`]'s gates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gates {
    /// Answer for [`GrowingTextListener::should_change_text`].
    pub change_text: bool,
    /// Answer for [`GrowingTextListener::should_interact_with_url`].
    pub interact_with_url: bool,
    /// Answer for [`GrowingTextListener::should_interact_with_attachment`].
    pub interact_with_attachment: bool,
    /// Answer for [`GrowingTextListener::should_begin_editing`].
    pub begin_editing: bool,
    /// Answer for [`GrowingTextListener::should_end_editing`].
    pub end_editing: bool,
}

impl Default for Gates {
    fn default() -> Self {
        Self {
            change_text: true,
            interact_with_url: true,
            interact_with_attachment: true,
            begin_editing: true,
            end_editing: true,
        }
    }
}

/// A listener that records every event in order.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Vec<TextViewEvent>,
    /// Answers given by the gates.
    pub gates: Gates,
}

impl EventRecorder {
    /// Creates an empty recorder whose gates allow everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty recorder with the given gate answers.
    #[must_use]
    pub fn with_gates(gates: Gates) -> Self {
        Self {
            events: Vec::new(),
            gates,
        }
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[TextViewEvent] {
        &self.events
    }

    /// Removes and returns the recorded events.
    pub fn take(&mut self) -> Vec<TextViewEvent> {
        core::mem::take(&mut self.events)
    }

    /// Forgets the recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Heights announced through [`GrowingTextListener::will_change_height`].
    pub fn will_change_heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.events.iter().filter_map(|event| match event {
            TextViewEvent::WillChangeHeight(height) => Some(*height),
            _ => None,
        })
    }
}

impl<E: ?Sized> GrowingTextListener<E> for EventRecorder {
    fn should_change_text(
        &mut self,
        _editor: &E,
        range: Range<usize>,
        replacement: &str,
    ) -> bool {
        self.events.push(TextViewEvent::ShouldChangeText {
            range,
            replacement: replacement.into(),
        });
        self.gates.change_text
    }

    fn should_interact_with_url(&mut self, _editor: &E, url: &str, range: Range<usize>) -> bool {
        self.events.push(TextViewEvent::ShouldInteractWithUrl {
            url: url.into(),
            range,
        });
        self.gates.interact_with_url
    }

    fn should_interact_with_attachment(
        &mut self,
        _editor: &E,
        attachment: &TextAttachment,
        range: Range<usize>,
    ) -> bool {
        self.events.push(TextViewEvent::ShouldInteractWithAttachment {
            attachment: attachment.clone(),
            range,
        });
        self.gates.interact_with_attachment
    }

    fn should_begin_editing(&mut self, _editor: &E) -> bool {
        self.events.push(TextViewEvent::ShouldBeginEditing);
        self.gates.begin_editing
    }

    fn should_end_editing(&mut self, _editor: &E) -> bool {
        self.events.push(TextViewEvent::ShouldEndEditing);
        self.gates.end_editing
    }

    fn did_begin_editing(&mut self, _editor: &E) {
        self.events.push(TextViewEvent::DidBeginEditing);
    }

    fn did_end_editing(&mut self, _editor: &E) {
        self.events.push(TextViewEvent::DidEndEditing);
    }

    fn did_change_selection(&mut self, _editor: &E) {
        self.events.push(TextViewEvent::DidChangeSelection);
    }

    fn did_change(&mut self, _editor: &E) {
        self.events.push(TextViewEvent::DidChange);
    }

    fn will_change_height(&mut self, height: f64) {
        self.events.push(TextViewEvent::WillChangeHeight(height));
    }

    fn did_change_height(&mut self, height: f64) {
        self.events.push(TextViewEvent::DidChangeHeight(height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_listener_allows_everything() {
        let mut listener = NoopListener;
        let editor = ();
        assert!(listener.should_change_text(&editor, 0..0, "x"));
        assert!(listener.should_interact_with_url(&editor, "https://example.com", 0..1));
        assert!(listener.should_begin_editing(&editor));
        assert!(listener.should_end_editing(&editor));
    }

    #[test]
    fn recorder_keeps_order_and_answers_from_gates() {
        let mut recorder = EventRecorder::with_gates(Gates {
            interact_with_url: false,
            ..Gates::default()
        });
        let editor = ();
        assert!(!recorder.should_interact_with_url(&editor, "https://example.com", 2..9));
        GrowingTextListener::<()>::will_change_height(&mut recorder, 40.0);
        GrowingTextListener::<()>::did_change_height(&mut recorder, 40.0);

        assert_eq!(
            recorder.take(),
            [
                TextViewEvent::ShouldInteractWithUrl {
                    url: "https://example.com".into(),
                    range: 2..9,
                },
                TextViewEvent::WillChangeHeight(40.0),
                TextViewEvent::DidChangeHeight(40.0),
            ]
        );
        assert!(recorder.events().is_empty());
    }
}
