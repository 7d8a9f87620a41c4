// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_growing_text --heading-base-level=0

//! Understory Growing Text: a headless core for self-resizing text inputs.
//!
//! A growing text input shows between a minimum and a maximum number of lines.
//! Below the maximum, the input grows and shrinks with its content. At the
//! maximum, the content keeps growing inside a scroll container while the
//! presented height stays put.
//!
//! This crate implements the height logic and leaves text editing, shaping and
//! rendering to the host. The core concepts are:
//!
//! - [`TextEditor`]: the text editing collaborator. It owns content, font,
//!   insets and selection, and measures its natural size at a given width.
//!   [`MonospaceEditor`] is a deterministic fixed-advance implementation.
//! - [`simulate_height`] and [`ProbeGuard`]: measure how tall `n` lines would
//!   be by probing the editor with placeholder text, then restore it without
//!   firing change notifications.
//! - [`HeightPolicy`]: derives minimum and maximum heights from line counts
//!   and clamps measured heights into the presented height.
//! - [`GrowingTextView`]: wires it all together. Its mutators relayout as
//!   needed, keep the view pinned to the bottom while content grows, and report
//!   height changes to a [`GrowingTextListener`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_growing_text::{GrowingTextView, MonospaceEditor, simulate_height};
//!
//! let frame = Rect::new(0.0, 0.0, 300.0, 0.0);
//! let mut view = GrowingTextView::new(MonospaceEditor::new(), frame);
//!
//! // Empty content presents one line.
//! let mut reference = MonospaceEditor::new();
//! let one_line = simulate_height(&mut reference, 1, 300.0);
//! assert_eq!(view.current_height(), one_line);
//!
//! // Two lines grow the view.
//! view.set_text("first\nsecond");
//! assert_eq!(view.current_height(), simulate_height(&mut reference, 2, 300.0));
//!
//! // Ten lines are capped at the default maximum of three; the rest scrolls.
//! view.set_text("1\n2\n3\n4\n5\n6\n7\n8\n9\n10");
//! assert_eq!(view.current_height(), simulate_height(&mut reference, 3, 300.0));
//! assert!(view.content_size().height > view.current_height());
//! ```
//!
//! ## Host integration
//!
//! Hosts are responsible for:
//!
//! - Routing user edits through [`GrowingTextView::handle_edit`] (or calling
//!   [`GrowingTextView::text_did_change`] after the editor changed itself).
//! - Calling [`GrowingTextView::layout`] from their layout hook after
//!   [`GrowingTextView::set_frame`]; only width changes trigger work.
//! - Positioning and drawing the editor at [`TextEditor::frame`] inside a
//!   container of [`GrowingTextView::frame`], scrolled by
//!   [`GrowingTextView::content_offset`].
//! - Re-querying [`GrowingTextView::intrinsic_content_size`] when
//!   [`GrowingTextView::take_intrinsic_size_invalidation`] reports `true`.
//!
//! Diagnostics are emitted through the [`log`] facade at `debug` and `trace`
//! levels.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod editor;
mod layout;
mod listener;
mod monospace;
mod policy;
mod probe;
mod scroll;
mod traits;
mod view;

pub use editor::{AttributeSpan, AttributedText, Font, TextAttachment, TextAttributes, TextEditor};
pub use layout::LayoutPass;
pub use listener::{EventRecorder, Gates, GrowingTextListener, NoopListener, TextViewEvent};
pub use monospace::MonospaceEditor;
pub use policy::HeightPolicy;
pub use probe::{EditorProbe, HeightSimulator, ProbeGuard, probe_text, simulate_height};
pub use scroll::ScrollState;
pub use traits::{
    AutocorrectionType, DataDetectorTypes, InputViewId, KeyboardType, ReturnKeyType,
    TextAlignment, TextTraits,
};
pub use view::{GrowingTextConfig, GrowingTextView};
