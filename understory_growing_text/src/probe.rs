// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Height simulation for hypothetical line counts.
//!
//! To learn how tall `n` lines are, the editor is temporarily loaded with a
//! probe string (`"-"` followed by `n - 1` lines of `"|W|"`) and measured. The
//! extra lines carry visible glyphs so that layout engines which collapse
//! empty trailing lines still report their height.
//!
//! The probe runs under a [`ProbeGuard`], which detaches the editor's change
//! notifications and hides it for the guard's lifetime. Dropping the guard puts
//! content, selection, visibility and notifications back as they were. Callers never observe
//! the probe text, and simulation does not depend on the current content.

use alloc::string::String;
use core::mem;
use core::ops::Range;

use crate::editor::{AttributedText, TextEditor};

const PROBE_FIRST_LINE: &str = "-";
const PROBE_EXTRA_LINE: &str = "\n|W|";

/// Computes the height a number of lines would occupy.
pub trait HeightSimulator {
    /// Height of `line_count` lines. A count of `0` is treated as `1`.
    fn simulate_height(&mut self, line_count: usize) -> f64;
}

impl<F: FnMut(usize) -> f64> HeightSimulator for F {
    fn simulate_height(&mut self, line_count: usize) -> f64 {
        self(line_count.max(1))
    }
}

/// Builds the probe string for `line_count` lines.
#[must_use]
pub fn probe_text(line_count: usize) -> String {
    let mut text = String::new();
    if let Some(capacity) = probe_capacity(line_count) {
        // Best effort.
        let _ = text.try_reserve_exact(capacity);
    }
    text.push_str(PROBE_FIRST_LINE);
    for _ in 1..line_count {
        text.push_str(PROBE_EXTRA_LINE);
    }
    text
}

/// Byte length of the probe for `line_count` lines, or `None` if it does not
/// fit in `usize`.
fn probe_capacity(line_count: usize) -> Option<usize> {
    let extra = line_count.max(1) - 1;
    extra
        .checked_mul(PROBE_EXTRA_LINE.len())?
        .checked_add(PROBE_FIRST_LINE.len())
}

/// Scoped access to an editor with its visible state parked.
///
/// While the guard lives the editor is hidden and its change notifications are
/// detached. Dropping the guard restores the saved content and selection first
/// and only then restores notifications, so the restore itself is silent.
/// Visibility and notifications return to whatever they were before the guard,
/// so an editor the host had hidden or detached stays that way.
#[derive(Debug)]
pub struct ProbeGuard<'a, E: TextEditor + ?Sized> {
    editor: &'a mut E,
    saved_text: AttributedText,
    saved_selection: Range<usize>,
    was_hidden: bool,
    notifications_were_enabled: bool,
}

impl<'a, E: TextEditor + ?Sized> ProbeGuard<'a, E> {
    /// Parks the editor's visible state.
    pub fn new(editor: &'a mut E) -> Self {
        let saved_text = editor.attributed_text().clone();
        let saved_selection = editor.selected_range();
        let was_hidden = editor.is_hidden();
        let notifications_were_enabled = editor.change_notifications_enabled();
        editor.set_change_notifications(false);
        editor.set_hidden(true);
        Self {
            editor,
            saved_text,
            saved_selection,
            was_hidden,
            notifications_were_enabled,
        }
    }

    /// Loads the probe for `line_count` lines and measures it at `width`.
    pub fn measure_lines(&mut self, line_count: usize, width: f64) -> f64 {
        self.editor.set_text(&probe_text(line_count));
        let height = self.editor.measure(width).height;
        log::trace!("probe: {line_count} line(s) at width {width} measure {height}");
        height
    }
}

impl<E: TextEditor + ?Sized> Drop for ProbeGuard<'_, E> {
    fn drop(&mut self) {
        self.editor.set_attributed_text(mem::take(&mut self.saved_text));
        self.editor.set_selected_range(mem::replace(&mut self.saved_selection, 0..0));
        self.editor.set_hidden(self.was_hidden);
        self.editor.set_change_notifications(self.notifications_were_enabled);
    }
}

/// A [`HeightSimulator`] that probes an editor at a fixed width.
#[derive(Debug)]
pub struct EditorProbe<'a, E: TextEditor + ?Sized> {
    editor: &'a mut E,
    width: f64,
}

impl<'a, E: TextEditor + ?Sized> EditorProbe<'a, E> {
    /// Creates a probe measuring `editor` at `width`.
    pub fn new(editor: &'a mut E, width: f64) -> Self {
        Self { editor, width }
    }
}

impl<E: TextEditor + ?Sized> HeightSimulator for EditorProbe<'_, E> {
    fn simulate_height(&mut self, line_count: usize) -> f64 {
        ProbeGuard::new(&mut *self.editor).measure_lines(line_count, self.width)
    }
}

/// Height of `line_count` lines in `editor` at `width`, leaving the editor as it was.
pub fn simulate_height<E: TextEditor + ?Sized>(
    editor: &mut E,
    line_count: usize,
    width: f64,
) -> f64 {
    EditorProbe::new(editor, width).simulate_height(line_count)
}
