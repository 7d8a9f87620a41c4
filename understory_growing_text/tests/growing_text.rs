// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_growing_text` crate.
//!
//! These exercise `GrowingTextView` end to end over the `MonospaceEditor`,
//! with a focus on how height simulation, clamping and pinning to the bottom
//! interact as content changes.

use kurbo::{Insets, Rect};
use understory_growing_text::{
    AttributedText, EventRecorder, Font, GrowingTextConfig, GrowingTextView, HeightPolicy,
    MonospaceEditor, TextAttributes, TextEditor, TextViewEvent, simulate_height,
};

const WIDTH: f64 = 300.0;

fn frame() -> Rect {
    Rect::new(0.0, 0.0, WIDTH, 0.0)
}

fn view() -> GrowingTextView<MonospaceEditor, EventRecorder> {
    GrowingTextView::new(MonospaceEditor::new(), frame()).with_listener(EventRecorder::new())
}

fn lines(n: usize) -> String {
    (1..=n).map(|i| i.to_string()).collect::<Vec<_>>().join("\n")
}

fn simulated(line_count: usize) -> f64 {
    simulate_height(&mut MonospaceEditor::new(), line_count, WIDTH)
}

#[test]
fn simulated_heights_are_strictly_increasing() {
    let mut editor = MonospaceEditor::new();
    let heights: Vec<f64> = (1..=12)
        .map(|n| simulate_height(&mut editor, n, WIDTH))
        .collect();
    assert!(heights.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn empty_two_and_ten_lines_at_width_300() {
    let mut view = view();

    // Empty: one line.
    assert_eq!(view.current_height(), simulated(1));

    // Two lines: natural height, no scrolling.
    view.set_text("a\nb");
    let natural = view.editor().measure(WIDTH).height;
    assert_eq!(view.current_height(), natural);
    assert_eq!(view.current_height(), simulated(2));
    assert_eq!(view.content_size().height, view.current_height());

    // Ten lines: capped at three, content scrolls.
    view.set_text(&lines(10));
    assert_eq!(view.current_height(), simulated(3));
    assert!(view.content_size().height > view.current_height());
}

#[test]
fn presented_height_stays_within_bounds() {
    let mut view = view();
    for n in 0..15 {
        view.set_text(&lines(n));
        let height = view.current_height();
        assert!(height >= view.min_height(), "{n} lines under the minimum");
        assert!(height <= view.max_height(), "{n} lines over the maximum");
    }
}

#[test]
fn setting_the_same_text_twice_is_stable() {
    let mut view = view();
    view.set_text(&lines(2));
    let height = view.current_height();
    let events = view.listener().events().len();

    view.set_text(&lines(2));
    assert_eq!(view.current_height(), height);
    let new_events = &view.listener().events()[events..];
    assert_eq!(new_events, [TextViewEvent::DidChangeHeight(height)]);
}

#[test]
fn text_round_trips_and_height_matches_the_policy() {
    let mut view = view();
    for text in ["", "one", "one\ntwo", "a\nb\nc\nd\ne", "a much longer line that wraps twice"] {
        view.set_text(text);
        assert_eq!(view.text(), text);

        let measured = view.editor().measure(WIDTH).height;
        let expected = view.policy().clamp(measured, !text.is_empty());
        assert_eq!(view.current_height(), expected, "height for {text:?}");
    }
}

#[test]
fn pinned_views_follow_appended_content() {
    let mut view = view();
    view.set_text(&lines(10));
    let tail = view.content_size().height - view.current_height();
    assert_eq!(view.content_offset().y, tail);

    let before = view.content_size().height;
    let end = view.text().len();
    assert!(view.handle_edit(end..end, "\n"));
    assert!(view.content_size().height > before);
    assert_eq!(
        view.content_offset().y,
        view.content_size().height - view.current_height()
    );
}

#[test]
fn one_line_maximum_uses_the_one_line_height() {
    let mut view = view();
    view.set_max_number_of_lines(1);
    assert_eq!(view.max_height(), simulated(1));

    view.set_text(&lines(4));
    assert_eq!(view.current_height(), simulated(1));

    // Zero is treated like one, not as unbounded.
    view.set_max_number_of_lines(0);
    assert_eq!(view.max_height(), simulated(1));
}

#[test]
fn one_line_bounds_keep_the_configured_line_counts() {
    let mut view = view();
    view.set_max_number_of_lines(5);
    view.set_max_number_of_lines(1);
    assert_eq!(view.max_height(), simulated(1));
    assert_eq!(view.max_number_of_lines(), 5);

    // Re-deriving the bounds uses the remembered count, not the one-line cap.
    view.set_font(Font::default());
    assert_eq!(view.max_height(), simulated(5));

    view.set_min_number_of_lines(4);
    view.set_min_number_of_lines(0);
    assert_eq!(view.min_height(), simulated(1));
    assert_eq!(view.min_number_of_lines(), 4);
}

#[test]
fn minimum_taller_than_the_content_is_not_pinned() {
    let config = GrowingTextConfig {
        min_lines: 3,
        ..GrowingTextConfig::default()
    };
    let mut view = GrowingTextView::with_config(MonospaceEditor::new(), frame(), config);
    assert!(view.content_size().height < view.current_height());
    assert_eq!(view.content_offset().y, 0.0);

    view.set_text(&lines(10));
    assert!(view.content_size().height > view.current_height());
    assert_eq!(view.content_offset().y, 0.0);
}

#[test]
fn attributed_text_relayouts_with_its_row_heights() {
    let mut view = view();
    view.listener_mut().clear();

    let text = AttributedText::new("a\nb").with_span(
        0..1,
        TextAttributes {
            font: Some(Font::system(24.0)),
            ..TextAttributes::default()
        },
    );
    view.set_attributed_text(text);

    let height = view.current_height();
    assert_eq!(view.text(), "a\nb");
    assert_eq!(height, view.editor().measure(WIDTH).height);
    assert!(height > simulated(2), "the larger font raises its row");
    assert!(height < view.max_height());
    assert_eq!(
        view.listener().events(),
        [
            TextViewEvent::WillChangeHeight(height),
            TextViewEvent::DidChangeHeight(height),
        ]
    );
}

#[test]
fn simulation_never_notifies_the_editor_or_listener() {
    let mut view = view();
    view.set_text("draft");
    view.set_selected_range(1..3);
    let revision = view.editor().change_revision();
    view.listener_mut().clear();

    view.set_max_number_of_lines(6);
    view.set_min_number_of_lines(2);

    assert_eq!(view.editor().change_revision(), revision);
    assert_eq!(view.text(), "draft");
    assert_eq!(view.selected_range(), 1..3);
    assert!(
        !view
            .listener()
            .events()
            .iter()
            .any(|event| matches!(event, TextViewEvent::DidChange))
    );
}

#[test]
fn font_and_inset_changes_re_derive_bounds() {
    let mut view = view();
    let small_max = view.max_height();

    view.set_font(Font::system(24.0));
    assert!(view.max_height() > small_max);
    assert_eq!(view.current_height(), view.min_height());

    let before = view.min_height();
    view.set_text_container_inset(Insets::new(0.0, 20.0, 0.0, 20.0));
    assert!((view.min_height() - (before + 24.0)).abs() < 1e-9);
}

#[test]
fn fixed_heights_override_line_counts() {
    let mut view = view();
    view.set_min_height(50.0);
    view.set_max_height(90.0);
    view.set_text(&lines(20));
    assert_eq!(view.current_height(), 90.0);

    view.set_text("");
    assert_eq!(view.current_height(), 50.0);

    // Setting a line count again replaces the fixed height.
    view.set_max_number_of_lines(3);
    assert_eq!(view.max_height(), simulated(3));
}

#[test]
fn config_controls_initial_bounds() {
    let config = GrowingTextConfig {
        min_lines: 2,
        max_lines: 5,
        ..GrowingTextConfig::default()
    };
    let view = GrowingTextView::with_config(MonospaceEditor::new(), frame(), config);
    assert_eq!(view.current_height(), simulated(2));
    assert_eq!(view.max_height(), simulated(5));
    assert_eq!(HeightPolicy::DEFAULT_MAX_LINES, 3);
}
