// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line-bounded height policy.
//!
//! [`HeightPolicy`] turns line-count bounds into pixel heights (through a
//! [`HeightSimulator`]) and clamps measured content heights into the height the
//! container presents.
//!
//! Line counts of `1` or less are degenerate on both ends: the minimum becomes
//! one line, and so does the maximum. A maximum of one line is a fixed one-line
//! ceiling, not "unbounded", even though a `max_height` of `0` means unbounded.
//! Unbounded growth is requested with [`HeightPolicy::set_max_height`]`(0.0)`.
//!
//! A degenerate count only sets the height. The configured line count keeps
//! its previous value, and [`HeightPolicy::recompute_bounds`] derives from it.

use crate::editor::non_negative;
use crate::probe::HeightSimulator;

/// Derives and applies minimum and maximum presented heights.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightPolicy {
    min_lines: usize,
    max_lines: usize,
    min_override: Option<f64>,
    max_override: Option<f64>,
    min_height: f64,
    max_height: f64,
}

impl HeightPolicy {
    /// Minimum line count used until configured.
    pub const DEFAULT_MIN_LINES: usize = 1;

    /// Maximum line count used until configured.
    pub const DEFAULT_MAX_LINES: usize = 3;

    /// Creates a policy with default line bounds.
    ///
    /// Heights stay at `0` until [`HeightPolicy::recompute_bounds`] runs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lines(Self::DEFAULT_MIN_LINES, Self::DEFAULT_MAX_LINES)
    }

    /// Creates a policy with the given line bounds and underived heights.
    #[must_use]
    pub fn with_lines(min_lines: usize, max_lines: usize) -> Self {
        Self {
            min_lines,
            max_lines,
            min_override: None,
            max_override: None,
            min_height: 0.0,
            max_height: 0.0,
        }
    }

    /// Configured minimum line count.
    #[must_use]
    pub fn min_lines(&self) -> usize {
        self.min_lines
    }

    /// Configured maximum line count.
    #[must_use]
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Derived minimum presented height.
    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    /// Derived maximum presented height; `0` means unbounded.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Returns `true` if growth is capped.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.max_height > 0.0
    }

    /// Sets the minimum line count and derives the minimum height.
    ///
    /// Replaces any fixed minimum set with [`HeightPolicy::set_min_height`].
    /// Counts of `1` or less set a one-line minimum height and leave
    /// [`min_lines`](Self::min_lines) unchanged.
    pub fn set_min_lines(&mut self, lines: usize, simulator: &mut impl HeightSimulator) {
        self.min_override = None;
        self.min_height = Self::derive(lines, simulator);
        if lines > 1 {
            self.min_lines = lines;
        }
    }

    /// Sets the maximum line count and derives the maximum height.
    ///
    /// Replaces any fixed maximum set with [`HeightPolicy::set_max_height`].
    /// Counts of `1` or less set a one-line maximum height and leave
    /// [`max_lines`](Self::max_lines) unchanged.
    pub fn set_max_lines(&mut self, lines: usize, simulator: &mut impl HeightSimulator) {
        self.max_override = None;
        self.max_height = Self::derive(lines, simulator);
        if lines > 1 {
            self.max_lines = lines;
        }
    }

    /// Fixes the minimum height, ignoring line counts until they are set again.
    pub fn set_min_height(&mut self, height: f64) {
        let height = non_negative(height);
        self.min_override = Some(height);
        self.min_height = height;
    }

    /// Fixes the maximum height; `0` lifts the cap.
    pub fn set_max_height(&mut self, height: f64) {
        let height = non_negative(height);
        self.max_override = Some(height);
        self.max_height = height;
    }

    /// Re-derives both heights from their line counts.
    ///
    /// Fixed heights are kept as they are. Call this whenever the font or the
    /// text container insets change, then relayout.
    pub fn recompute_bounds(&mut self, simulator: &mut impl HeightSimulator) {
        self.min_height = match self.min_override {
            Some(height) => height,
            None => Self::derive(self.min_lines, simulator),
        };
        self.max_height = match self.max_override {
            Some(height) => height,
            None => Self::derive(self.max_lines, simulator),
        };
        log::debug!(
            "height bounds recomputed: min {} max {}",
            self.min_height,
            self.max_height
        );
    }

    /// Clamps a measured content height into the presented height.
    ///
    /// Without visible text the minimum is presented regardless of the
    /// measurement. The result lies in `[min_height, max_height]` when the
    /// policy is bounded and `min_height <= max_height`.
    #[must_use]
    pub fn clamp(&self, measured: f64, has_visible_text: bool) -> f64 {
        let measured = non_negative(measured);
        if measured < self.min_height || !has_visible_text {
            self.min_height
        } else if self.is_bounded() && measured > self.max_height {
            self.max_height
        } else {
            measured
        }
    }

    fn derive(lines: usize, simulator: &mut impl HeightSimulator) -> f64 {
        if lines <= 1 {
            // Degenerate counts collapse to a single line on either bound.
            simulator.simulate_height(1)
        } else {
            simulator.simulate_height(lines)
        }
    }
}

impl Default for HeightPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::HeightPolicy;

    // 20px per line plus 16px of insets.
    fn sim() -> impl FnMut(usize) -> f64 {
        |lines: usize| lines as f64 * 20.0 + 16.0
    }

    fn derived(min_lines: usize, max_lines: usize) -> HeightPolicy {
        let mut policy = HeightPolicy::with_lines(min_lines, max_lines);
        policy.recompute_bounds(&mut sim());
        policy
    }

    #[test]
    fn defaults_derive_one_to_three_lines() {
        let policy = derived(HeightPolicy::DEFAULT_MIN_LINES, HeightPolicy::DEFAULT_MAX_LINES);
        assert_eq!(policy.min_height(), 36.0);
        assert_eq!(policy.max_height(), 76.0);
        assert!(policy.is_bounded());
    }

    #[test]
    fn degenerate_line_counts_collapse_to_one_line() {
        let mut policy = derived(1, 3);
        policy.set_min_lines(0, &mut sim());
        assert_eq!(policy.min_height(), 36.0);
        policy.set_max_lines(1, &mut sim());
        assert_eq!(policy.max_height(), 36.0, "one-line maximum is not unbounded");
        assert!(policy.is_bounded());
    }

    #[test]
    fn degenerate_line_counts_keep_the_configured_count() {
        let mut policy = derived(4, 5);
        policy.set_min_lines(0, &mut sim());
        policy.set_max_lines(1, &mut sim());
        assert_eq!(policy.min_lines(), 4);
        assert_eq!(policy.max_lines(), 5);
        assert_eq!(policy.max_height(), 36.0);

        // A later recompute derives from the remembered counts again.
        policy.recompute_bounds(&mut sim());
        assert_eq!(policy.min_height(), 96.0);
        assert_eq!(policy.max_height(), 116.0);
    }

    #[test]
    fn clamp_respects_bounds_and_visibility() {
        let policy = derived(1, 3);
        assert_eq!(policy.clamp(10.0, true), 36.0);
        assert_eq!(policy.clamp(56.0, true), 56.0);
        assert_eq!(policy.clamp(500.0, true), 76.0);
        assert_eq!(policy.clamp(56.0, false), 36.0, "no text presents the minimum");
        assert_eq!(policy.clamp(f64::NAN, true), 36.0);
    }

    #[test]
    fn clamp_stays_within_bounds() {
        let policy = derived(2, 4);
        for step in 0_u32..200 {
            let measured = f64::from(step) * 1.5;
            let presented = policy.clamp(measured, true);
            assert!(presented >= policy.min_height(), "{measured} -> {presented}");
            assert!(presented <= policy.max_height(), "{measured} -> {presented}");
        }
    }

    #[test]
    fn zero_max_height_is_unbounded() {
        let mut policy = derived(1, 3);
        policy.set_max_height(0.0);
        assert!(!policy.is_bounded());
        assert_eq!(policy.clamp(10_000.0, true), 10_000.0);
    }

    #[test]
    fn fixed_heights_survive_recompute_until_lines_are_set() {
        let mut policy = derived(1, 3);
        policy.set_min_height(50.0);
        policy.set_max_height(120.0);
        policy.recompute_bounds(&mut |lines: usize| lines as f64 * 40.0);
        assert_eq!(policy.min_height(), 50.0);
        assert_eq!(policy.max_height(), 120.0);

        policy.set_max_lines(5, &mut sim());
        assert_eq!(policy.max_height(), 116.0);
        policy.recompute_bounds(&mut |lines: usize| lines as f64 * 40.0);
        assert_eq!(policy.max_height(), 200.0);
        assert_eq!(policy.min_height(), 50.0);
    }
}
