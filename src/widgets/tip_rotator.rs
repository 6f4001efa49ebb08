//! Rotating tip state (rendering-agnostic)
//!
//! Cycles through a fixed, non-empty list of tips forever. Each cycle is a
//! two-phase machine: `Showing` until the tick, `Fading` for the fade delay,
//! then `Showing` the next tip. The tick keeps a fixed period measured from
//! mount, so the fade always completes before the next tick as long as
//! `interval > fade`, which `RotationTiming::new` enforces.
//!
//! Timer delivery lives in `core::scheduler`; this module only owns the
//! state and the step schedule.

use crate::data::TipItem;
use anyhow::{bail, Result};
use std::time::Duration;

pub const DEFAULT_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_FADE_MS: u64 = 600;

/// Tick period and fade length for a rotator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationTiming {
    interval: Duration,
    fade: Duration,
}

impl RotationTiming {
    pub fn new(interval_ms: u64, fade_ms: u64) -> Result<Self> {
        if interval_ms == 0 {
            bail!("Tip interval must be greater than zero");
        }
        if interval_ms <= fade_ms {
            bail!(
                "Tip interval ({} ms) must be longer than the fade ({} ms)",
                interval_ms,
                fade_ms
            );
        }

        Ok(Self {
            interval: Duration::from_millis(interval_ms),
            fade: Duration::from_millis(fade_ms),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fade(&self) -> Duration {
        self.fade
    }

    /// Every step this timing produces, as offsets from mount
    pub fn schedule(&self) -> RotationSchedule {
        RotationSchedule {
            timing: *self,
            cycle: 1,
            next_step: RotationStep::BeginFade,
        }
    }
}

impl Default for RotationTiming {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            fade: Duration::from_millis(DEFAULT_FADE_MS),
        }
    }
}

/// A timer-driven transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStep {
    /// Tick fired: hide the current tip
    BeginFade,
    /// Fade finished: swap to the next tip and show it
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    Showing,
    Fading,
}

/// Infinite step schedule. Cycle `k` (from 1) fades at `k * interval`
/// and advances `fade` later.
#[derive(Debug, Clone)]
pub struct RotationSchedule {
    timing: RotationTiming,
    cycle: u32,
    next_step: RotationStep,
}

impl Iterator for RotationSchedule {
    type Item = (Duration, RotationStep);

    fn next(&mut self) -> Option<Self::Item> {
        let tick = self.timing.interval.checked_mul(self.cycle)?;
        match self.next_step {
            RotationStep::BeginFade => {
                self.next_step = RotationStep::Advance;
                Some((tick, RotationStep::BeginFade))
            }
            RotationStep::Advance => {
                let at = tick.checked_add(self.timing.fade)?;
                self.cycle = self.cycle.checked_add(1)?;
                self.next_step = RotationStep::BeginFade;
                Some((at, RotationStep::Advance))
            }
        }
    }
}

/// What the presentation layer reads each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    pub current_index: usize,
    pub visible: bool,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            current_index: 0,
            visible: true,
        }
    }
}

/// Tip rotator state machine
///
/// Holds the tip list and the current `RotationState`. Only `apply()`
/// mutates the state, and only the scheduled steps call it.
#[derive(Debug, Clone)]
pub struct TipRotator {
    items: Vec<TipItem>,
    timing: RotationTiming,
    state: RotationState,
    cycles: u64,
}

impl TipRotator {
    pub fn new(items: Vec<TipItem>, timing: RotationTiming) -> Result<Self> {
        if items.is_empty() {
            bail!("Tip rotator needs at least one tip");
        }

        Ok(Self {
            items,
            timing,
            state: RotationState::default(),
            cycles: 0,
        })
    }

    pub fn timing(&self) -> RotationTiming {
        self.timing
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn phase(&self) -> RotationPhase {
        if self.state.visible {
            RotationPhase::Showing
        } else {
            RotationPhase::Fading
        }
    }

    pub fn current(&self) -> &TipItem {
        &self.items[self.state.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of completed advances since mount
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.state.current_index
    }

    /// One flag per tip, true only for the tip on display
    pub fn active_markers(&self) -> Vec<bool> {
        (0..self.items.len()).map(|i| self.is_active(i)).collect()
    }

    /// Apply a scheduled step. Returns true if the state changed.
    ///
    /// Steps that don't fit the current phase are dropped.
    pub fn apply(&mut self, step: RotationStep) -> bool {
        match (self.phase(), step) {
            (RotationPhase::Showing, RotationStep::BeginFade) => {
                self.state.visible = false;
                true
            }
            (RotationPhase::Fading, RotationStep::Advance) => {
                self.state.current_index = (self.state.current_index + 1) % self.items.len();
                self.state.visible = true;
                self.cycles += 1;
                true
            }
            (phase, step) => {
                tracing::debug!(?phase, ?step, "Ignoring out-of-phase rotation step");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tips(n: usize) -> Vec<TipItem> {
        (0..n)
            .map(|i| TipItem::new(&format!("Category {}", i), &format!("tip {}", i)))
            .collect()
    }

    fn scenario_tips() -> Vec<TipItem> {
        vec![
            TipItem::new("Transportation", "tip A"),
            TipItem::new("Accommodation", "tip B"),
            TipItem::new("Activities", "tip C"),
            TipItem::new("Food", "tip D"),
        ]
    }

    fn run_cycle(rotator: &mut TipRotator) {
        assert!(rotator.apply(RotationStep::BeginFade));
        assert!(rotator.apply(RotationStep::Advance));
    }

    /// Replay every scheduled step due at or before `at_ms`
    fn state_at(items: Vec<TipItem>, timing: RotationTiming, at_ms: u64) -> TipRotator {
        let mut rotator = TipRotator::new(items, timing).unwrap();
        let at = Duration::from_millis(at_ms);
        for (offset, step) in timing.schedule() {
            if offset > at {
                break;
            }
            rotator.apply(step);
        }
        rotator
    }

    #[test]
    fn test_starts_on_first_tip_visible() {
        let rotator = TipRotator::new(tips(3), RotationTiming::default()).unwrap();
        assert_eq!(rotator.current_index(), 0);
        assert!(rotator.is_visible());
        assert_eq!(rotator.phase(), RotationPhase::Showing);
        assert_eq!(rotator.current().category, "Category 0");
        assert_eq!(rotator.len(), 3);
    }

    #[test]
    fn test_empty_tip_list_rejected() {
        assert!(TipRotator::new(Vec::new(), RotationTiming::default()).is_err());
    }

    #[test]
    fn test_timing_requires_interval_longer_than_fade() {
        assert!(RotationTiming::new(600, 600).is_err());
        assert!(RotationTiming::new(500, 600).is_err());
        assert!(RotationTiming::new(0, 0).is_err());
        assert!(RotationTiming::new(601, 600).is_ok());
        assert!(RotationTiming::new(1000, 0).is_ok());

        let timing = RotationTiming::new(10_000, 600).unwrap();
        assert_eq!(timing, RotationTiming::default());
    }

    #[test]
    fn test_fade_hides_without_moving_index() {
        let mut rotator = TipRotator::new(tips(4), RotationTiming::default()).unwrap();

        assert!(rotator.apply(RotationStep::BeginFade));
        assert!(!rotator.is_visible());
        assert_eq!(rotator.current_index(), 0);
        assert_eq!(rotator.phase(), RotationPhase::Fading);

        assert!(rotator.apply(RotationStep::Advance));
        assert!(rotator.is_visible());
        assert_eq!(rotator.current_index(), 1);
        assert_eq!(rotator.cycles(), 1);
    }

    #[test]
    fn test_index_after_k_cycles_is_k_mod_n() {
        for n in 1..=5 {
            let mut rotator = TipRotator::new(tips(n), RotationTiming::default()).unwrap();
            for k in 0..=12 {
                assert_eq!(rotator.current_index(), k % n, "n={} k={}", n, k);
                assert!(rotator.is_visible());
                run_cycle(&mut rotator);
            }
        }
    }

    #[test]
    fn test_n_cycles_close_the_loop() {
        let mut rotator = TipRotator::new(tips(4), RotationTiming::default()).unwrap();
        run_cycle(&mut rotator);
        let before = rotator.state();

        for _ in 0..4 {
            run_cycle(&mut rotator);
        }
        assert_eq!(rotator.state(), before);
    }

    #[test]
    fn test_single_tip_loops_onto_itself() {
        let mut rotator = TipRotator::new(tips(1), RotationTiming::default()).unwrap();
        run_cycle(&mut rotator);
        assert_eq!(rotator.current_index(), 0);
        assert!(rotator.is_visible());
    }

    #[test]
    fn test_exactly_one_active_marker() {
        let mut rotator = TipRotator::new(tips(5), RotationTiming::default()).unwrap();
        for _ in 0..7 {
            let markers = rotator.active_markers();
            assert_eq!(markers.len(), 5);
            assert_eq!(markers.iter().filter(|m| **m).count(), 1);
            assert!(markers[rotator.current_index()]);

            // Marker stays on the same tip while it fades out
            rotator.apply(RotationStep::BeginFade);
            assert!(rotator.active_markers()[rotator.current_index()]);
            rotator.apply(RotationStep::Advance);
        }
    }

    #[test]
    fn test_out_of_phase_steps_ignored() {
        let mut rotator = TipRotator::new(tips(3), RotationTiming::default()).unwrap();

        assert!(!rotator.apply(RotationStep::Advance));
        assert_eq!(rotator.state(), RotationState::default());

        rotator.apply(RotationStep::BeginFade);
        assert!(!rotator.apply(RotationStep::BeginFade));
        assert_eq!(rotator.current_index(), 0);
        assert!(!rotator.is_visible());
    }

    #[test]
    fn test_schedule_offsets() {
        let timing = RotationTiming::default();
        let steps: Vec<(u128, RotationStep)> = timing
            .schedule()
            .take(6)
            .map(|(offset, step)| (offset.as_millis(), step))
            .collect();

        assert_eq!(
            steps,
            vec![
                (10_000, RotationStep::BeginFade),
                (10_600, RotationStep::Advance),
                (20_000, RotationStep::BeginFade),
                (20_600, RotationStep::Advance),
                (30_000, RotationStep::BeginFade),
                (30_600, RotationStep::Advance),
            ]
        );
    }

    #[test]
    fn test_schedule_alternates_fade_then_advance() {
        let timing = RotationTiming::new(250, 249).unwrap();
        let mut last = Duration::ZERO;
        for (i, (offset, step)) in timing.schedule().take(40).enumerate() {
            assert!(offset > last);
            last = offset;
            let expected = if i % 2 == 0 {
                RotationStep::BeginFade
            } else {
                RotationStep::Advance
            };
            assert_eq!(step, expected);
        }
    }

    #[test]
    fn test_four_tip_timeline() {
        let timing = RotationTiming::new(10_000, 600).unwrap();

        let at_0 = state_at(scenario_tips(), timing, 0);
        assert_eq!(at_0.current_index(), 0);
        assert!(at_0.is_visible());
        assert_eq!(at_0.current().category, "Transportation");
        assert_eq!(at_0.current().text, "tip A");

        let at_tick = state_at(scenario_tips(), timing, 10_000);
        assert_eq!(at_tick.current_index(), 0);
        assert!(!at_tick.is_visible());

        let just_before_swap = state_at(scenario_tips(), timing, 10_599);
        assert_eq!(just_before_swap.current_index(), 0);
        assert!(!just_before_swap.is_visible());

        let at_swap = state_at(scenario_tips(), timing, 10_600);
        assert_eq!(at_swap.current_index(), 1);
        assert!(at_swap.is_visible());
        assert_eq!(at_swap.current().category, "Accommodation");
        assert_eq!(at_swap.current().text, "tip B");

        let later = state_at(scenario_tips(), timing, 42_400);
        assert_eq!(later.current_index(), 0);
        assert!(later.is_visible());
        assert_eq!(later.cycles(), 4);
    }
}
