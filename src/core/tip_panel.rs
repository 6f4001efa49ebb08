//! Mounted tip rotator: the state machine plus the timer that drives it.
//!
//! Steps from the timer arrive on the UI loop's channel tagged with the
//! panel's generation. Steps from an earlier mount (or delivered after
//! `unmount()`) never reach a rotator.

use crate::core::scheduler::{spawn_rotation, RotationEvent, ScheduledTask};
use crate::data::TipItem;
use crate::widgets::{RotationTiming, TipRotator};
use anyhow::Result;
use tokio::sync::mpsc;

pub struct TipPanel {
    rotator: TipRotator,
    generation: u64,
    timer: ScheduledTask,
}

impl TipPanel {
    /// Build the rotator and start its timer. Needs a tokio runtime.
    pub fn mount(
        items: Vec<TipItem>,
        timing: RotationTiming,
        generation: u64,
        tx: mpsc::UnboundedSender<RotationEvent>,
    ) -> Result<Self> {
        let rotator = TipRotator::new(items, timing)?;
        let timer = spawn_rotation(rotator.timing(), generation, tx);
        tracing::info!(
            generation,
            tips = rotator.len(),
            "Mounted tip rotator"
        );

        Ok(Self {
            rotator,
            generation,
            timer,
        })
    }

    pub fn rotator(&self) -> &TipRotator {
        &self.rotator
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_active()
    }

    /// Apply a timer step if it belongs to this mount. Returns true if the
    /// visible state changed.
    pub fn handle_event(&mut self, event: RotationEvent) -> bool {
        if event.generation != self.generation {
            tracing::debug!(
                event_generation = event.generation,
                generation = self.generation,
                "Dropping rotation step from a previous mount"
            );
            return false;
        }
        self.rotator.apply(event.step)
    }

    /// Stop the timer. Consumes the panel so its state can't be touched again.
    pub fn unmount(mut self) {
        self.timer.cancel();
        tracing::info!(generation = self.generation, "Unmounted tip rotator");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::RotationStep;
    use std::time::Duration;
    use tokio::time::Instant;

    fn scenario_tips() -> Vec<TipItem> {
        vec![
            TipItem::new("Transportation", "tip A"),
            TipItem::new("Accommodation", "tip B"),
            TipItem::new("Activities", "tip C"),
            TipItem::new("Food", "tip D"),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_panel_follows_timeline() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let mut panel = TipPanel::mount(scenario_tips(), RotationTiming::default(), 1, tx).unwrap();

        assert_eq!(panel.rotator().current_index(), 0);
        assert!(panel.rotator().is_visible());
        assert!(panel.is_running());

        // t = 10000: fade out, same tip
        let event = rx.recv().await.unwrap();
        assert!(panel.handle_event(event));
        assert_eq!(start.elapsed(), Duration::from_millis(10_000));
        assert!(!panel.rotator().is_visible());
        assert_eq!(panel.rotator().current().category, "Transportation");

        // t = 10600: next tip fades in
        let event = rx.recv().await.unwrap();
        assert!(panel.handle_event(event));
        assert_eq!(start.elapsed(), Duration::from_millis(10_600));
        assert!(panel.rotator().is_visible());
        assert_eq!(panel.rotator().current().category, "Accommodation");
        assert_eq!(panel.rotator().current().text, "tip B");

        // Six more steps finish the loop at t = 40600
        for _ in 0..6 {
            let event = rx.recv().await.unwrap();
            panel.handle_event(event);
        }
        assert_eq!(start.elapsed(), Duration::from_millis(40_600));

        // Nothing else is due until t = 50000, so at t = 42400 we are back on tip A
        tokio::time::sleep_until(start + Duration::from_millis(42_400)).await;
        while let Ok(event) = rx.try_recv() {
            panel.handle_event(event);
        }
        assert_eq!(panel.rotator().current_index(), 0);
        assert!(panel.rotator().is_visible());
        assert_eq!(panel.rotator().cycles(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_generation_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut panel = TipPanel::mount(scenario_tips(), RotationTiming::default(), 5, tx).unwrap();

        let stale = RotationEvent {
            generation: 4,
            step: RotationStep::BeginFade,
        };
        assert!(!panel.handle_event(stale));
        assert!(panel.rotator().is_visible());
        assert_eq!(panel.generation(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_mid_fade_stops_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut panel = TipPanel::mount(scenario_tips(), RotationTiming::default(), 1, tx).unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.step, RotationStep::BeginFade);
        panel.handle_event(event);

        panel.unmount();

        // The pending Advance never arrives
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_tips_rejected_without_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(TipPanel::mount(Vec::new(), RotationTiming::default(), 1, tx).is_err());
        // tx was dropped with the failed mount
        assert_eq!(rx.recv().await, None);
    }
}
