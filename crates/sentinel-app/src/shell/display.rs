//! Display compliance predicate and topology watcher.
//!
//! The kiosk refuses to show remote content while more than one display
//! is attached. winit exposes no topology-change event, so the shell
//! samples the monitor count on a coarse interval and reacts only when
//! the count actually changes.

use std::time::{Duration, Instant};

/// The single-display requirement gating normal operation.
/// Zero or one attached displays is compliant; two or more is not.
pub fn is_compliant(displays: usize) -> bool {
    displays <= 1
}

/// An observed change in the number of attached displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyChange {
    pub previous: usize,
    pub current: usize,
}

/// Edge-triggered monitor-count watcher.
pub struct DisplayWatcher {
    last_count: Option<usize>,
    last_check: Instant,
    interval: Duration,
}

impl DisplayWatcher {
    pub fn new(interval: Duration) -> Self {
        Self {
            last_count: None,
            last_check: Instant::now(),
            interval,
        }
    }

    /// Whether enough time has passed since the last sample.
    pub fn due(&self, now: Instant) -> bool {
        now.duration_since(self.last_check) >= self.interval
    }

    /// Seed the watcher with the count observed at startup so the first
    /// periodic sample does not report a spurious transition.
    pub fn prime(&mut self, count: usize) {
        self.last_count = Some(count);
    }

    /// Record a sample. Returns a change only when the count differs
    /// from the previous observation.
    pub fn observe(&mut self, now: Instant, count: usize) -> Option<TopologyChange> {
        self.last_check = now;
        match self.last_count.replace(count) {
            Some(previous) if previous != count => Some(TopologyChange {
                previous,
                current: count,
            }),
            _ => None,
        }
    }

    /// Forget all observations. Used when the window is destroyed so no
    /// stale transition fires against a recreated window.
    pub fn reset(&mut self) {
        self.last_count = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compliance_boundary() {
        assert!(is_compliant(0));
        assert!(is_compliant(1));
        assert!(!is_compliant(2));
        assert!(!is_compliant(3));
        assert!(!is_compliant(16));
    }

    #[test]
    fn first_observation_is_not_a_change() {
        let mut watcher = DisplayWatcher::new(Duration::from_millis(500));
        assert!(watcher.observe(Instant::now(), 1).is_none());
    }

    #[test]
    fn primed_watcher_reports_transition() {
        let mut watcher = DisplayWatcher::new(Duration::from_millis(500));
        watcher.prime(1);
        let change = watcher.observe(Instant::now(), 2).unwrap();
        assert_eq!(change.previous, 1);
        assert_eq!(change.current, 2);
    }

    #[test]
    fn stable_count_reports_nothing() {
        let mut watcher = DisplayWatcher::new(Duration::from_millis(500));
        watcher.prime(1);
        let now = Instant::now();
        assert!(watcher.observe(now, 1).is_none());
        assert!(watcher.observe(now, 1).is_none());
    }

    #[test]
    fn transitions_fire_in_both_directions() {
        let mut watcher = DisplayWatcher::new(Duration::from_millis(500));
        watcher.prime(1);
        let now = Instant::now();

        let up = watcher.observe(now, 2).unwrap();
        assert_eq!((up.previous, up.current), (1, 2));

        let down = watcher.observe(now, 1).unwrap();
        assert_eq!((down.previous, down.current), (2, 1));
    }

    #[test]
    fn reset_forgets_observations() {
        let mut watcher = DisplayWatcher::new(Duration::from_millis(500));
        watcher.prime(2);
        watcher.reset();
        // After a reset the next sample is a fresh baseline, not a change
        assert!(watcher.observe(Instant::now(), 1).is_none());
    }

    #[test]
    fn due_respects_interval() {
        let interval = Duration::from_millis(500);
        let mut watcher = DisplayWatcher::new(interval);
        let start = Instant::now();
        watcher.observe(start, 1);

        assert!(!watcher.due(start + Duration::from_millis(100)));
        assert!(watcher.due(start + interval));
        assert!(watcher.due(start + Duration::from_secs(5)));
    }
}
