//! Bounce suppression for repeated card reads.
//!
//! A card held in the reader's field produces a steady stream of identical
//! frames. The filter collapses them into one event per presentation by
//! tracking the single most recently forwarded identifier and its timestamp.
//!
//! This is deliberately a single-slot filter, not a per-identifier cache:
//! alternating between two different cards is never mistakenly debounced,
//! and the state stays trivially bounded. The trade-off is that rapid
//! A-B-A flapping between two cards is not suppressed.

use std::time::{Duration, Instant};
use vport_core::CardId;

/// Single-slot debounce filter.
///
/// Timestamps are passed in by the caller rather than sampled internally,
/// which keeps the decision rule deterministic under test.
#[derive(Debug)]
pub struct DebounceFilter {
    window: Duration,
    last: Option<(CardId, Instant)>,
}

impl DebounceFilter {
    /// Create a filter with the given suppression window.
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Decide whether to forward this identifier.
    ///
    /// Forwards when the identifier differs from the last forwarded one, or
    /// when the window has elapsed since the same identifier was last
    /// forwarded. On a forward decision the slot is updated *before*
    /// returning, so a slow downstream consumer cannot cause re-entrant
    /// double-forwarding.
    pub fn accept(&mut self, card: &CardId, now: Instant) -> bool {
        let forward = match &self.last {
            Some((last_card, last_seen)) if last_card == card => {
                now.duration_since(*last_seen) >= self.window
            }
            _ => true,
        };

        if forward {
            self.last = Some((card.clone(), now));
        }
        forward
    }

    /// The configured suppression window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn card(s: &str) -> CardId {
        CardId::parse(s).unwrap()
    }

    #[test]
    fn first_read_is_forwarded() {
        let mut filter = DebounceFilter::new(Duration::from_millis(1500));
        assert!(filter.accept(&card("ABCDEF78"), Instant::now()));
    }

    #[rstest]
    #[case(0, false)] // same instant
    #[case(100, false)] // early repeat
    #[case(1499, false)] // just inside the window
    #[case(1500, true)] // exactly the window
    #[case(2000, true)] // well past the window
    fn repeat_forwarding_depends_on_elapsed_time(
        #[case] elapsed_ms: u64,
        #[case] forwarded: bool,
    ) {
        let mut filter = DebounceFilter::new(Duration::from_millis(1500));
        let t0 = Instant::now();
        let id = card("ABCDEF78");

        assert!(filter.accept(&id, t0));
        assert_eq!(
            filter.accept(&id, t0 + Duration::from_millis(elapsed_ms)),
            forwarded
        );
    }

    #[test]
    fn different_card_is_never_suppressed() {
        let mut filter = DebounceFilter::new(Duration::from_millis(1500));
        let t0 = Instant::now();

        assert!(filter.accept(&card("AAAAAAAA"), t0));
        assert!(filter.accept(&card("BBBBBBBB"), t0 + Duration::from_millis(1)));
    }

    #[test]
    fn forwarding_resets_the_window() {
        let mut filter = DebounceFilter::new(Duration::from_millis(1000));
        let t0 = Instant::now();
        let id = card("ABCDEF78");

        assert!(filter.accept(&id, t0));
        // Forwarded again after the window; the slot timestamp moves with it.
        assert!(filter.accept(&id, t0 + Duration::from_millis(1200)));
        // Measured from the second forward, not the first.
        assert!(!filter.accept(&id, t0 + Duration::from_millis(2100)));
        assert!(filter.accept(&id, t0 + Duration::from_millis(2300)));
    }

    #[test]
    fn single_slot_only_remembers_most_recent() {
        let mut filter = DebounceFilter::new(Duration::from_millis(1500));
        let t0 = Instant::now();
        let a = card("AAAAAAAA");
        let b = card("BBBBBBBB");

        assert!(filter.accept(&a, t0));
        assert!(filter.accept(&b, t0 + Duration::from_millis(10)));
        // A displaced B in the slot, so A is forwarded again immediately.
        assert!(filter.accept(&a, t0 + Duration::from_millis(20)));
    }
}
