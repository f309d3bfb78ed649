//! Last-write-wins debouncing driven by timer tickets.
//!
//! A [`Debouncer`] never owns a timer. `push` hands back a [`Ticket`]; the caller
//! arranges for that ticket to come back after [`Debouncer::interval`] (in the app,
//! an FLTK timeout that sends a `Message`). Only the most recently issued ticket
//! settles anything, so timers for superseded values fire as no-ops.

use std::time::Duration;

/// Identity of one scheduled settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

pub struct Debouncer<T> {
    interval: Duration,
    latest: u64,
    pending: Option<T>,
    settled: T,
}

impl<T> Debouncer<T> {
    pub fn new(initial: T, interval: Duration) -> Self {
        Self {
            interval,
            latest: 0,
            pending: None,
            settled: initial,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a new input value. Every earlier ticket is superseded and the
    /// previous pending value is dropped.
    pub fn push(&mut self, value: T) -> Ticket {
        self.latest += 1;
        self.pending = Some(value);
        Ticket(self.latest)
    }

    /// Settle the pending value if `ticket` is still the latest one.
    ///
    /// Returns the value that was replaced, or `None` when the ticket is stale
    /// or has already fired.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 != self.latest {
            return None;
        }
        let value = self.pending.take()?;
        Some(std::mem::replace(&mut self.settled, value))
    }

    /// Drop the pending value. Outstanding tickets become stale.
    pub fn cancel(&mut self) {
        self.latest += 1;
        self.pending = None;
    }

    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer<String> {
        Debouncer::new(String::from("initial"), Duration::from_millis(500))
    }

    #[test]
    fn test_burst_settles_once_with_last_value() {
        let mut d = debouncer();
        let tickets: Vec<Ticket> = ["h", "he", "hel", "hell", "hello"]
            .iter()
            .map(|s| d.push(s.to_string()))
            .collect();

        let mut settled = Vec::new();
        for ticket in tickets {
            if d.fire(ticket).is_some() {
                settled.push(d.settled().clone());
            }
        }
        assert_eq!(settled, vec!["hello".to_string()]);
    }

    #[test]
    fn test_stale_ticket_fired_late_is_noop() {
        let mut d = debouncer();
        let old = d.push("a".to_string());
        let new = d.push("b".to_string());

        assert_eq!(d.fire(old), None);
        assert_eq!(d.settled(), "initial");
        assert!(d.is_pending());

        assert_eq!(d.fire(new), Some("initial".to_string()));
        assert_eq!(d.settled(), "b");
        assert!(!d.is_pending());
    }

    #[test]
    fn test_fire_twice_is_noop() {
        let mut d = debouncer();
        let t = d.push("x".to_string());
        assert!(d.fire(t).is_some());
        assert!(d.fire(t).is_none());
        assert_eq!(d.settled(), "x");
    }

    #[test]
    fn test_cancel_makes_outstanding_ticket_stale() {
        let mut d = debouncer();
        let t = d.push("x".to_string());
        d.cancel();
        assert!(!d.is_pending());
        assert!(d.fire(t).is_none());
        assert_eq!(d.settled(), "initial");
    }

    #[test]
    fn test_independent_debouncers_settle_independently() {
        let mut html = debouncer();
        let mut css = debouncer();
        let th = html.push("<p>".to_string());
        let tc = css.push("p{}".to_string());

        assert!(css.fire(tc).is_some());
        assert_eq!(css.settled(), "p{}");
        assert_eq!(html.settled(), "initial");

        // A ticket from one debouncer means nothing to the other
        let th2 = html.push("<p>hi".to_string());
        assert!(html.fire(th).is_none());
        assert!(html.fire(th2).is_some());
        assert_eq!(html.settled(), "<p>hi");
    }

    #[test]
    fn test_unit_debouncer_coalesces() {
        let mut stage = Debouncer::new((), Duration::from_millis(250));
        let a = stage.push(());
        let b = stage.push(());
        let c = stage.push(());
        let fired = [a, b, c].iter().filter(|t| stage.fire(**t).is_some()).count();
        assert_eq!(fired, 1);
    }
}
