use std::time::{Duration, Instant};

/// Periodic tick driver polled by a single-threaded host loop.
///
/// While running it holds the deadline of the next tick. Stopping drops the
/// deadline, so a stopped scheduler can never report a due tick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickScheduler {
    running: Option<Running>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Running {
    interval: Duration,
    next_due: Instant,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts ticking every `interval`, first tick one interval after `now`.
    ///
    /// Starting an already running scheduler re-anchors it.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.running = Some(Running {
            interval,
            next_due: now + interval,
        });
    }

    /// Cancels any pending tick. No-op when already stopped.
    pub fn stop(&mut self) {
        self.running = None;
    }

    pub fn restart(&mut self, interval: Duration, now: Instant) {
        self.stop();
        self.start(interval, now);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.running.map(|running| running.interval)
    }

    /// Returns how long the host may sleep before the next tick is due.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.running
            .map(|running| running.next_due.saturating_duration_since(now))
    }

    /// Returns true at most once per elapsed interval.
    ///
    /// A host that fell behind gets one tick and the schedule restarts from
    /// `now`; missed ticks are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(running) = self.running.as_mut() else {
            return false;
        };

        if now < running.next_due {
            return false;
        }

        running.next_due = now + running.interval;
        true
    }
}
