use std::time::Duration;

use super::time::{MonotonicTime, TimeSource};

/// Elapsed-time accumulator that can be frozen and resumed.
///
/// While running, elapsed time is `accumulated + (now - reference)`. The
/// accumulated part only changes on pause/resume transitions and `reset`, so
/// reading the clock never mutates it.
#[derive(Debug, Clone)]
pub struct PausableClock<S: TimeSource = MonotonicTime> {
    source: S,
    /// Time folded in by earlier pause transitions.
    accumulated: Duration,
    running: bool,
    /// Source time at the last resume.
    reference: Duration,
}

impl PausableClock<MonotonicTime> {
    /// Wall-clock backed clock, paused at zero.
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }
}

impl Default for PausableClock<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> PausableClock<S> {
    /// Clock reading `source`, paused at zero.
    pub fn with_source(source: S) -> Self {
        let reference = source.now();
        Self {
            source,
            accumulated: Duration::ZERO,
            running: false,
            reference,
        }
    }

    /// Zero the clock and return the time it held before.
    ///
    /// When `start` is true the clock keeps running from zero, otherwise it is
    /// left paused.
    pub fn reset(&mut self, start: bool) -> Duration {
        let previous = self.elapsed();
        self.accumulated = Duration::ZERO;
        self.running = false;
        if start {
            self.resume();
        }
        previous
    }

    /// Freeze the clock. No-op when already paused.
    pub fn pause(&mut self) -> Duration {
        if self.running {
            self.accumulated += self.since_reference();
            self.running = false;
        }
        self.elapsed()
    }

    /// Unfreeze the clock. No-op when already running.
    pub fn resume(&mut self) -> Duration {
        if !self.running {
            self.reference = self.source.now();
            self.running = true;
        }
        self.elapsed()
    }

    pub fn toggle(&mut self) -> Duration {
        if self.running {
            self.pause()
        } else {
            self.resume()
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> Duration {
        if self.running {
            self.accumulated + self.since_reference()
        } else {
            self.accumulated
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn since_reference(&self) -> Duration {
        self.source.now().saturating_sub(self.reference)
    }
}
