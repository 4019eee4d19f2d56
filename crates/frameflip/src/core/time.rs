//! Time sources feeding [`PausableClock`](super::clock::PausableClock).
//!
//! A clock never reads the system time directly. It asks its source for "now",
//! which lets a tick source swap wall-clock time for caller-driven time (time
//! scaling, replays, tests) without touching playback code.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time since an origin fixed by the source.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Caller-driven source.
///
/// Clones share one counter: keep a handle in the tick source and give a clone
/// to the clock, then `advance` once per frame.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `dt`.
    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }

    /// Jump to an absolute time. Moving backwards is ignored to keep the
    /// source monotonic.
    pub fn set(&self, t: Duration) {
        if t > self.now.get() {
            self.now.set(t);
        }
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Serde adapter storing a [`Duration`] as whole milliseconds.
///
/// Durations with a sub-millisecond part are refused on write rather than
/// truncated.
pub(crate) mod serde_millis {
    use std::time::Duration;

    use serde::ser::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if value.subsec_nanos() % 1_000_000 != 0 {
            return Err(S::Error::custom(format!(
                "{value:?} is not a whole number of milliseconds"
            )));
        }
        let millis = u64::try_from(value.as_millis())
            .map_err(|_| S::Error::custom(format!("{value:?} overflows u64 milliseconds")))?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
