pub mod clock;
pub mod time;

pub use clock::PausableClock;
pub use time::{ManualTime, MonotonicTime, TimeSource};
