//! Animator system — drives a [`FrameStream`] with caller-supplied deltas.
//!
//! Unlike [`Player`](crate::components::player::Player), an animator has no
//! frame counter: it accumulates elapsed time and asks the stream which frame
//! that time maps to. The tick source passes `dt` explicitly, so slow motion
//! or fast-forward is a matter of scaling it (or setting [`Animator::set_speed`]).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::components::frame::Frame;
use crate::streams::FrameStream;

/// Stream shared between animators.
pub type SharedStream = Arc<dyn FrameStream>;

pub struct Animator {
    stream: Option<SharedStream>,
    elapsed: Duration,
    /// Multiplier applied to every `dt` (1.0 = normal).
    speed: f32,
    frame: Option<Frame>,
}

impl Animator {
    pub fn new(stream: SharedStream, initial_time: Duration) -> Self {
        let mut animator = Self {
            stream: Some(stream),
            ..Self::default()
        };
        animator.reset_time(initial_time);
        animator
    }

    pub fn set_stream(&mut self, stream: SharedStream) {
        self.stream = Some(stream);
        self.refresh();
    }

    /// Detach the stream. Nothing is drawn until another one is set.
    pub fn unset_stream(&mut self) {
        self.stream = None;
        self.refresh();
    }

    pub fn stream(&self) -> Option<&SharedStream> {
        self.stream.as_ref()
    }

    pub fn reset_time(&mut self, initial_time: Duration) {
        self.elapsed = initial_time;
        self.refresh();
    }

    /// Advance by `dt` scaled by the current speed.
    ///
    /// At speed 1.0 `dt` is added as-is. Elapsed time saturates at
    /// [`Duration::MAX`].
    pub fn update(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(self.scaled(dt));
        self.refresh();
    }

    /// `dt * speed`, rounded to the nearest nanosecond.
    fn scaled(&self, dt: Duration) -> Duration {
        if self.speed == 1.0 {
            return dt;
        }
        let nanos = (dt.as_nanos() as f64 * f64::from(self.speed)).round();
        if nanos >= u64::MAX as f64 {
            return Duration::from_nanos(u64::MAX);
        }
        Duration::from_nanos(nanos as u64)
    }

    /// Negative or non-finite speeds freeze the animation.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Frame for the current elapsed time. `None` without a stream.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    fn refresh(&mut self) {
        let Some(stream) = &self.stream else {
            self.frame = None;
            return;
        };
        match stream.frame_at(self.elapsed) {
            Ok(frame) => self.frame = Some(frame),
            // Keep showing whatever was there before.
            Err(err) => log::warn!("animator kept previous frame: {err}"),
        }
    }
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("has_stream", &self.stream.is_some())
            .field("elapsed", &self.elapsed)
            .field("speed", &self.speed)
            .field("frame", &self.frame)
            .finish()
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            stream: None,
            elapsed: Duration::ZERO,
            speed: 1.0,
            frame: None,
        }
    }
}

/// Advance every animator by the same `dt`.
///
/// Call this once per frame before rendering.
pub fn tick_animators<'a>(animators: impl IntoIterator<Item = &'a mut Animator>, dt: Duration) {
    for animator in animators {
        animator.update(dt);
    }
}
