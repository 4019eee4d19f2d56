//! Playback controller for frame tables.
//!
//! A [`Player`] keeps a discrete frame counter and a [`PausableClock`]. Each
//! [`update`](Player::update) checks whether the current frame has been shown
//! for `frame_time`; if so it restarts the clock and moves one frame forward.
//! Call `update` once per rendered frame, before drawing.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::components::frame::Frame;
use crate::core::clock::PausableClock;
use crate::core::time::{serde_millis, MonotonicTime, TimeSource};
use crate::streams::FrameTable;

/// Frame data shared between players. Players never own it exclusively.
pub type SharedFrames = Arc<dyn FrameTable>;

/// Elapsed time still considered "at the very start" by [`Player::is_stopped`].
const STOP_EPSILON: Duration = Duration::from_millis(10);

/// Coarse playback state, derived from the player's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Paused on frame 0 with no elapsed time.
    Stopped,
    Playing,
    /// Paused anywhere else.
    Paused,
}

fn default_looping() -> bool {
    true
}

/// Construction-time settings for a [`Player`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Time each frame stays on screen. Zero advances one frame per update.
    #[serde(rename = "frame_time_ms", with = "serde_millis", default)]
    pub frame_time: Duration,
    /// Start in the playing state.
    #[serde(default)]
    pub autoplay: bool,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            frame_time: Duration::ZERO,
            autoplay: false,
            looping: true,
        }
    }
}

/// Play/pause/stop/loop driver over a [`FrameTable`].
pub struct Player<S: TimeSource = MonotonicTime> {
    frame_time: Duration,
    clock: PausableClock<S>,
    paused: bool,
    looping: bool,
    frames: Option<SharedFrames>,
    current_index: usize,
    /// Cached frame for the renderer. `None` while unbound.
    current: Option<Frame>,
}

impl Player<MonotonicTime> {
    /// Wall-clock driven player with no frames bound.
    pub fn new(frame_time: Duration, play: bool, looping: bool) -> Self {
        Self::with_source(MonotonicTime::new(), frame_time, play, looping)
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(config.frame_time, config.autoplay, config.looping)
    }
}

impl Default for Player<MonotonicTime> {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

impl<S: TimeSource> Player<S> {
    /// Player reading time from `source`.
    pub fn with_source(source: S, frame_time: Duration, play: bool, looping: bool) -> Self {
        let mut clock = PausableClock::with_source(source);
        if play {
            clock.resume();
        }
        Self {
            frame_time,
            clock,
            paused: !play,
            looping,
            frames: None,
            current_index: 0,
            current: None,
        }
    }

    /// Bind `frames` at construction, keeping the initial play state.
    pub fn with_frames(mut self, frames: SharedFrames) -> Self {
        self.frames = Some(frames);
        self.current_index = 0;
        self.refresh_current();
        self
    }

    /// Replace the bound frames. Always rewinds; plays afterwards if `play`.
    pub fn set_frames(&mut self, frames: SharedFrames, play: bool) {
        log::debug!("player bound to {} frames", frames.frame_count());
        self.frames = Some(frames);
        self.stop();
        if play {
            self.play();
        }
    }

    /// Drop the bound frames. Updates become no-ops and nothing is drawn.
    pub fn unset_frames(&mut self) {
        self.frames = None;
        self.stop();
    }

    pub fn frames(&self) -> Option<&SharedFrames> {
        self.frames.as_ref()
    }

    /// Number of bound frames, zero when unbound.
    pub fn frame_count(&self) -> usize {
        self.frames.as_ref().map_or(0, |f| f.frame_count())
    }

    /// Jump to frame `n`. Ignored when unbound or `n` is out of range.
    pub fn set_frame(&mut self, n: usize) {
        if n < self.frame_count() {
            self.current_index = n;
            self.refresh_current();
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The frame the renderer should draw this tick.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    pub fn set_frame_time(&mut self, frame_time: Duration) {
        self.frame_time = frame_time;
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn is_loop(&self) -> bool {
        self.looping
    }

    /// Start or resume playback. After a stop this plays from frame 0.
    pub fn play(&mut self) {
        self.paused = false;
        self.clock.resume();
    }

    /// Freeze on the current frame.
    pub fn pause(&mut self) {
        self.paused = true;
        self.clock.pause();
    }

    /// Rewind to frame 0 and pause.
    pub fn stop(&mut self) {
        self.current_index = 0;
        self.refresh_current();
        self.paused = true;
        self.clock.reset(false);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Paused, on frame 0, and (almost) no time elapsed.
    pub fn is_stopped(&self) -> bool {
        self.paused && self.current_index == 0 && self.clock.elapsed() <= STOP_EPSILON
    }

    pub fn state(&self) -> PlaybackState {
        if !self.paused {
            PlaybackState::Playing
        } else if self.is_stopped() {
            PlaybackState::Stopped
        } else {
            PlaybackState::Paused
        }
    }

    /// Time the current frame has been displayed.
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Advance at most one frame. Returns true if the frame index changed.
    ///
    /// A non-looping animation that runs past its last frame stops, which
    /// rewinds it to frame 0.
    pub fn update(&mut self) -> bool {
        if self.paused {
            return false;
        }
        let count = match &self.frames {
            Some(frames) => frames.frame_count(),
            None => return false,
        };
        if self.clock.elapsed() < self.frame_time {
            return false;
        }

        self.clock.reset(true);
        let previous = self.current_index;
        if self.current_index + 1 < count {
            self.current_index += 1;
        } else if self.looping {
            self.current_index = 0;
        } else {
            log::debug!("animation finished after {count} frames");
            self.stop();
        }
        self.refresh_current();
        self.current_index != previous
    }

    fn refresh_current(&mut self) {
        self.current = self
            .frames
            .as_ref()
            .and_then(|frames| frames.frame(self.current_index).cloned());
    }
}

impl<S: TimeSource> fmt::Debug for Player<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("frame_time", &self.frame_time)
            .field("paused", &self.paused)
            .field("looping", &self.looping)
            .field("frame_count", &self.frame_count())
            .field("current_index", &self.current_index)
            .field("elapsed", &self.clock.elapsed())
            .finish_non_exhaustive()
    }
}
