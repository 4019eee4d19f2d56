//! Hand-assembled animation: an ordered list of frames.
//!
//! Use this when frames don't sit on a regular grid (mixed atlases, flat
//! color flashes, custom rectangles). Sheets cut from a grid should use
//! [`SpriteSheetStream`](crate::streams::SpriteSheetStream) instead.

use std::time::Duration;

use crate::components::frame::Frame;
use crate::error::AnimError;
use crate::streams::{resolve_index, EndBehavior, FrameStream, FrameTable};

#[derive(Debug, Clone)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    frame_time: Duration,
    looping: bool,
    end: EndBehavior,
}

impl FrameSequence {
    /// Empty looping sequence. Fails when `frame_time` is zero.
    pub fn new(frame_time: Duration) -> Result<Self, AnimError> {
        Self::from_frames(Vec::new(), frame_time, true)
    }

    pub fn from_frames(
        frames: Vec<Frame>,
        frame_time: Duration,
        looping: bool,
    ) -> Result<Self, AnimError> {
        if frame_time.is_zero() {
            return Err(AnimError::invalid("frame time can't be 0"));
        }
        Ok(Self {
            frames,
            frame_time,
            looping,
            end: EndBehavior::default(),
        })
    }

    /// Append a frame and return its index.
    pub fn push(&mut self, frame: Frame) -> usize {
        self.frames.push(frame);
        self.frames.len() - 1
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn end_behavior(&self) -> EndBehavior {
        self.end
    }

    pub fn set_end_behavior(&mut self, end: EndBehavior) {
        self.end = end;
    }
}

impl FrameStream for FrameSequence {
    fn frame_at(&self, elapsed: Duration) -> Result<Frame, AnimError> {
        if self.frames.is_empty() {
            return Err(AnimError::NotInitialized);
        }
        let index = resolve_index(
            elapsed,
            self.frame_time,
            self.frames.len(),
            self.looping,
            self.end,
        );
        Ok(index.map_or_else(Frame::blank, |i| self.frames[i].clone()))
    }
}

impl FrameTable for FrameSequence {
    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }
}
