//! Frame streams: pure mappings from elapsed time to a [`Frame`].
//!
//! - [`FrameStream`] resolves an absolute elapsed time to a frame. Used by
//!   [`Animator`](crate::systems::animator::Animator).
//! - [`FrameTable`] exposes direct index lookup. Used by
//!   [`Player`](crate::components::player::Player), which keeps its own
//!   discrete frame counter.

pub mod sheet;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::components::frame::Frame;
use crate::error::AnimError;

pub use sheet::{
    AxisPrecedence, GridTraversal, HorizontalDirection, SheetConfig, SpriteSheetStream,
    VerticalDirection,
};

/// Stateless mapping from elapsed time to a frame.
///
/// Implementations may keep precomputed tables but must return the same frame
/// for the same input.
pub trait FrameStream {
    fn frame_at(&self, elapsed: Duration) -> Result<Frame, AnimError>;
}

/// Indexed access to an ordered set of frames.
pub trait FrameTable {
    fn frame_count(&self) -> usize;
    fn frame(&self, index: usize) -> Option<&Frame>;
}

/// What a non-looping stream shows once its last frame has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBehavior {
    /// Keep showing the last frame.
    #[default]
    HoldLast,
    /// Show [`Frame::blank`].
    Blank,
}

/// Map elapsed time to a frame index. `None` means "past the end, draw blank".
///
/// `frame_time` must be non-zero and `count` positive; callers validate both
/// at construction.
pub(crate) fn resolve_index(
    elapsed: Duration,
    frame_time: Duration,
    count: usize,
    looping: bool,
    end: EndBehavior,
) -> Option<usize> {
    let step = elapsed.as_nanos() / frame_time.as_nanos();
    if looping {
        return Some((step % count as u128) as usize);
    }
    if step < count as u128 {
        Some(step as usize)
    } else {
        match end {
            EndBehavior::HoldLast => Some(count - 1),
            EndBehavior::Blank => None,
        }
    }
}

/// A still frame is a stream that ignores time.
impl FrameStream for Frame {
    fn frame_at(&self, _elapsed: Duration) -> Result<Frame, AnimError> {
        Ok(self.clone())
    }
}
