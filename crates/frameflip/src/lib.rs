//! Sprite-sheet animation engine.
//!
//! Turns a pausable clock into a frame index and a frame index into an atlas
//! rectangle plus tint. Drawing is left to the caller: read
//! [`Player::current_frame`] or [`Animator::frame`] once per tick and blit it.

pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod renderer;
pub mod streams;
pub mod systems;

// Re-export key types at crate root for convenience
pub use error::AnimError;
pub use crate::core::clock::PausableClock;
pub use crate::core::time::{ManualTime, MonotonicTime, TimeSource};
pub use components::color::Color;
pub use components::frame::{Atlas, AtlasHandle, AtlasId, Frame};
pub use components::rect::IntRect;
pub use components::sequence::FrameSequence;
pub use components::player::{PlaybackState, Player, PlayerConfig, SharedFrames};
pub use streams::{
    AxisPrecedence, EndBehavior, FrameStream, FrameTable, GridTraversal, HorizontalDirection,
    SheetConfig, SpriteSheetStream, VerticalDirection,
};
pub use systems::animator::{tick_animators, Animator, SharedStream};
pub use renderer::instance::{FrameInstance, InstanceBuffer};
pub use assets::lookup::{build_sheet, AtlasLookup};
