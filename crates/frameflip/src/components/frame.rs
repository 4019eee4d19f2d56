//! Atlas handles and the renderable frame descriptor.

use std::sync::Arc;

use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::rect::IntRect;

/// Identifies which texture atlas a frame belongs to.
/// The renderer maps it to the actual texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AtlasId(pub u32);

/// Size and identity of an atlas image. Pixel data stays with the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    pub id: AtlasId,
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Shared handle to an atlas. Frames and streams keep the atlas alive.
pub type AtlasHandle = Arc<Atlas>;

impl Atlas {
    pub fn new(id: AtlasId, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id,
            name: name.into(),
            width,
            height,
        }
    }

    /// Wrap into a shareable handle.
    pub fn into_handle(self) -> AtlasHandle {
        Arc::new(self)
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// The whole atlas as a rectangle at the origin.
    pub fn bounds(&self) -> IntRect {
        IntRect::from_pos_size(IVec2::ZERO, self.size().as_ivec2())
    }
}

/// The renderable unit: a region of an atlas (or a flat rectangle) and a tint.
///
/// Without an atlas the renderer draws a rectangle of `area`'s size filled
/// with `tint`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    atlas: Option<AtlasHandle>,
    area: IntRect,
    tint: Color,
}

impl Frame {
    /// Region `area` of `atlas`, untinted.
    pub fn textured(atlas: &AtlasHandle, area: IntRect) -> Self {
        Self {
            atlas: Some(Arc::clone(atlas)),
            area,
            tint: Color::WHITE,
        }
    }

    /// The whole atlas as a single frame.
    pub fn whole(atlas: &AtlasHandle) -> Self {
        Self::textured(atlas, atlas.bounds())
    }

    /// A flat colored rectangle with no texture.
    pub fn flat(area: IntRect, tint: Color) -> Self {
        Self {
            atlas: None,
            area,
            tint,
        }
    }

    /// Renders nothing.
    pub fn blank() -> Self {
        Self::flat(IntRect::default(), Color::TRANSPARENT)
    }

    /// Same frame with another tint.
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn atlas(&self) -> Option<&AtlasHandle> {
        self.atlas.as_ref()
    }

    pub fn area(&self) -> IntRect {
        self.area
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn is_textured(&self) -> bool {
        self.atlas.is_some()
    }

    /// Normalized `[u0, v0, u1, v1]` texture coordinates of the area.
    /// `None` for flat frames and zero-sized atlases.
    pub fn uv_rect(&self) -> Option<[f32; 4]> {
        let atlas = self.atlas.as_ref()?;
        if atlas.width == 0 || atlas.height == 0 {
            return None;
        }
        let w = atlas.width as f32;
        let h = atlas.height as f32;
        Some([
            self.area.left() as f32 / w,
            self.area.top() as f32 / h,
            self.area.right() as f32 / w,
            self.area.bottom() as f32 / h,
        ])
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::flat(IntRect::default(), Color::WHITE)
    }
}
