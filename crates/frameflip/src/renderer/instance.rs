use bytemuck::{Pod, Zeroable};

use crate::components::frame::Frame;

/// Flattened frame for a GPU instance buffer: 10 floats = 40 bytes stride.
///
/// Flat-color frames carry `atlas = -1.0` and `textured = 0.0`; the renderer
/// skips texture sampling for them.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameInstance {
    /// Atlas id, or -1.0 for flat frames.
    pub atlas: f32,
    /// Source rectangle in atlas pixels.
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Normalized tint.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    /// 1.0 when the frame samples its atlas.
    pub textured: f32,
}

impl FrameInstance {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&Frame> for FrameInstance {
    fn from(frame: &Frame) -> Self {
        let area = frame.area();
        let [r, g, b, a] = frame.tint().to_f32_array();
        let (atlas, textured) = match frame.atlas() {
            Some(atlas) => (atlas.id.0 as f32, 1.0),
            None => (-1.0, 0.0),
        };
        Self {
            atlas,
            x: area.left() as f32,
            y: area.top() as f32,
            w: area.width() as f32,
            h: area.height() as f32,
            r,
            g,
            b,
            a,
            textured,
        }
    }
}

/// Instances gathered for one draw call.
pub struct InstanceBuffer {
    pub instances: Vec<FrameInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(256),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, frame: &Frame) {
        self.instances.push(FrameInstance::from(frame));
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
