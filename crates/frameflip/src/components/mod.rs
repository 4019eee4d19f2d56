pub mod color;
pub mod frame;
pub mod player;
pub mod rect;
pub mod sequence;
