pub mod instance;

pub use instance::{FrameInstance, InstanceBuffer};
