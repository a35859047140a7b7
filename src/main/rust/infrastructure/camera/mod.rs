mod buffer_pool;
mod replay;
mod simulated_camera;
mod test_pattern;

pub use buffer_pool::{FrameBufferPool, SensorClock};
pub use replay::load_replay_frames;
pub use simulated_camera::{SimulatedCamera, StoredFrame};
pub use test_pattern::render_test_pattern;
