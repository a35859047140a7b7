pub mod camera;
pub mod codec;
pub mod http;
pub mod led;
pub mod metrics;
