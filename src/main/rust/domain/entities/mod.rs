mod encoded_payload;
mod frame;
mod led_state;
mod stream_session;

pub use encoded_payload::{EncodedPayload, Ownership};
pub use frame::Frame;
pub use led_state::LedState;
pub use stream_session::{SessionEnd, SessionState, StreamSession};
