use std::sync::atomic::{AtomicBool, Ordering};

/// Flash LED state, mirrored for the dashboard and logs
#[derive(Debug, Default)]
pub struct LedState {
    on: AtomicBool,
}

impl LedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::SeqCst)
    }

    pub fn set(&self, on: bool) {
        self.on.store(on, Ordering::SeqCst);
    }
}
