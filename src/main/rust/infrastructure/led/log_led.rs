use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::ports::LedDriver;

/// Flash LED stand-in for hosts without GPIO; records the level and logs it
#[derive(Debug)]
pub struct LogLed {
    pin: u8,
    level: AtomicBool,
}

impl LogLed {
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            level: AtomicBool::new(false),
        }
    }

    pub fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }
}

impl LedDriver for LogLed {
    fn set_level(&self, on: bool) {
        self.level.store(on, Ordering::SeqCst);
        tracing::debug!(pin = self.pin, "LED pin {}", if on { "HIGH" } else { "LOW" });
    }
}
