use std::sync::Arc;

use crate::domain::entities::LedState;
use crate::domain::ports::LedDriver;
use crate::domain::value_objects::LedCommand;

/// Drives the flash LED and keeps its mirrored state
pub struct LedService {
    driver: Arc<dyn LedDriver>,
    state: LedState,
}

impl LedService {
    pub fn new(driver: Arc<dyn LedDriver>) -> Self {
        let service = Self {
            driver,
            state: LedState::new(),
        };
        service.driver.set_level(false);
        service
    }

    pub fn apply(&self, command: LedCommand) {
        self.driver.set_level(command.is_on());
        self.state.set(command.is_on());
        tracing::info!("LED {}", if command.is_on() { "ON" } else { "OFF" });
    }

    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }
}
