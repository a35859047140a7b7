mod log_led;

pub use log_led::LogLed;
