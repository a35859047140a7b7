/// Port for the flash LED pin
pub trait LedDriver: Send + Sync {
    fn set_level(&self, on: bool);
}
