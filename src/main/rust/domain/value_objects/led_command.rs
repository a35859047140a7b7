use std::str::FromStr;

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCommand {
    On,
    Off,
}

impl LedCommand {
    pub fn is_on(&self) -> bool {
        matches!(self, LedCommand::On)
    }
}

impl FromStr for LedCommand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(LedCommand::On),
            "off" => Ok(LedCommand::Off),
            other => Err(DomainError::InvalidLedState(other.to_string())),
        }
    }
}
