use crate::domain::errors::{DomainError, Result};

/// HTTP listener settings for the camera endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    port: u16,
    enable_tm_page: bool,
}

impl ServerConfig {
    pub fn new(port: u16) -> Result<Self> {
        Self::validate_port(port)?;

        Ok(Self {
            port,
            enable_tm_page: true,
        })
    }

    pub fn with_tm_page(mut self, enabled: bool) -> Self {
        self.enable_tm_page = enabled;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn tm_page_enabled(&self) -> bool {
        self.enable_tm_page
    }

    fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(DomainError::InvalidPort);
        }
        Ok(())
    }
}
