use bytes::Bytes;

use crate::domain::errors::{DomainError, Result};

/// Longest boundary allowed by RFC 2046
const MAX_BOUNDARY_LEN: usize = 70;

/// Token used as the default boundary of the MJPEG stream
pub const DEFAULT_BOUNDARY: &str = "123456789000000000000987654321";

/// Multipart boundary token, fixed for the lifetime of the server.
///
/// The token is never escaped inside payloads. Receivers frame each part by
/// its `Content-Length` header, so a token that happens to occur inside JPEG
/// data does not break the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    token: String,
    marker: Bytes,
}

impl Boundary {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        Self::validate(&token)?;
        let marker = Bytes::from(format!("\r\n--{}\r\n", token));
        Ok(Self { token, marker })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value of the `Content-Type` header of the stream response
    pub fn content_type(&self) -> String {
        format!("multipart/x-mixed-replace;boundary={}", self.token)
    }

    /// Delimiter written before every part
    pub fn marker(&self) -> Bytes {
        self.marker.clone()
    }

    /// Part header announcing a JPEG payload of `len` bytes
    pub fn part_header(len: usize) -> String {
        format!(
            "Content-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
            len
        )
    }

    fn validate(token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(DomainError::InvalidBoundary("boundary cannot be empty".to_string()));
        }
        if token.len() > MAX_BOUNDARY_LEN {
            return Err(DomainError::InvalidBoundary(format!(
                "boundary longer than {} characters",
                MAX_BOUNDARY_LEN
            )));
        }

        let valid_chars = token.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '\'' | '(' | ')' | '+' | '_' | ',' | '-' | '.' | '/' | ':' | '=' | '?')
        });
        if !valid_chars {
            return Err(DomainError::InvalidBoundary(format!(
                "boundary contains invalid characters: {}",
                token
            )));
        }

        Ok(())
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            token: DEFAULT_BOUNDARY.to_string(),
            marker: Bytes::from(format!("\r\n--{}\r\n", DEFAULT_BOUNDARY)),
        }
    }
}
