use bytes::{Bytes, BytesMut};

use crate::domain::errors::{DomainError, Result};

/// One decoded part of a `multipart/x-mixed-replace` stream
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub content_type: Option<String>,
    pub payload: Bytes,
}

/// Incremental reader for the MJPEG stream, as a client sees it.
///
/// Payloads are cut by their `Content-Length`. The boundary is only matched
/// where a part is expected to start, never searched for inside payload
/// bytes, so JPEG data containing the token decodes unchanged.
#[derive(Debug)]
pub struct MultipartReader {
    delimiter: Vec<u8>,
    buffer: BytesMut,
}

impl MultipartReader {
    pub fn new(token: &str) -> Self {
        Self {
            delimiter: format!("--{}\r\n", token).into_bytes(),
            buffer: BytesMut::new(),
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes received but not yet part of a complete part
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Next complete part, `Ok(None)` when more bytes are needed
    pub fn next_part(&mut self) -> Result<Option<Part>> {
        let lead = if self.buffer.starts_with(b"\r\n") { 2 } else { 0 };
        let rest = &self.buffer[lead..];

        if rest.len() < self.delimiter.len() {
            let incomplete =
                self.delimiter.starts_with(rest) || b"\r\n".starts_with(&self.buffer[..]);
            return if incomplete {
                Ok(None)
            } else {
                Err(DomainError::MalformedStream("expected boundary".to_string()))
            };
        }
        if !rest.starts_with(&self.delimiter) {
            return Err(DomainError::MalformedStream("expected boundary".to_string()));
        }

        let headers_start = lead + self.delimiter.len();
        let Some(headers_len) = find(&self.buffer[headers_start..], b"\r\n\r\n") else {
            return Ok(None);
        };
        let headers = std::str::from_utf8(&self.buffer[headers_start..headers_start + headers_len])
            .map_err(|_| DomainError::MalformedStream("part header is not UTF-8".to_string()))?;

        let mut content_type = None;
        let mut content_length = None;
        for line in headers.split("\r\n") {
            let Some((name, value)) = line.split_once(':') else {
                return Err(DomainError::MalformedStream(format!("bad header line: {}", line)));
            };
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                content_type = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("content-length") {
                let len = value.parse::<usize>().map_err(|_| {
                    DomainError::MalformedStream(format!("bad Content-Length: {}", value))
                })?;
                content_length = Some(len);
            }
        }
        let content_length = content_length
            .ok_or_else(|| DomainError::MalformedStream("missing Content-Length".to_string()))?;

        let payload_start = headers_start + headers_len + 4;
        if self.buffer.len() < payload_start + content_length {
            return Ok(None);
        }

        let mut part = self.buffer.split_to(payload_start + content_length);
        let payload = part.split_off(payload_start).freeze();

        Ok(Some(Part {
            content_type,
            payload,
        }))
    }

    /// Decode every complete part of a finished stream body
    pub fn read_all(token: &str, body: &[u8]) -> Result<Vec<Part>> {
        let mut reader = Self::new(token);
        reader.push(body);

        let mut parts = Vec::new();
        while let Some(part) = reader.next_part()? {
            parts.push(part);
        }
        Ok(parts)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
