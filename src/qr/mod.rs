//! QR code encoding and rasterization
//!
//! This module turns a payload into a finalized QR symbol (stepping the version
//! up when the payload does not fit) and paints that symbol into a two-colour image.

pub mod config;
mod encoder;
mod render;

pub use config::{EncoderConfig, ImageColors, MAX_VERSION, module_count};
pub use encoder::{QrEncoder, QrSymbol};
pub use render::rasterize;

pub use qrcode::EcLevel;

/// Data to be carried by a QR symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    /// The raw payload bytes
    pub data: Vec<u8>,
}

impl QrPayload {
    /// Create a new QR payload from a string, taken verbatim
    pub fn from_string(s: String) -> Self {
        Self {
            data: s.into_bytes(),
        }
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload carries no data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_payload_from_string() {
        let payload = QrPayload::from_string("https://example.com".to_string());
        assert_eq!(payload.as_bytes(), b"https://example.com");
        assert_eq!(payload.len(), 19);
        assert!(!payload.is_empty());
    }

    #[test]
    fn test_empty_payload() {
        let payload = QrPayload::from_string(String::new());
        assert!(payload.is_empty());
    }
}
