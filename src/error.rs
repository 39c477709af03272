//! Error types for siteqr operations

use qrcode::types::QrError;
use thiserror::Error;

/// Result type alias using siteqr's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for siteqr operations
#[derive(Error, Debug)]
pub enum Error {
    /// Payload does not fit in any permitted symbol version
    #[error("Data too long: {len} bytes do not fit in QR version {max_version} at EC level {ec_level}")]
    Capacity {
        /// Payload length in bytes
        len: usize,
        /// Largest version that was tried
        max_version: i16,
        /// Error correction level the symbol was requested at
        ec_level: String,
    },

    /// QR code encoding failed for a reason other than capacity
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// Encoder or image parameters the generator cannot work with
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Runtime configuration error (config files, logging setup)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<QrError> for Error {
    fn from(e: QrError) -> Self {
        match e {
            QrError::InvalidVersion => Error::InvalidConfig(e.to_string()),
            other => Error::QrEncode(other.to_string()),
        }
    }
}
