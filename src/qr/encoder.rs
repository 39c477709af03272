//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::config::{EncoderConfig, MAX_VERSION, module_count};
use crate::qr::QrPayload;
use qrcode::types::QrError;
use qrcode::{Color, QrCode, Version};

/// A finalized QR symbol together with the version the encoder settled on
pub struct QrSymbol {
    code: QrCode,
    version: i16,
}

impl QrSymbol {
    /// Version selected for this symbol
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Module count per side, excluding the quiet zone
    pub fn width(&self) -> usize {
        self.code.width()
    }

    /// Whether the module at column `x`, row `y` is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.code[(x, y)] == Color::Dark
    }
}

/// QR code encoder
pub struct QrEncoder {
    config: EncoderConfig,
}

impl QrEncoder {
    /// Create a new QR encoder with the default website parameters
    pub fn new() -> Self {
        Self {
            config: EncoderConfig::default(),
        }
    }

    /// Create a new QR encoder with specific parameters
    pub fn with_config(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parameters this encoder was built with
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode a payload, stepping the version up when `fit` allows it.
    pub fn encode(&self, payload: &QrPayload) -> Result<QrSymbol> {
        let first = self.config.version;
        let last = if self.config.fit { MAX_VERSION } else { first };

        for version in first..=last {
            match QrCode::with_version(
                payload.as_bytes(),
                Version::Normal(version),
                self.config.ec_level,
            ) {
                Ok(code) => {
                    tracing::debug!(
                        version,
                        ecc_level = ?self.config.ec_level,
                        modules = code.width(),
                        length = payload.len(),
                        "Encoded QR symbol"
                    );
                    debug_assert_eq!(code.width(), module_count(version));
                    return Ok(QrSymbol { code, version });
                }
                Err(QrError::DataTooLong) => {
                    tracing::trace!(version, "Payload does not fit, trying next version");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(Error::Capacity {
            len: payload.len(),
            max_version: last,
            ec_level: format!("{:?}", self.config.ec_level),
        })
    }

    /// Encode a string into a QR symbol
    pub fn encode_string(&self, data: &str) -> Result<QrSymbol> {
        let payload = QrPayload::from_string(data.to_string());
        self.encode(&payload)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}
