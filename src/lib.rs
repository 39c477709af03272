//! siteqr - one-shot generator for the website QR code image
//!
//! Encodes a fixed URL into a QR symbol at error correction level H, paints it
//! black on white with a quiet zone and saves it as a PNG.
//!
//! # Example
//!
//! ```no_run
//! use siteqr::{GeneratorConfig, QrImageGenerator};
//!
//! fn main() -> siteqr::Result<()> {
//!     let generator = QrImageGenerator::new(GeneratorConfig::new(
//!         "https://example.com",
//!         "public/images/example_qr.png",
//!     ))?;
//!
//!     let report = generator.generate()?;
//!     for line in report.confirmation_lines() {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod output;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, SiteQrConfig};
pub use generator::{
    GeneratedQr, GeneratorConfig, QrImageGenerator, RenderedQr, WEBSITE_QR_PATH, WEBSITE_URL,
};
pub use qr::{EncoderConfig, ImageColors, QrEncoder, QrPayload, QrSymbol};
