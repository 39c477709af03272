//! End-to-end QR image generation: configure, encode, rasterize, save

use crate::error::Result;
use crate::output;
use crate::qr::{EncoderConfig, ImageColors, QrEncoder, QrPayload, rasterize};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// URL encoded by the website preset
pub const WEBSITE_URL: &str = "https://yegorlushpin.vercel.app";

/// Output path used by the website preset
pub const WEBSITE_QR_PATH: &str = "public/images/website_qr.png";

/// Everything needed to produce one QR image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Text carried by the symbol, used verbatim
    pub text: String,

    /// Destination of the PNG file
    pub output_path: PathBuf,

    /// Symbol and module geometry
    pub encoder: EncoderConfig,

    /// Dark/light colours
    pub colors: ImageColors,

    /// Create missing parent directories of `output_path`
    pub create_parent_dirs: bool,
}

impl GeneratorConfig {
    /// Configuration for an arbitrary payload and path with default encoder settings
    pub fn new(text: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            output_path: output_path.into(),
            encoder: EncoderConfig::default(),
            colors: ImageColors::default(),
            create_parent_dirs: true,
        }
    }

    /// The compiled-in website QR code: version 1 with fit, EC level H,
    /// 10px boxes, 4-module border, black on white
    pub fn website() -> Self {
        Self::new(WEBSITE_URL, WEBSITE_QR_PATH)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::website()
    }
}

/// Summary of a successfully written QR image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQr {
    /// Text the symbol encodes
    pub text: String,
    /// Where the image was saved
    pub path: PathBuf,
    /// Symbol version selected by the encoder
    pub version: i16,
    /// Modules per side, excluding the quiet zone
    pub modules: usize,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl GeneratedQr {
    /// The two lines reported on standard output after a successful run
    pub fn confirmation_lines(&self) -> [String; 2] {
        [
            format!("QR code generated for: {}", self.text),
            format!("Saved as: {}", self.path.display()),
        ]
    }
}

/// In-memory result of encoding and rasterizing
#[derive(Debug, Clone)]
pub struct RenderedQr {
    /// The two-colour raster, quiet zone included
    pub image: RgbImage,
    /// Symbol version selected by the encoder
    pub version: i16,
    /// Modules per side, excluding the quiet zone
    pub modules: usize,
}

/// Generates a single QR image from a [`GeneratorConfig`]
pub struct QrImageGenerator {
    config: GeneratorConfig,
    encoder: QrEncoder,
}

impl QrImageGenerator {
    /// Validate the configuration and prepare the encoder
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.colors.validate()?;
        let encoder = QrEncoder::with_config(config.encoder)?;
        tracing::debug!(
            version = config.encoder.version,
            ecc_level = ?config.encoder.ec_level,
            box_size = config.encoder.box_size,
            border = config.encoder.border,
            fit = config.encoder.fit,
            "Configured QR encoder"
        );
        Ok(Self { config, encoder })
    }

    /// Configuration this generator runs with
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Encode and rasterize without touching the filesystem.
    pub fn render_image(&self) -> Result<RenderedQr> {
        let payload = QrPayload::from_string(self.config.text.clone());
        if payload.is_empty() {
            tracing::warn!("Encoding an empty payload");
        }

        let symbol = self.encoder.encode(&payload)?;
        let img = rasterize(&symbol, self.encoder.config(), &self.config.colors)?;
        Ok(RenderedQr {
            image: img,
            version: symbol.version(),
            modules: symbol.width(),
        })
    }

    /// Run the whole pipeline and write the image to the configured path.
    pub fn generate(&self) -> Result<GeneratedQr> {
        let rendered = self.render_image()?;
        let path: &Path = &self.config.output_path;
        output::save_png(&rendered.image, path, self.config.create_parent_dirs)?;

        Ok(GeneratedQr {
            text: self.config.text.clone(),
            path: path.to_path_buf(),
            version: rendered.version,
            modules: rendered.modules,
            width: rendered.image.width(),
            height: rendered.image.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_website_preset() {
        let config = GeneratorConfig::website();
        assert_eq!(config.text, "https://yegorlushpin.vercel.app");
        assert_eq!(
            config.output_path,
            PathBuf::from("public/images/website_qr.png")
        );
        assert_eq!(config.encoder, EncoderConfig::default());
        assert_eq!(config.colors, ImageColors::default());
    }

    #[test]
    fn test_website_symbol_dimensions() {
        // 31 bytes at EC level H need version 4 (33 modules)
        let generator = QrImageGenerator::new(GeneratorConfig::website()).unwrap();
        let rendered = generator.render_image().unwrap();
        assert_eq!(rendered.version, 4);
        assert_eq!(rendered.modules, 33);
        assert_eq!(rendered.image.dimensions(), (410, 410));
    }

    #[test]
    fn test_confirmation_lines() {
        let report = GeneratedQr {
            text: "https://example.com".to_string(),
            path: PathBuf::from("public/images/website_qr.png"),
            version: 3,
            modules: 29,
            width: 370,
            height: 370,
        };
        let [first, second] = report.confirmation_lines();
        assert_eq!(first, "QR code generated for: https://example.com");
        assert_eq!(second, "Saved as: public/images/website_qr.png");
    }

    #[test]
    fn test_generate_reports_written_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qr.png");
        let generator =
            QrImageGenerator::new(GeneratorConfig::new("https://example.com", &path)).unwrap();

        let report = generator.generate().unwrap();
        assert_eq!(report.path, path);
        assert_eq!(report.version, 3);
        assert_eq!((report.width, report.height), (370, 370));
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let mut config = GeneratorConfig::new("x", "qr.png");
        config.encoder.box_size = 0;
        assert!(matches!(
            QrImageGenerator::new(config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
