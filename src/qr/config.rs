//! Encoder and raster configuration

use crate::error::{Error, Result};
use image::Rgb;
use qrcode::EcLevel;

/// Largest standard (non-micro) QR version
pub const MAX_VERSION: i16 = 40;

/// Encoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Symbol version to start from (1..=40)
    /// With `fit` enabled this is a minimum, not an exact size
    pub version: i16,

    /// Error correction level
    pub ec_level: EcLevel,

    /// Pixels per module side
    pub box_size: u32,

    /// Quiet zone width in modules
    pub border: u32,

    /// Step up to a larger version when the payload does not fit
    pub fit: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            version: 1,
            ec_level: EcLevel::H, // Highest redundancy tier
            box_size: 10,
            border: 4,
            fit: true,
        }
    }
}

impl EncoderConfig {
    /// Reject parameter combinations the encoder or rasterizer cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_VERSION).contains(&self.version) {
            return Err(Error::InvalidConfig(format!(
                "version {} is outside 1..={MAX_VERSION}",
                self.version
            )));
        }

        if self.box_size == 0 {
            return Err(Error::InvalidConfig(
                "box size must be at least one pixel".to_string(),
            ));
        }

        // The largest symbol must still produce a representable image.
        let widest = module_count(MAX_VERSION) as u32;
        self.image_side(widest).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "box size {} with border {} overflows the image dimensions",
                self.box_size, self.border
            ))
        })?;

        Ok(())
    }

    /// Pixel length of one image side for a symbol `modules` wide.
    pub fn image_side(&self, modules: u32) -> Option<u32> {
        self.border
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(modules))
            .and_then(|total| total.checked_mul(self.box_size))
    }
}

/// Module count per side for a normal QR version (21 for version 1, +4 per step).
///
/// `version` must be within `1..=MAX_VERSION`.
pub fn module_count(version: i16) -> usize {
    debug_assert!(
        (1..=MAX_VERSION).contains(&version),
        "QR version {version} is outside 1..={MAX_VERSION}"
    );
    17 + 4 * version.clamp(1, MAX_VERSION) as usize
}

/// Foreground/background colour pair used when rasterizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageColors {
    /// Colour of dark modules
    pub foreground: Rgb<u8>,

    /// Colour of light modules and the quiet zone
    pub background: Rgb<u8>,
}

impl Default for ImageColors {
    fn default() -> Self {
        Self {
            foreground: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
        }
    }
}

impl ImageColors {
    /// A colour pair that renders dark modules indistinguishable from light ones is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.foreground == self.background {
            return Err(Error::InvalidConfig(format!(
                "foreground and background colours are both {:?}",
                self.foreground.0
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_website_parameters() {
        let config = EncoderConfig::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.ec_level, EcLevel::H);
        assert_eq!(config.box_size, 10);
        assert_eq!(config.border, 4);
        assert!(config.fit);
    }

    #[test]
    fn test_module_count_table() {
        assert_eq!(module_count(1), 21);
        assert_eq!(module_count(2), 25);
        assert_eq!(module_count(40), 177);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside 1..=40")]
    fn test_module_count_rejects_negative_version() {
        module_count(-5);
    }

    #[test]
    fn test_image_side() {
        let config = EncoderConfig::default();
        assert_eq!(config.image_side(21), Some(290));
    }

    #[test]
    fn test_rejects_out_of_range_version() {
        let mut config = EncoderConfig::default();
        config.version = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        config.version = 41;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_box_size() {
        let config = EncoderConfig {
            box_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let config = EncoderConfig {
            box_size: u32::MAX / 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_identical_colours() {
        let colors = ImageColors {
            foreground: Rgb([10, 10, 10]),
            background: Rgb([10, 10, 10]),
        };
        assert!(colors.validate().is_err());
        assert!(ImageColors::default().validate().is_ok());
    }
}
