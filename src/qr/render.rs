//! Rasterization of finalized symbols into two-colour images

use crate::error::{Error, Result};
use crate::qr::config::{EncoderConfig, ImageColors};
use crate::qr::encoder::QrSymbol;
use image::RgbImage;

/// Paint `symbol` into an RGB image, one `box_size` square per module, surrounded
/// by a `border`-module quiet zone in the background colour.
pub fn rasterize(
    symbol: &QrSymbol,
    config: &EncoderConfig,
    colors: &ImageColors,
) -> Result<RgbImage> {
    colors.validate()?;

    let modules = symbol.width() as u32;
    let side = config.image_side(modules).ok_or_else(|| {
        Error::InvalidConfig(format!(
            "{modules} modules at box size {} overflow the image dimensions",
            config.box_size
        ))
    })?;

    let mut img = RgbImage::from_pixel(side, side, colors.background);
    let scale = config.box_size;

    for y in 0..modules {
        for x in 0..modules {
            if !symbol.is_dark(x as usize, y as usize) {
                continue;
            }

            let left = (config.border + x) * scale;
            let top = (config.border + y) * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(left + dx, top + dy, colors.foreground);
                }
            }
        }
    }

    tracing::debug!(
        width = side,
        height = side,
        box_size = scale,
        border = config.border,
        "Rasterized QR symbol"
    );

    Ok(img)
}
