//! Generate a QR code for a custom payload with non-default colours
//!
//! Usage: cargo run --example generate_qr

use image::Rgb;
use siteqr::{GeneratorConfig, ImageColors, QrImageGenerator};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let mut config = GeneratorConfig::new("https://example.com", "qr_output.png");
    config.encoder.box_size = 8;
    config.encoder.border = 2;
    config.colors = ImageColors {
        foreground: Rgb([15, 23, 42]),
        background: Rgb([248, 250, 252]),
    };

    let generator = QrImageGenerator::new(config)?;
    let report = generator.generate()?;

    println!("✓ QR code generated and saved to {}", report.path.display());
    println!(
        "  Version {} ({} modules), {}x{} px",
        report.version, report.modules, report.width, report.height
    );

    Ok(())
}
