//! Persisting rendered images without leaving partial files behind

use crate::error::{Error, Result};
use image::{ImageFormat, RgbImage};
use std::fs::{self, File};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

/// Encode `img` as PNG and write it to `path`, replacing any existing file.
///
/// The image is encoded fully in memory, written to a hidden sibling file and
/// renamed over `path`, so a failure never leaves a truncated PNG at the target.
pub fn save_png(img: &RgbImage, path: &Path, create_parent_dirs: bool) -> Result<()> {
    let mut encoded = Vec::new();
    img.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)?;

    write_replacing(path, &encoded, create_parent_dirs)?;

    tracing::info!(
        path = %path.display(),
        bytes = encoded.len(),
        width = img.width(),
        height = img.height(),
        "Saved QR image"
    );
    Ok(())
}

fn write_replacing(path: &Path, bytes: &[u8], create_parent_dirs: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && create_parent_dirs {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to create directory {}: {e}", parent.display()),
                ))
            })?;
        }
    }

    let staging = staging_path(path)?;
    let written = File::create(&staging)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&staging, path));

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&staging) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %staging.display(),
                    "Failed to remove staging file: {cleanup}"
                );
            }
        }
        return Err(Error::Io(io::Error::new(
            e.kind(),
            format!("Failed to write {}: {e}", path.display()),
        )));
    }

    Ok(())
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        Error::InvalidConfig(format!(
            "Output path '{}' must include a file name",
            path.display()
        ))
    })?;

    let mut staged = std::ffi::OsString::from(".");
    staged.push(file_name);
    staged.push(format!(".{}.tmp", std::process::id()));
    Ok(path.with_file_name(staged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    fn sample() -> RgbImage {
        RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]))
    }

    #[test]
    fn test_writes_png_signature() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");

        save_png(&sample(), &path, false).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        fs::write(&path, b"stale").unwrap();

        save_png(&sample(), &path, false).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 4);
    }

    #[test]
    fn test_creates_missing_parents_when_allowed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("public/images/out.png");

        save_png(&sample(), &path, true).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_parent_fails_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent/out.png");

        let result = save_png(&sample(), &path, false);
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_staging_path_is_hidden_sibling() {
        let staged = staging_path(Path::new("public/images/website_qr.png")).unwrap();
        assert_eq!(staged.parent(), Some(Path::new("public/images")));
        let name = staged.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".website_qr.png."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn test_rejects_path_without_file_name() {
        assert!(matches!(
            staging_path(Path::new("/")),
            Err(Error::InvalidConfig(_))
        ));
    }
}
