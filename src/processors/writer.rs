// upres/src/processors/writer.rs
use crate::core::{Result, UpscaleError};
use crate::utils::{ensure_dir, format_file_size};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, ImageFormat};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct Writer {
    quality: u8,
}

impl Writer {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Persist `image` at `path`, creating the parent directory if needed.
    pub fn write(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        let format = self.detect_format(path);
        log::debug!(
            "Saving image to {} with format {:?}",
            path.display(),
            format
        );

        let existed = path.exists();
        let file = File::create(path)?;

        if let Err(e) = self.encode(image, file, format) {
            // Only files this call created are removed.
            if !existed {
                if let Err(remove_err) = std::fs::remove_file(path) {
                    log::warn!(
                        "Cannot remove partial output {}: {}",
                        path.display(),
                        remove_err
                    );
                }
            }
            return Err(e);
        }

        self.log_save_result(path)
    }

    fn encode(&self, image: &DynamicImage, file: File, format: ImageFormat) -> Result<()> {
        let mut writer = BufWriter::new(file);

        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut writer, self.quality);
                image.write_with_encoder(encoder)
            }
            _ => image.write_to(&mut writer, format),
        }
        .map_err(flatten_io)?;

        writer.into_inner().map_err(|e| e.into_error())?;
        Ok(())
    }

    fn detect_format(&self, path: &Path) -> ImageFormat {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("png") => ImageFormat::Png,
            Some("webp") => ImageFormat::WebP,
            Some("bmp") => ImageFormat::Bmp,
            Some("tiff") | Some("tif") => ImageFormat::Tiff,
            _ => ImageFormat::Jpeg,
        }
    }

    fn log_save_result(&self, path: &Path) -> Result<()> {
        let file_size = std::fs::metadata(path)?.len();
        log::info!(
            "Saved image: {} ({})",
            path.display(),
            format_file_size(file_size)
        );
        Ok(())
    }
}

fn flatten_io(error: ImageError) -> UpscaleError {
    match error {
        ImageError::IoError(e) => UpscaleError::Io(e),
        other => UpscaleError::Image(other),
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new(90)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.png");
        let image = DynamicImage::ImageRgb8(image::RgbImage::new(2, 2));

        Writer::default().write(&image, &path).unwrap();
        Writer::default().write(&image, &path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn encodes_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = DynamicImage::ImageRgb8(image::RgbImage::new(3, 3));

        for name in ["out.JPG", "out.png", "out.bmp", "out.tiff", "out.webp"] {
            let path = dir.path().join(name);
            Writer::new(80).write(&image, &path).unwrap();

            let decoded = image::open(&path).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (3, 3), "{}", name);
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn reports_full_disk() {
        let image = DynamicImage::ImageRgb8(image::RgbImage::new(2, 2));

        let result = Writer::default().write(&image, Path::new("/dev/full"));

        assert!(matches!(result, Err(UpscaleError::Io(_))));
        assert!(Path::new("/dev/full").exists());
    }

    #[test]
    fn failed_encode_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let image = DynamicImage::ImageRgb32F(image::Rgb32FImage::new(2, 2));

        let result = Writer::default().write(&image, &path);

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let image = DynamicImage::ImageRgb8(image::RgbImage::new(1, 1));

        let result = Writer::default().write(&image, &blocker.join("out.png"));
        assert!(matches!(result, Err(UpscaleError::Io(_))));
    }
}
