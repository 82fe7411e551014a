// upres/src/processors/upscaler.rs
use crate::core::{Result, UpscaleError};
use image::{DynamicImage, Rgb, RgbImage};
use ndarray::{Array4, ArrayView4, Ix4};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use std::fmt;
use std::path::{Path, PathBuf};

pub const MODEL_NAMESPACE: &str = "eugenesiow";

pub const SUPPORTED_MODELS: [&str; 13] = [
    "drln-bam",
    "edsr",
    "msrn",
    "mdsr",
    "msrn-bam",
    "edsr-base",
    "mdsr-bam",
    "awsrn-bam",
    "a2n",
    "carn",
    "carn-bam",
    "pan",
    "pan-bam",
];

/// An image-in, image-out super-resolution model.
pub trait Upscaler {
    fn upscale(&mut self, image: &DynamicImage) -> Result<DynamicImage>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Drln,
    Edsr,
    Msrn,
    Mdsr,
    Awsrn,
    A2n,
    Carn,
    Pan,
}

impl ModelFamily {
    pub fn from_short_name(name: &str) -> Option<Self> {
        match name {
            "drln-bam" => Some(ModelFamily::Drln),
            "edsr" | "edsr-base" => Some(ModelFamily::Edsr),
            "msrn" | "msrn-bam" => Some(ModelFamily::Msrn),
            "mdsr" | "mdsr-bam" => Some(ModelFamily::Mdsr),
            "awsrn-bam" => Some(ModelFamily::Awsrn),
            "a2n" => Some(ModelFamily::A2n),
            "carn" | "carn-bam" => Some(ModelFamily::Carn),
            "pan" | "pan-bam" => Some(ModelFamily::Pan),
            _ => None,
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelFamily::Drln => "DRLN",
            ModelFamily::Edsr => "EDSR",
            ModelFamily::Msrn => "MSRN",
            ModelFamily::Mdsr => "MDSR",
            ModelFamily::Awsrn => "AWSRN",
            ModelFamily::A2n => "A2N",
            ModelFamily::Carn => "CARN",
            ModelFamily::Pan => "PAN",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelId {
    pub short: String,
    pub full: String,
    pub family: ModelFamily,
}

impl ModelId {
    /// Accepts `edsr-base` or `eugenesiow/edsr-base`.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        let short = name.rsplit('/').next().unwrap_or(name);

        let family = ModelFamily::from_short_name(short).ok_or_else(|| {
            UpscaleError::InvalidParameter(format!(
                "Invalid model: {}. Supported models: {}",
                name,
                SUPPORTED_MODELS.join(", ")
            ))
        })?;

        let full = if name.contains('/') {
            name.to_string()
        } else {
            format!("{}/{}", MODEL_NAMESPACE, name)
        };

        Ok(Self {
            short: short.to_string(),
            full,
            family,
        })
    }

    pub fn weights_path(&self, model_dir: &Path, scale: u32) -> PathBuf {
        model_dir.join(&self.full).join(format!("x{}.onnx", scale))
    }
}

pub struct OnnxUpscaler {
    id: ModelId,
    scale: u32,
    session: Session,
    input_name: String,
    output_name: String,
}

impl OnnxUpscaler {
    pub fn load(id: ModelId, scale: u32, model_dir: &Path) -> Result<Self> {
        let weights = id.weights_path(model_dir, scale);
        let load_error = |reason: String| UpscaleError::ModelLoad {
            model: id.full.clone(),
            reason,
        };

        if !weights.is_file() {
            return Err(load_error(format!(
                "weights not found at {}",
                weights.display()
            )));
        }

        log::debug!("Loading ONNX weights from {}", weights.display());

        let session = Session::builder()
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|builder| builder.commit_from_file(&weights))
            .map_err(|e| load_error(e.to_string()))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| load_error("model declares no inputs".to_string()))?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| load_error("model declares no outputs".to_string()))?;

        log::info!("Loaded {} model {} (x{})", id.family, id.full, scale);

        Ok(Self {
            id,
            scale,
            session,
            input_name,
            output_name,
        })
    }
}

impl Upscaler for OnnxUpscaler {
    fn upscale(&mut self, image: &DynamicImage) -> Result<DynamicImage> {
        let rgb = image.to_rgb8();
        let input = image_to_tensor(&rgb);
        log::debug!("Running {} on tensor {:?}", self.id.short, input.shape());

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input.view()]?)?;
        let output = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;
        let output = output
            .into_dimensionality::<Ix4>()
            .map_err(|e| UpscaleError::Inference(format!("unexpected output rank: {}", e)))?;

        let upscaled = tensor_to_image(output)?;
        let expected = (rgb.width() * self.scale, rgb.height() * self.scale);
        if upscaled.dimensions() != expected {
            return Err(UpscaleError::Inference(format!(
                "model produced {}x{}, expected {}x{}",
                upscaled.width(),
                upscaled.height(),
                expected.0,
                expected.1
            )));
        }

        Ok(DynamicImage::ImageRgb8(upscaled))
    }
}

/// HWC u8 pixels to a 1x3xHxW tensor in [0, 1].
pub fn image_to_tensor(image: &RgbImage) -> Array4<f32> {
    let (width, height) = image.dimensions();
    let mut tensor = Array4::<f32>::zeros((1, 3, height as usize, width as usize));

    for (x, y, pixel) in image.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for channel in 0..3 {
            tensor[[0, channel, y, x]] = pixel[channel] as f32 / 255.0;
        }
    }

    tensor
}

pub fn tensor_to_image(tensor: ArrayView4<f32>) -> Result<RgbImage> {
    let shape = tensor.shape();
    if shape[0] != 1 || shape[1] != 3 {
        return Err(UpscaleError::Inference(format!(
            "expected a 1x3xHxW output, got {:?}",
            shape
        )));
    }

    let (height, width) = (shape[2] as u32, shape[3] as u32);
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgb([0, 1, 2].map(|channel| to_u8(tensor[[0, channel, y, x]])))
    }))
}

fn to_u8(value: f32) -> u8 {
    // NaN falls through the clamp and saturates to 0 on the cast.
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_gets_namespace() {
        let id = ModelId::parse("edsr-base").unwrap();
        assert_eq!(id.full, "eugenesiow/edsr-base");
        assert_eq!(id.short, "edsr-base");
        assert_eq!(id.family, ModelFamily::Edsr);
    }

    #[test]
    fn full_identifier_is_kept() {
        let id = ModelId::parse("someone/carn-bam").unwrap();
        assert_eq!(id.full, "someone/carn-bam");
        assert_eq!(id.family, ModelFamily::Carn);
    }

    #[test]
    fn every_supported_model_has_a_family() {
        for name in SUPPORTED_MODELS {
            assert!(ModelId::parse(name).is_ok(), "{}", name);
        }
        assert!(ModelId::parse("real-esrgan").is_err());
    }

    #[test]
    fn weights_path_layout() {
        let id = ModelId::parse("pan").unwrap();
        assert_eq!(
            id.weights_path(Path::new("models"), 3),
            Path::new("models").join("eugenesiow/pan").join("x3.onnx")
        );
    }

    #[test]
    fn missing_weights_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let id = ModelId::parse("edsr-base").unwrap();
        let result = OnnxUpscaler::load(id, 2, dir.path());
        assert!(matches!(result, Err(UpscaleError::ModelLoad { .. })));
    }

    #[test]
    fn tensor_conversion_normalizes_and_clamps() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([0, 128, 255]));
        image.put_pixel(1, 0, Rgb([255, 255, 255]));

        let mut tensor = image_to_tensor(&image);
        assert_eq!(tensor.shape(), &[1, 3, 1, 2]);
        assert_eq!(tensor[[0, 0, 0, 0]], 0.0);
        assert_eq!(tensor[[0, 2, 0, 0]], 1.0);
        assert!((tensor[[0, 1, 0, 0]] - 128.0 / 255.0).abs() < 1e-6);

        tensor[[0, 0, 0, 1]] = 1.7;
        tensor[[0, 1, 0, 1]] = -0.3;
        let restored = tensor_to_image(tensor.view()).unwrap();
        assert_eq!(restored.get_pixel(0, 0), &Rgb([0, 128, 255]));
        assert_eq!(restored.get_pixel(1, 0), &Rgb([255, 0, 255]));
    }

    #[test]
    fn rejects_wrong_channel_count() {
        let tensor = Array4::<f32>::zeros((1, 4, 2, 2));
        assert!(tensor_to_image(tensor.view()).is_err());
    }
}
