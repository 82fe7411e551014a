// upres/src/core/mod.rs
pub mod policy;
pub mod processor;
pub mod runner;

use std::path::PathBuf;
use thiserror::Error;

pub use policy::{decide, Decision, SkipReason};
pub use processor::{Outcome, UpscaleProcessor};
pub use runner::{RunReport, Runner};

pub const DEFAULT_MODEL: &str = "edsr-base";
pub const DEFAULT_SCALE: u32 = 2;
pub const DEFAULT_UPSCALE_SUFFIX: &str = "-upscaled";
pub const DEFAULT_MODEL_DIR: &str = "models";
pub const SUPPORTED_SCALES: [u32; 3] = [2, 3, 4];

#[derive(Debug, Clone)]
pub struct UpscaleConfig {
    pub model: String,
    pub scale: u32,
    pub suffix: String,
    pub model_dir: PathBuf,
    pub quality: u8,
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            scale: DEFAULT_SCALE,
            suffix: DEFAULT_UPSCALE_SUFFIX.to_string(),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            quality: 90,
        }
    }
}

impl UpscaleConfig {
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_SCALES.contains(&self.scale) {
            return Err(UpscaleError::InvalidParameter(format!(
                "Scale must be one of 2, 3 or 4 (got {})",
                self.scale
            )));
        }

        if self.suffix.is_empty() {
            return Err(UpscaleError::InvalidParameter(
                "Upscale suffix cannot be empty".to_string(),
            ));
        }

        if self.suffix.contains(['/', '\\']) {
            return Err(UpscaleError::InvalidParameter(format!(
                "Upscale suffix cannot contain path separators: {}",
                self.suffix
            )));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(UpscaleError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        crate::processors::ModelId::parse(&self.model)?;

        Ok(())
    }
}

/// One unit of work: where to read, where to write, and with what.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub model: String,
    pub scale: u32,
    pub suffix: String,
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<(PathBuf, String)>,
}

impl ProcessingStats {
    pub fn failed_count(&self) -> usize {
        self.errors.len()
    }

    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Upscaled { .. } => self.processed_count += 1,
            Outcome::Skipped(_) => self.skipped_count += 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum UpscaleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Input not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No supported image files found in: {}", .0.display())]
    NoCandidates(PathBuf),

    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error loading model {model}: {reason}")]
    ModelLoad { model: String, reason: String },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("ONNX Runtime error: {0}")]
    Runtime(#[from] ort::Error),
}

pub type Result<T> = std::result::Result<T, UpscaleError>;
