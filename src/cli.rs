// upres/src/cli.rs
use crate::core::{UpscaleConfig, DEFAULT_MODEL, DEFAULT_MODEL_DIR, DEFAULT_UPSCALE_SUFFIX};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "upres")]
#[command(version, about = "Upscale an image or directory using a super-resolution model and save with a configurable suffix")]
pub struct Cli {
    /// Input image path or directory
    pub input: String,

    /// Output path, or output directory when the input is a directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model short name (e.g. edsr-base) or full identifier (e.g. eugenesiow/edsr-base)
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Upscaling factor passed to the model
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(2..=4))]
    pub scale: u32,

    /// Suffix appended to file stems for upscaled outputs
    #[arg(short, long, default_value = DEFAULT_UPSCALE_SUFFIX, allow_hyphen_values = true)]
    pub upscale_suffix: String,

    /// Root directory holding ONNX weights as <namespace>/<model>/x<scale>.onnx
    #[arg(long, env = "UPRES_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: PathBuf,

    /// JPEG output quality (1-100)
    #[arg(short, long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> UpscaleConfig {
        UpscaleConfig {
            model: self.model.clone(),
            scale: self.scale,
            suffix: self.upscale_suffix.clone(),
            model_dir: self.model_dir.clone(),
            quality: self.quality,
        }
    }
}
