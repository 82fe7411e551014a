mod cli;
mod core;
mod processors;
mod utils;

pub use cli::Cli;
pub use self::core::{
    decide, Decision, Job, Outcome, ProcessingStats, Result, RunReport, Runner, SkipReason,
    UpscaleConfig, UpscaleError, UpscaleProcessor, DEFAULT_MODEL, DEFAULT_SCALE,
    DEFAULT_UPSCALE_SUFFIX, SUPPORTED_SCALES,
};
pub use processors::{
    collect_candidates, image_to_tensor, tensor_to_image, BatchProcessor, Loader, ModelFamily,
    ModelId, OnnxUpscaler, Upscaler, Writer, MODEL_NAMESPACE, SUPPORTED_MODELS,
};
pub use utils::{
    default_output_path, ensure_dir, format_file_size, is_supported_format, output_path_in,
    resolve_input_path, SUPPORTED_EXTENSIONS,
};

pub mod prelude {
    pub use crate::{
        BatchProcessor, ModelId, OnnxUpscaler, Runner, UpscaleConfig, UpscaleProcessor, Upscaler,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
