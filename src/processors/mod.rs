// upres/src/processors/mod.rs
mod batch;
mod loader;
mod traversal;
mod upscaler;
mod writer;

pub use batch::BatchProcessor;
pub use loader::Loader;
pub use traversal::collect_candidates;
pub use upscaler::{
    image_to_tensor, tensor_to_image, ModelFamily, ModelId, OnnxUpscaler, Upscaler,
    MODEL_NAMESPACE, SUPPORTED_MODELS,
};
pub use writer::Writer;
