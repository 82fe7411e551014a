// upres/src/core/processor.rs
use super::policy::{decide, Decision, SkipReason};
use super::{Job, Result, UpscaleConfig};
use crate::processors::{Loader, Upscaler, Writer};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Upscaled { destination: PathBuf },
    Skipped(SkipReason),
}

/// Runs jobs one at a time against a single loaded model.
pub struct UpscaleProcessor<U: Upscaler> {
    config: UpscaleConfig,
    loader: Loader,
    writer: Writer,
    upscaler: U,
}

impl<U: Upscaler> UpscaleProcessor<U> {
    pub fn new(config: UpscaleConfig, upscaler: U) -> Self {
        let writer = Writer::new(config.quality);

        Self {
            config,
            loader: Loader::new(),
            writer,
            upscaler,
        }
    }

    pub fn config(&self) -> &UpscaleConfig {
        &self.config
    }

    pub fn upscaler(&self) -> &U {
        &self.upscaler
    }

    pub fn plan<P: AsRef<Path>>(&self, source: P, destination: P) -> Job {
        Job {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
            model: self.config.model.clone(),
            scale: self.config.scale,
            suffix: self.config.suffix.clone(),
        }
    }

    pub fn run(&mut self, job: &Job) -> Result<Outcome> {
        if let Decision::Skip(reason) = decide(&job.source, &job.destination, &job.suffix) {
            log::debug!("{}", reason);
            return Ok(Outcome::Skipped(reason));
        }

        let image = self.loader.load(&job.source)?;
        let upscaled = self.upscaler.upscale(&image)?;

        log::debug!(
            "Upscaled {} from {}x{} to {}x{} with {} (x{})",
            job.source.display(),
            image.width(),
            image.height(),
            upscaled.width(),
            upscaled.height(),
            job.model,
            job.scale
        );

        self.writer.write(&upscaled, &job.destination)?;

        Ok(Outcome::Upscaled {
            destination: job.destination.clone(),
        })
    }
}
