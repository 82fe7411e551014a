// upres/src/core/runner.rs
use super::policy::{decide, Decision};
use super::{Outcome, ProcessingStats, Result, UpscaleConfig, UpscaleError, UpscaleProcessor};
use crate::processors::{collect_candidates, BatchProcessor, Upscaler};
use crate::utils::{default_output_path, ensure_dir};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum RunReport {
    Single(Outcome),
    Batch {
        stats: ProcessingStats,
        output_dir: PathBuf,
    },
}

/// Everything needed to upscale one resolved input path.
pub struct Runner {
    config: UpscaleConfig,
    show_progress: bool,
}

impl Runner {
    pub fn new(config: UpscaleConfig) -> Self {
        Self {
            config,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Upscale `input` (a file or a directory).
    ///
    /// `load_model` is called at most once, and only after every fatal
    /// pre-check has passed and at least one file may need work.
    pub fn run<U, F>(
        self,
        input: &Path,
        output: Option<&Path>,
        load_model: F,
    ) -> Result<RunReport>
    where
        U: Upscaler,
        F: FnOnce(&UpscaleConfig) -> Result<U>,
    {
        self.config.validate()?;

        if input.is_dir() {
            self.run_directory(input, output, load_model)
        } else {
            self.run_single(input, output, load_model)
        }
    }

    fn run_directory<U, F>(
        self,
        input: &Path,
        output: Option<&Path>,
        load_model: F,
    ) -> Result<RunReport>
    where
        U: Upscaler,
        F: FnOnce(&UpscaleConfig) -> Result<U>,
    {
        let candidates = collect_candidates(input)?;
        if candidates.is_empty() {
            return Err(UpscaleError::NoCandidates(input.to_path_buf()));
        }

        let output_dir = match output {
            Some(dir) => {
                ensure_dir(dir).map_err(|source| UpscaleError::OutputDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
                dir.to_path_buf()
            }
            None => input.to_path_buf(),
        };

        let upscaler = load_model(&self.config)?;
        let mut processor = UpscaleProcessor::new(self.config, upscaler);
        let stats = BatchProcessor::new(&mut processor)
            .with_progress(self.show_progress)
            .process_directory(&candidates, &output_dir);

        Ok(RunReport::Batch { stats, output_dir })
    }

    fn run_single<U, F>(
        self,
        input: &Path,
        output: Option<&Path>,
        load_model: F,
    ) -> Result<RunReport>
    where
        U: Upscaler,
        F: FnOnce(&UpscaleConfig) -> Result<U>,
    {
        if !input.is_file() {
            return Err(UpscaleError::MissingInput(input.to_path_buf()));
        }

        let destination = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(input, &self.config.suffix),
        };

        if let Decision::Skip(reason) = decide(input, &destination, &self.config.suffix) {
            log::debug!("{}", reason);
            return Ok(RunReport::Single(Outcome::Skipped(reason)));
        }

        let upscaler = load_model(&self.config)?;
        let mut processor = UpscaleProcessor::new(self.config, upscaler);
        let job = processor.plan(input, destination.as_path());

        Ok(RunReport::Single(processor.run(&job)?))
    }
}
