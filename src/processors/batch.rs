use crate::core::{Outcome, ProcessingStats, UpscaleProcessor};
use crate::processors::Upscaler;
use crate::utils::output_path_in;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Drives an [`UpscaleProcessor`] over a list of candidates, one file at a time.
pub struct BatchProcessor<'a, U: Upscaler> {
    processor: &'a mut UpscaleProcessor<U>,
    show_progress: bool,
}

impl<'a, U: Upscaler> BatchProcessor<'a, U> {
    pub fn new(processor: &'a mut UpscaleProcessor<U>) -> Self {
        Self {
            processor,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn process_directory(
        &mut self,
        candidates: &[PathBuf],
        output_dir: &Path,
    ) -> ProcessingStats {
        log::info!(
            "Processing {} image(s) into {}",
            candidates.len(),
            output_dir.display()
        );

        let pb = self.create_progress_bar(candidates.len());
        let mut stats = ProcessingStats::default();
        let suffix = self.processor.config().suffix.clone();

        for source in candidates {
            let destination = output_path_in(output_dir, source, &suffix);
            let job = self.processor.plan(source.as_path(), destination.as_path());

            match self.processor.run(&job) {
                Ok(outcome) => {
                    stats.record(&outcome);
                    let notice = match &outcome {
                        Outcome::Upscaled { destination } => {
                            format!("Saved upscaled: {}", destination.display())
                        }
                        Outcome::Skipped(reason) => reason.to_string(),
                    };
                    pb.suspend(|| println!("{}", notice));
                }
                Err(e) => {
                    log::warn!("Failed to upscale {}: {}", source.display(), e);
                    pb.suspend(|| println!("Error processing {}: {}", source.display(), e));
                    stats.errors.push((source.clone(), e.to_string()));
                }
            }

            pb.inc(1);
        }

        pb.finish_and_clear();

        stats
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
