use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use upres::{resolve_input_path, Cli, ModelId, OnnxUpscaler, Outcome, RunReport, Runner};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let input = resolve_input_path(&cli.input);
    log::debug!("Resolved input {} to {}", cli.input, input.display());

    // A directory output gets the same `~` handling as the input.
    let output = match &cli.output {
        Some(path) if input.is_dir() => Some(resolve_input_path(&path.to_string_lossy())),
        other => other.clone(),
    };

    let report = Runner::new(cli.to_config())
        .run(&input, output.as_deref(), |config| {
            let model_id = ModelId::parse(&config.model)?;
            OnnxUpscaler::load(model_id, config.scale, &config.model_dir)
        })
        .with_context(|| format!("Failed to upscale {}", input.display()))?;

    match report {
        RunReport::Single(Outcome::Upscaled { destination }) => {
            println!("Saved upscaled image to: {}", destination.display())
        }
        RunReport::Single(Outcome::Skipped(reason)) => println!("{}", reason),
        RunReport::Batch { stats, output_dir } => println!(
            "Batch complete: {} upscaled, {} skipped, {} failed (output: {})",
            stats.processed_count,
            stats.skipped_count,
            stats.failed_count(),
            output_dir.display()
        ),
    }

    Ok(())
}
