use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use ram_vad::{Level, SegmentRunner};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ram")]
#[command(version, about = "generate repeat-after-me audios for language learning")]
struct Cli {
    /// Input audio file (WAV)
    audio: PathBuf,

    /// Where to write the generated audio
    #[arg(short, long, default_value = "out.wav")]
    output_audio: PathBuf,

    /// Difficulty level
    #[arg(short, long, value_enum, default_value_t = Level::Easy)]
    level: Level,

    /// Silero VAD ONNX model; when the file is missing the model is fetched
    /// into ONNX Runtime's cache instead and this path is left untouched
    #[arg(short, long, default_value = "models/silero_vad.onnx")]
    model: PathBuf,

    /// Also write the detected segments as JSON
    #[arg(long)]
    segments: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut runner = SegmentRunner::from_model_path(&cli.model)
        .with_context(|| format!("Failed to load model {}", cli.model.display()))?;

    let report = runner
        .run(&cli.audio, &cli.output_audio, cli.level)
        .with_context(|| format!("Failed to process {}", cli.audio.display()))?;

    info!(
        "{} segments, {:.2}s of audio generated",
        report.segments.len(),
        report.output_samples as f64 / report.sample_rate as f64
    );

    if let Some(path) = &cli.segments {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write segments to {}", path.display()))?;
        info!("segments written to {}.", path.display());
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
