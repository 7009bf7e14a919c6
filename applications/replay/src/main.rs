/// Cadence Replay - run recorded playback commands
use anyhow::Context;
use cadence_playback::PlaybackRegistry;
use cadence_replay::{read_commands, replay, write_results, ReplayConfig};
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence-replay")]
#[command(about = "Replay recorded playback commands and report the results", long_about = None)]
struct Cli {
    /// JSON file holding an array of command records
    input: PathBuf,

    /// Where to write the results (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_playback=info,cadence_replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ReplayConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    let input = File::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    let commands = read_commands(BufReader::new(input))
        .with_context(|| format!("Failed to parse {}", cli.input.display()))?;
    tracing::info!(commands = commands.len(), "Replaying {}", cli.input.display());

    let mut registry = PlaybackRegistry::new(config.playback.clone());
    let outputs = replay(&mut registry, commands);

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_results(&mut writer, &outputs, config.output.pretty)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_results(&mut writer, &outputs, config.output.pretty)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}
