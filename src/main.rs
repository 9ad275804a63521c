use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use huffpack::cli::{report_batch, run_batch, run_inspect, Mode};
use huffpack::config::{HuffpackConfig, DEFAULT_CONFIG_FILE};
use huffpack::metrics::MetricsCollector;

#[derive(Parser)]
#[command(name = "huffpack")]
#[command(about = "Static Huffman compression for whole files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Config file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Directory for output files (overrides config)")]
    output_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress each file into <file>.huff
    Compress {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Restore each artifact into <file>.unhuff
    Decompress {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Show frequencies, tree and code dictionary for a file
    Inspect {
        path: PathBuf,
    },
    /// Round-trip each file in memory and compare checksums
    Verify {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Write a default config file
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::GenerateConfig { output } = &cli.command {
        HuffpackConfig::default().save(output)?;
        println!("✅ Wrote default config to {}", output);
        return Ok(());
    }

    let mut config = HuffpackConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.output_dir {
        config.output_directory = Some(dir);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Loaded configuration: {:?}", config);

    let (mode, paths) = match cli.command {
        Commands::Compress { paths } => (Mode::Compress, paths),
        Commands::Decompress { paths } => (Mode::Decompress, paths),
        Commands::Verify { paths } => (Mode::Verify, paths),
        Commands::Inspect { path } => return run_inspect(&path, cli.json).await,
        Commands::GenerateConfig { .. } => return Ok(()),
    };

    info!("Starting {:?} of {} file(s)", mode, paths.len());

    let metrics = Arc::new(MetricsCollector::new());
    let results = run_batch(mode, paths, Arc::new(config), Arc::clone(&metrics)).await;
    report_batch(mode, results, metrics.summary(), cli.json)
}
