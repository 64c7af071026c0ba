//! # EMOS Decoder
//!
//! Decode EMOS E6016 weather station transmissions from captured bit rows.
//!
//! Rows are read as text from stdin or a file, one transmission per block
//! separated by blank lines, and readings are written to stdout.
//!
//! # Examples
//!
//! ```bash
//! rtl_433 -R 0 -X "$(emos-decoder --flex-spec)" | emos-decoder --format kv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use emos_decoder::capture::TransmissionReader;
use emos_decoder::config::{Config, LoggingConfig};
use emos_decoder::emos::{DecodeStats, Decoder, EMOS_E6016};
use emos_decoder::output::{JsonLinesSink, KeyValueSink, OutputSink};

/// Log file name prefix inside the configured directory
const LOG_FILE_PREFIX: &str = "emos-decoder.log";

#[derive(Parser)]
#[command(
    name = "emos-decoder",
    version,
    about = "Decode EMOS E6016 weather station transmissions"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Capture text file (overrides the configuration; default stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format: json or kv (overrides the configuration)
    #[arg(short, long)]
    format: Option<String>,

    /// Print the rtl_433 flex decoder spec for this sensor and exit
    #[arg(long)]
    flex_spec: bool,
}

/// Set up the tracing subscriber
///
/// RUST_LOG takes precedence over the configured level. The returned guard
/// must be held for the file writer to flush.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.file_dir.is_empty() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(&config.file_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Some(guard)
}

fn log_summary(stats: &DecodeStats) {
    info!(
        "Transmissions: {}, readings: {}, consensus: {}, length: {}, signature: {}, checksum: {}, sink: {}",
        stats.transmissions,
        stats.readings,
        stats.consensus_failures,
        stats.length_mismatches,
        stats.signature_mismatches,
        stats.checksum_mismatches,
        stats.sink_failures,
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.flex_spec {
        println!("{}", EMOS_E6016.flex_spec());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(input) = &cli.input {
        config.input.path = input.display().to_string();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    config.validate()?;

    let _guard = init_logging(&config.logging);
    info!("EMOS decoder v{} starting...", env!("CARGO_PKG_VERSION"));
    debug!("Front end flex spec: {}", EMOS_E6016.flex_spec());

    let source: Box<dyn AsyncBufRead + Unpin + Send> = if config.input.path.is_empty() {
        info!("Reading captures from stdin");
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        let file = tokio::fs::File::open(&config.input.path)
            .await
            .with_context(|| format!("opening {}", config.input.path))?;
        info!("Reading captures from {}", config.input.path);
        Box::new(BufReader::new(file))
    };
    let mut reader = TransmissionReader::new(source);

    let stdout = std::io::stdout();
    let mut sink: Box<dyn OutputSink> = match config.output.format.as_str() {
        "kv" => Box::new(KeyValueSink::new(stdout.lock())),
        _ => Box::new(JsonLinesSink::new(stdout.lock(), config.output.timestamps)),
    };

    let mut decoder = Decoder::new(&EMOS_E6016);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            next = reader.next_transmission() => {
                match next? {
                    Some(store) => {
                        decoder.decode_into(&store, sink.as_mut());
                    }
                    None => {
                        info!("End of input");
                        break;
                    }
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = &mut ctrl_c => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    log_summary(decoder.stats());
    Ok(())
}
