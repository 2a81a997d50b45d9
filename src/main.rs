//! riskmeta CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use riskmeta::indexing::expand_paths;
use riskmeta::{
    encode_toon_batch, format_batch_report, Analyzer, AnalyzerConfig, AnalyzerError, BatchReport,
    Cli, OutputFormat,
};

/// Exit code when some files could not be analyzed
const PARTIAL_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok((output, batch)) => {
            println!("{}", output);
            if batch.failures.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(PARTIAL_FAILURE)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn init_tracing(cli: &Cli) {
    // RUST_LOG wins over -v
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> riskmeta::Result<(String, BatchReport)> {
    // 1. Configuration: file first, then CLI overrides
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    }
    .with_overrides(cli.jobs, cli.max_depth);
    debug!(?config, "loaded configuration");

    // 2. Expand directories into Java files
    let paths = expand_paths(&cli.paths, config.max_depth);
    info!(files = paths.len(), "collected source files");

    // 3. Analyze
    let analyzer = Analyzer::from_config(&config);
    let batch = analyzer.analyze_batch(&paths, &cli.repo_url, &cli.branch);

    // 4. Render
    let output = match cli.format {
        OutputFormat::Text => format_batch_report(&batch),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&batch.results).map_err(|e| {
                AnalyzerError::Serialization {
                    message: e.to_string(),
                }
            })?
        }
        OutputFormat::Toon => encode_toon_batch(&batch),
    };

    Ok((output, batch))
}
