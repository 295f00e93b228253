//! Command execution for the DLY processor CLI.
//!
//! Wires logging, configuration, file discovery, batch processing, and the
//! summary report together.

use colored::*;
use tracing_subscriber::EnvFilter;

use crate::cli::args::Args;
use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::models::ProcessingStats;
use crate::processor::DlyProcessor;
use crate::processor::discovery::FileDiscovery;

/// Run the processor with the given arguments
pub async fn run(args: Args) -> Result<ProcessingStats> {
    init_logging(&args);
    args.validate()?;

    let mut config = ProcessorConfig::default()
        .with_year_window(args.min_year, args.max_year)
        .with_max_concurrent_files(args.effective_workers());
    if args.force {
        config = config.with_force_overwrite();
    }
    if let Some(output_dir) = &args.output {
        std::fs::create_dir_all(output_dir)?;
        config = config.with_output_dir(output_dir.clone());
    }

    let discovery = FileDiscovery::new(args.dly_dir.clone());
    let files = if args.regex {
        discovery.discover_matching(&args.pattern)?
    } else {
        vec![discovery.resolve_single(&args.pattern)]
    };

    if !args.quiet {
        println!(
            "{} {} DLY file(s) in {}",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold(),
            args.dly_dir.display()
        );
    }

    let processor = DlyProcessor::new(config);
    let stats = processor.process_batch(&files).await?;

    if !args.quiet {
        processor.print_summary(&stats);
    }

    Ok(stats)
}

/// Initialize tracing from the environment, falling back to CLI verbosity
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.get_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
