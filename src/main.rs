use clap::Parser;
use dly_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(stats) => {
            // A failing file never aborts the batch, but it must show in the
            // exit code
            process::exit(if stats.files_failed > 0 { 1 } else { 0 });
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
