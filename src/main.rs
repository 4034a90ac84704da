use anyhow::Result;
use clap::Parser;
use viewmux::cli::{self, Cli, CliResult};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Routes log records to the debug log file; --log-level wins over
    // RUST_LOG, which wins over the config (applied once it is loaded).
    viewmux::debug::init_log_bridge(cli.log_level);

    log::info!("Starting viewmux {}", viewmux::VERSION);

    match cli::run(cli) {
        Ok(CliResult::Done) => Ok(()),
        // Nothing is left to clean up at this point.
        Ok(CliResult::Exit(code)) => std::process::exit(code),
        Err(e) => {
            eprintln!("viewmux: error: {e:#}");
            std::process::exit(1);
        }
    }
}
