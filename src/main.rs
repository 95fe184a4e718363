//! runnerjob - stored job record administration
//!
//! Creates, lists, inspects and removes the `<id>.json` job records that the
//! scheduler polls.

mod cli;
mod cmd_job;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use runnerjob_core::ConfigLoader;

use crate::cli::Cli;
use crate::cmd_job::handle_job_command;

/// Initialize tracing on stderr so command output on stdout stays clean.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    let dir = match cli.store_dir {
        Some(dir) => ConfigLoader::expand_path(&dir),
        None => config.storage_path.clone(),
    };
    debug!("Using job directory {:?}", dir);

    handle_job_command(cli.command, &config, &dir)
}
