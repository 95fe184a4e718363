//! CLI definitions for runnerjob.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// runnerjob CLI.
#[derive(Parser, Debug)]
#[command(name = "runnerjob")]
#[command(about = "Inspect and manage stored job records")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/runnerjob.toml", global = true)]
    pub config: PathBuf,

    /// Job directory (overrides storage_path from the config)
    #[arg(short, long, env = "RUNNERJOB_STORE_DIR", global = true)]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Create, identify and save a new job record
    New {
        /// Owner (defaults to default_owner from the config)
        #[arg(long)]
        owner: Option<String>,

        /// Additional members
        #[arg(long = "member")]
        members: Vec<String>,

        /// Save the job as inactive
        #[arg(long)]
        inactive: bool,

        /// Creation date (defaults to now, RFC 3339)
        #[arg(long)]
        create_date: Option<String>,
    },

    /// List stored jobs
    List {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show a stored job as JSON
    Show {
        /// Job ID
        id: String,
    },

    /// Delete a stored job
    Remove {
        /// Job ID
        id: String,

        /// Member requesting the removal; must own the job
        #[arg(long = "as")]
        member: Option<String>,
    },

    /// Report a member's authorization on a job
    Check {
        /// Job ID
        id: String,

        /// Member to check
        member: String,
    },

    /// List the jobs that would run now (single pass, no loop)
    Due,
}
