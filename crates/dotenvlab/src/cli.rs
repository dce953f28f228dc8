//! CLI command structure using clap

use clap::{Parser, Subcommand};
use dotenvlab_core::config::consts::crab;

#[derive(Parser)]
#[command(name = "dotenvlab")]
#[command(version, about = "Distribute and invoke the dotenvcrab env-schema validator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve or download the validator binary
    Install {
        /// Release version to download (defaults to this package's version)
        #[arg(long)]
        version: Option<String>,

        /// Download even if a usable binary is already present
        #[arg(short, long)]
        force: bool,
    },

    /// Validate an .env file against a schema
    Validate {
        /// Path to the .env file
        #[arg(long, default_value = crab::DEFAULT_ENV_FILE)]
        env_file: String,

        /// Path to the schema file
        #[arg(long, default_value = crab::DEFAULT_SCHEMA_FILE)]
        schema_file: String,

        /// Fail on keys not present in the schema
        #[arg(long)]
        strict: bool,

        /// Emit the validator's JSON output
        #[arg(long)]
        json: bool,
    },

    /// Run the validator with raw arguments (transparent pass-through)
    #[command(trailing_var_arg = true)]
    Exec {
        /// Arguments forwarded verbatim to dotenvcrab (after --)
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Check installation health
    Doctor {
        #[arg(long)]
        json: bool,
    },
}
