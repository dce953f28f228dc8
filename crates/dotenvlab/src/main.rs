mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install { version, force } => {
            commands::install::run(version, force, cli.verbose)
        }
        Commands::Validate {
            env_file,
            schema_file,
            strict,
            json,
        } => commands::validate::run(env_file, schema_file, strict, json),
        Commands::Exec { args } => commands::exec::run(args),
        Commands::Doctor { json } => commands::doctor::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
