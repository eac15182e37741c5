//! Shelfcheck CLI - data-quality review for retail uploads.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            file,
            output,
            dataset_type,
            no_normalize,
            config,
        } => commands::check::run(file, output, dataset_type, no_normalize, config),

        Commands::Decide {
            file,
            accept,
            reject,
            modify,
            value,
            tier,
            undo,
            user,
            notes,
        } => commands::decide::run(commands::decide::DecideArgs {
            file,
            accept,
            reject,
            modify: modify.zip(value),
            tier,
            undo,
            user,
            notes,
        }),

        Commands::Status { file, json } => commands::status::run(file, json),

        Commands::Diff { file } => commands::diff::run(file),

        Commands::Apply {
            file,
            output,
            format,
        } => commands::apply::run(file, output, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
