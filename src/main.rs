// Copyright 2026 Imagescout Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use imagescout::cli::{output, search_cmd};

#[derive(Parser)]
#[command(
    name = "imagescout",
    about = "Imagescout — polite, filtered image collection from Unsplash search",
    version,
    after_help = "Run 'imagescout <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for images and collect matching records
    Search(search_cmd::SearchArgs),
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let directive = if verbose {
        "imagescout=debug"
    } else {
        "imagescout=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    output::init(cli.json, cli.quiet);
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Search(args) => search_cmd::run(args).await,
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "imagescout",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
