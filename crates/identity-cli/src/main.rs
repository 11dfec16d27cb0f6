mod cmd;
mod output;

use clap::{Parser, Subcommand};
use identity_core::IdentityResolver;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "identity",
    about = "Inspect the resolved assistant identity and how it was loaded",
    version,
    propagate_version = true
)]
struct Cli {
    /// Bootstrap document (default: ~/.claude/instance.jsonc)
    #[arg(long, global = true, env = "IDENTITY_BOOTSTRAP")]
    bootstrap: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log each tier as it loads
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the flattened identity
    Show,

    /// Show the degradation level and which documents loaded
    Status,

    /// List the system path table
    Paths,

    /// Print a JSONC document with its comments removed
    Strip {
        /// Document to strip
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let resolver = match cli.bootstrap {
        Some(path) => IdentityResolver::new(path),
        None => IdentityResolver::discover(),
    };

    let result = match cli.command {
        Commands::Show => cmd::show::run(&resolver, cli.json),
        Commands::Status => cmd::status::run(&resolver, cli.json),
        Commands::Paths => cmd::paths::run(&resolver, cli.json),
        Commands::Strip { file } => cmd::strip::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
