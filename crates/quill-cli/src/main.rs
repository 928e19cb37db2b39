//! Quill CLI - indentation-aware code generation templates

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod exit_codes;

use commands::RenderOptions;

#[derive(Parser)]
#[command(name = "quill")]
#[command(author = "Quill Contributors")]
#[command(version)]
#[command(about = "Indentation-aware code generation templates", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every output of a template document
    Render {
        /// Template document (YAML or JSON)
        document: PathBuf,

        /// Output directory (if not set, outputs to stdout)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Render only this output
        #[arg(short = 's', long)]
        only: Option<String>,

        #[command(flatten)]
        options: RenderOptions,
    },

    /// Compare rendered outputs against golden files
    Check {
        /// Template document (YAML or JSON)
        document: PathBuf,

        /// Directory holding one expected file per output
        golden_dir: PathBuf,

        #[command(flatten)]
        options: RenderOptions,
    },

    /// Show the templates and outputs of a document
    Inspect {
        /// Template document (YAML or JSON)
        document: PathBuf,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Render {
            document,
            output_dir,
            only,
            options,
        } => commands::render::run(&document, &options, output_dir.as_deref(), only.as_deref()),

        Commands::Check {
            document,
            golden_dir,
            options,
        } => commands::check::run(&document, &golden_dir, &options),

        Commands::Inspect { document } => commands::inspect::run(&document),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
