//! qshape CLI
//!
//! Compiles query shape documents into SELECT statement ASTs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use qshape_cli::{compile_document, read_input, write_output};

/// Compile ordering, paging, filters and search into a SELECT AST.
#[derive(Parser)]
#[command(name = "qshape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, env = "QSHAPE_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query document and print the extended AST.
    Compile {
        /// Query document (JSON); stdin if omitted or `-`.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file; stdout if omitted or `-`.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the AST
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Compile {
            input,
            output,
            pretty,
        } => {
            debug!(?input, ?output, pretty, "compile command");
            let document = read_input(input.as_deref())?;
            let compiled = compile_document(&document, pretty)?;
            write_output(output.as_deref(), &compiled)?;
        }
    }

    Ok(())
}
