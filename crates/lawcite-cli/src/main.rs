//! Command-line surface over lawcite-core: annotate assistant text with
//! `law:` citation links, or excerpt retrieved law text for preview.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lawcite_core::{DEFAULT_EXCERPT_LEN, annotate, detect, excerpt};

#[derive(Parser)]
#[command(name = "lawcite")]
#[command(about = "Detect and link statutory citations in assistant text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite citations in the input as law: markdown links
    Annotate {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,

        /// Print detected mentions as JSON instead of rewritten text
        #[arg(long)]
        json: bool,
    },

    /// Print a bounded, markdown-stripped preview of the input
    Excerpt {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,

        /// Maximum preview length in characters
        #[arg(long, default_value_t = DEFAULT_EXCERPT_LEN)]
        max_len: usize,
    },
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::debug!("lawcite v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Commands::Annotate { file, json } => {
            let text = read_input(file.as_ref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&detect(&text))?);
            } else {
                println!("{}", annotate(&text));
            }
        }
        Commands::Excerpt { file, max_len } => {
            let text = read_input(file.as_ref())?;
            println!("{}", excerpt(&text, max_len));
        }
    }
    Ok(())
}
