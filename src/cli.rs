use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line front end for the dental clinic analysis service.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Config file; defaults to `CONFIG_PATH` or `config.yaml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Override the API base URL from the config.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in and store the session token.
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Show past analyses.
    History,
    /// Upload an image for analysis.
    Predict { file: PathBuf },
    /// Drop files on the upload area; only the first is analysed.
    Drop { files: Vec<PathBuf> },
    /// Capture a frame from a still-image camera source and analyse it.
    Capture {
        #[arg(long)]
        source: PathBuf,
    },
}
