use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slidesnap")]
#[command(about = "Turn YouTube videos into timestamped PDFs via a conversion service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a conversion job and follow it to completion
    Convert(ConvertArgs),
    /// Fetch the current status of a job
    Status(StatusArgs),
    /// Preview the normalized timestamp list from a JSON document
    Preview(PreviewArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// YouTube URL to convert
    #[arg(long, short = 'u')]
    pub url: String,

    /// Seconds between captures (interval mode)
    #[arg(long, short = 'i', conflicts_with_all = ["timestamps", "at"])]
    pub interval: Option<u32>,

    /// JSON file with custom timestamps (custom mode)
    #[arg(long, short = 't', conflicts_with = "at")]
    pub timestamps: Option<PathBuf>,

    /// Comma-separated timestamps, e.g. "0:30,1:45,2:10" (custom mode)
    #[arg(long)]
    pub at: Option<String>,

    /// Directory for the downloaded PDF (overrides config)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the download URL instead of fetching the artifact
    #[arg(long)]
    pub no_download: bool,
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Job identifier returned at submission
    pub job_id: String,
}

#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    /// JSON file with custom timestamps
    #[arg(long, short = 't')]
    pub timestamps: PathBuf,
}
