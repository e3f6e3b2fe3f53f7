use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Extract(ExtractArgs),
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Target date (YYYY-MM-DD); any day selects its week. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Base URL of the online library (must be http/https).
    #[arg(long)]
    pub base_url: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Target date (YYYY-MM-DD); any day selects its week. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}
