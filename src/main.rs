use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    apostila_extractor::logging::init().context("init logging")?;

    let cli = apostila_extractor::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        apostila_extractor::cli::Command::Extract(args) => {
            apostila_extractor::extract::run(args).await.context("extract")?;
        }
        apostila_extractor::cli::Command::Predict(args) => {
            apostila_extractor::week::run(args).context("predict")?;
        }
    }

    Ok(())
}
