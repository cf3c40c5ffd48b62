use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod printer;
mod spinner;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();
    let cli = cli::Cli::parse();
    commands::run(cli).await
}
