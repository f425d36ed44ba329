use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use posts_cli::{default_config_path, execute, logging, Args, TerminalRenderer, UreqTransport};
use posts_core::{FailureLog, FileConfigStore, PostsClient};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let config_path = args
        .config
        .or_else(default_config_path)
        .context("no config directory on this platform; pass --config <PATH>")?;
    debug!(path = ?config_path, "using config file");

    let client = PostsClient::new(
        UreqTransport::new(),
        TerminalRenderer::stdout(),
        FileConfigStore::new(config_path),
    )
    .with_reporter(FailureLog::new());

    let ok = execute(&client, args.base_url, args.command).await;
    if ok || !args.strict {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
