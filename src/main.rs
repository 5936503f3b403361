//! wav-recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;

use wav_recorder::cli::{
    app::{init_tracing, load_merged_config, run_capture, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{CaptureOptions, Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use wav_recorder::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    init_tracing();
    let presenter = Presenter::new();

    if let Some(Commands::Config { action }) = cli.command.take() {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Merge config: defaults < file < cli
    let config = load_merged_config(cli.to_config()).await;

    let options = match CaptureOptions::from_config(&config, cli.stdout) {
        Ok(options) => options,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    run_capture(options).await
}
