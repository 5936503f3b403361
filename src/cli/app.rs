//! Main app runner for capture mode

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::ports::{ConfigStore, WavSink};
use crate::application::{CaptureCallbacks, CaptureInput, CaptureRecordingUseCase};
use crate::domain::config::AppConfig;
use crate::infrastructure::{CpalSource, FileSink, HttpUploadSink, StdoutSink, XdgConfigStore};

use super::args::{CaptureOptions, OutputTarget};
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the diagnostics subscriber; logs go to stderr, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Build the sink for an output target
fn build_sink(target: &OutputTarget) -> Box<dyn WavSink> {
    match target {
        OutputTarget::File(path) => Box::new(FileSink::new(path.clone())),
        OutputTarget::Upload { url, session_id } => {
            let sink = HttpUploadSink::new(url.clone());
            match session_id {
                Some(id) => Box::new(sink.with_session_id(id.clone())),
                None => Box::new(sink),
            }
        }
        OutputTarget::Stdout => Box::new(StdoutSink::new()),
    }
}

/// Run one capture and deliver it to the configured target
pub async fn run_capture(options: CaptureOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let source = match CpalSource::open(options.buffer_len) {
        Ok(source) => source,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let sink = build_sink(&options.target);
    let mut use_case = CaptureRecordingUseCase::new(source, sink);

    // Ctrl+C stops early; whatever was captured is still exported
    ShutdownSignal::with_flag(use_case.stop_flag()).setup();

    let spinner = presenter.start_spinner("Opening microphone...");

    let callbacks = CaptureCallbacks {
        on_progress: Some(Arc::new({
            let spinner = spinner.clone();
            move |elapsed: u64, total: u64| {
                spinner.set_message(format!(
                    "Recording {}  (Ctrl+C to stop)",
                    Presenter::format_progress(elapsed, total)
                ));
            }
        })),
        on_recording_start: Some(Box::new({
            let spinner = spinner.clone();
            move |sample_rate: u32| {
                spinner.set_message(format!("Recording at {} Hz...", sample_rate));
            }
        })),
        on_recording_end: Some(Box::new({
            let spinner = spinner.clone();
            move |size: &str| {
                spinner.set_message(format!("Recording complete ({})", size));
            }
        })),
        on_delivery_start: Some(Box::new({
            let spinner = spinner.clone();
            let target = options.target.clone();
            move || {
                let message = match &target {
                    OutputTarget::File(path) => format!("Writing {}...", path.display()),
                    OutputTarget::Upload { url, .. } => format!("Uploading to {}...", url),
                    OutputTarget::Stdout => "Writing to stdout...".to_string(),
                };
                spinner.set_message(message);
            }
        })),
    };

    let input = CaptureInput {
        duration: options.duration,
        content_type: options.content_type,
    };

    match use_case.execute(input, callbacks).await {
        Ok(output) => {
            let Some(receipt) = output.receipt else {
                presenter.stop_spinner();
                presenter.warn("No audio captured; nothing was written");
                return ExitCode::from(EXIT_SUCCESS);
            };

            let status = if output.stopped_early {
                "Recording stopped early"
            } else {
                "Recording complete"
            };
            presenter.spinner_success(&format!(
                "{} ({}, {} samples at {} Hz)",
                status, output.size, output.total_samples, output.sample_rate
            ));

            match options.target {
                OutputTarget::File(_) => presenter.success(&format!("Saved to {}", receipt)),
                OutputTarget::Upload { .. } => {
                    presenter.success("Upload accepted");
                    presenter.output(&receipt);
                }
                OutputTarget::Stdout => {}
            }

            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail("Capture failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, path = %store.path().display(), "ignoring config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}
