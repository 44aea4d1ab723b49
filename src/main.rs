use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod collection;
mod config;
mod error;
mod pipeline;
mod preflight;
mod report;
mod runtime;
mod synth;
mod tags;
mod transcode;
mod voice;

#[cfg(test)]
mod test_support;

fn main() -> ExitCode {
    // Diagnostics only; operator-facing progress is printed by the reporter.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    runtime::run()
}
