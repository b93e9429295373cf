use anyhow::{Context, Result};
use clap::Parser;
use tracing::{event, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bz_core::bz_client::HypixelClient;
use bz_core::configuration::GeneratorConfiguration;
use bz_core::generator::generate_conversions;
use bz_core::reqwest_helpers::create_client;

use crate::cli_args::Cli;

mod cli_args;

#[tokio::main]
async fn main() -> Result<()> {
    let Cli { output } = Cli::parse();

    setup_tracing();

    let cfg = GeneratorConfiguration::with_output_path(output);

    let client = HypixelClient::new(create_client().context("Failed to create http client")?, &cfg);

    let report = generate_conversions(&client, &cfg.output_path)
        .await
        .context("Error during mapping creation")?;

    if !report.diagnostics.is_empty() {
        event!(Level::INFO, "{} diagnostic(s) reported, see warnings above", report.diagnostics.len());
    }

    println!("{}", report.summary());

    Ok(())
}

/// Logs go to stderr, stdout only carries the summary.
fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
