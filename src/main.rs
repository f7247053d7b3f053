mod cli;
mod config;
mod github;
mod input;
mod message;
mod model;
mod resolve;
mod send;
mod slack;

use std::{env, process};

use clap::Parser;

use cli::Cli;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli).await {
        github::commands::error(&e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr; stdout carries workflow commands.
///
/// `HERALD_LOG` takes an `EnvFilter` directive. Without it, debug logging
/// follows the runner's `RUNNER_DEBUG` flag.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_env("HERALD_LOG").unwrap_or_else(|_| {
        let debug = env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
        EnvFilter::new(if debug { "debug" } else { "info" })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
