//! MotorMart inbox service.
//!
//! Rebuilds buyer/dealer inquiry threads for the dealer and admin dashboards.
//! Runs as an HTTP service (`serve`) or as one-shot commands over exported
//! inquiry JSON (`thread`, `views`).

mod api;
mod commands;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use motormart_common::views::DecayViewDistribution;
use motormart_common::ThreadConfig;

#[derive(Parser)]
#[command(name = "motormart-inbox", about = "MotorMart inquiry thread service")]
struct Cli {
    /// Zone the separator timestamps were written in, minutes east of UTC.
    #[arg(
        long,
        global = true,
        env = "MOTORMART_SEPARATOR_OFFSET_MINUTES",
        default_value_t = 0,
        allow_hyphen_values = true
    )]
    separator_offset_minutes: i32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API.
    Serve {
        #[arg(long, env = "MOTORMART_BIND", default_value = "0.0.0.0")]
        bind: String,

        #[arg(long, env = "MOTORMART_PORT", default_value_t = 3020)]
        port: u16,
    },
    /// Print the rebuilt thread for an inquiry JSON file (`-` for stdin).
    Thread {
        #[arg(long)]
        file: PathBuf,
    },
    /// Print the estimated daily view counts for a listing.
    Views {
        #[arg(long)]
        listing: String,

        #[arg(long)]
        total: u64,

        #[arg(long, default_value_t = 30)]
        days: u32,

        /// Last day of the window (YYYY-MM-DD). Defaults to today, UTC.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

async fn serve(config: ThreadConfig, bind: &str, port: u16) -> Result<()> {
    let state = Arc::new(server::AppState {
        config,
        views: Box::new(DecayViewDistribution::default()),
    });
    let app = server::router(state);

    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("motormart-inbox listening on {addr}");

    axum::serve(listener, app).await.context("server failed")
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ThreadConfig::with_offset_minutes(cli.separator_offset_minutes);

    match cli.command {
        Command::Serve { bind, port } => serve(config, &bind, port).await,
        Command::Thread { file } => {
            println!("{}", commands::thread(&file, &config)?);
            Ok(())
        }
        Command::Views {
            listing,
            total,
            days,
            today,
        } => {
            println!("{}", commands::views(listing, total, days, today)?);
            Ok(())
        }
    }
}
