//! Academic Schedule MCP Server - Main Entry Point
//!
//! This is the main entry point for the academic schedule MCP server application.
//! The actual implementation is in the `acadflow_mcp` library.

use acadflow_mcp::{AcadflowServerHandler, Config, validation};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Academic Schedule MCP Server - timetable, academic calendar and curriculum via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the saved session and completed courses
    data_dir: PathBuf,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,

    /// Reference data file replacing the built-in courses, timetable, events and curriculum
    #[arg(long)]
    reference_data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(today) = &args.today {
        config.today = Some(validation::parse_date(today).context("Invalid --today")?);
    }
    if let Some(path) = args.reference_data {
        config.reference_data = Some(path);
    }

    let handler = AcadflowServerHandler::new(&args.data_dir, &config)?;
    info!(data_dir = %args.data_dir.display(), today = %handler.today(), "starting MCP server on stdio");
    serve_stdio(handler).await?;
    Ok(())
}
