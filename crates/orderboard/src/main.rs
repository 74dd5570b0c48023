use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use orderboard_core::{dataset, pipeline, RawOrder, ReportConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{apply_input_args, apply_render_args, Cli, Command, InputArgs, RenderArgs};

mod cli;
mod open;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Command::Render(args) => handle_render(args),
        Command::Summary(args) => handle_summary(args),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn handle_render(args: RenderArgs) -> Result<()> {
    let config = apply_render_args(load_config(&args.input)?, &args);

    let orders = load_orders(config.input.as_deref())?;
    let output = pipeline::run(&orders, config.locale).context("failed to build order report")?;
    print!("{}", output.console_text());

    let written = pipeline::write_artifacts(&output, &config.artifact_paths())
        .with_context(|| format!("failed to write artifacts to {}", config.out_dir.display()))?;

    println!();
    println!("Dashboard: {}", written.dashboard.display());
    println!("Report:    {}", written.report.display());
    if let Some(summary) = &written.summary {
        println!("Summary:   {}", summary.display());
    }

    if config.open {
        match open::open_in_browser(&written.dashboard) {
            Ok(()) => info!(path = %written.dashboard.display(), "Opened dashboard"),
            Err(err) => warn!("could not open dashboard in a browser: {err}"),
        }
    }

    Ok(())
}

fn handle_summary(args: InputArgs) -> Result<()> {
    let config = apply_input_args(load_config(&args)?, &args);
    let orders = load_orders(config.input.as_deref())?;
    let output = pipeline::run(&orders, config.locale).context("failed to build order report")?;
    print!("{}", output.console_text());
    Ok(())
}

fn load_config(args: &InputArgs) -> Result<ReportConfig> {
    ReportConfig::load(args.config.as_deref()).context("failed to load configuration")
}

fn load_orders(input: Option<&Path>) -> Result<Vec<RawOrder>> {
    match input {
        Some(path) => dataset::load_csv(path)
            .with_context(|| format!("failed to read orders from {}", path.display())),
        None => {
            info!("No input file given, using the built-in sample orders");
            Ok(dataset::sample_orders())
        }
    }
}
