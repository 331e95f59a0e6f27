use std::process::ExitCode;

use anyhow::Context;
use log::{error, info};

use dynophore::{hypothesis::display::CatalogDisplayExt, Analysis, AnalysisOutcome};

mod cli;

fn run(cli: &cli::Cli) -> anyhow::Result<AnalysisOutcome> {
    let params = cli
        .analysis
        .to_params()
        .context("invalid analysis parameters")?;
    let layout = cli.layout().context("cannot resolve the input layout")?;

    let outcome = Analysis::for_layout(&layout, params)
        .run(&layout)
        .with_context(|| format!("analysis of {} failed", layout.base_dir))?;
    Ok(outcome)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::parse();
    match run(&cli) {
        Ok(outcome) => {
            if !cli.quiet {
                println!("{}", outcome.catalog.show());
            }
            for frame in &outcome.export.missing {
                info!("Best hypothesis of frame {frame} was not exported");
            }
            info!("Analysis complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
