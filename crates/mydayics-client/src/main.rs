//! mydayics CLI entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mydayics_client::cli::{Cli, Command, ConfigAction};
use mydayics_client::commands::{self, FetchPlan};
use mydayics_client::config::ClientConfig;
use mydayics_client::error::{ClientError, ClientResult};
use mydayics_client::status::ExportStatus;
use mydayics_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli_quiet()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = if cli.config.is_some() {
        ClientConfig::load_from(&config_path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };

    match cli.command {
        Some(Command::Config { ref action }) => {
            match action {
                ConfigAction::Dump => commands::config::dump(&config, &config_path)?,
                ConfigAction::Validate => commands::config::validate(&config)?,
                ConfigAction::Path => commands::config::path(&config_path)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Preview { max_subject_length }) => {
            let plan = FetchPlan::resolve(&cli, &config)?;
            let status = commands::preview::run(
                plan.source()?,
                plan.request(),
                plan.poll_interval,
                max_subject_length,
                &mut io::stdout().lock(),
            )
            .await?;
            Ok(report(&status, None))
        }
        Some(Command::Export { ref output }) => export(&cli, &config, output.clone()).await,
        None => export(&cli, &config, None).await,
    }
}

async fn export(
    cli: &Cli,
    config: &ClientConfig,
    output: Option<PathBuf>,
) -> ClientResult<ExitCode> {
    let plan = FetchPlan::resolve(cli, config)?;
    let output = output.unwrap_or_else(|| config.export.output.clone());
    let status =
        commands::export::run(plan.source()?, plan.request(), plan.poll_interval, &output)
            .await?;
    Ok(report(&status, Some(&output)))
}

fn report(status: &ExportStatus, output: Option<&PathBuf>) -> ExitCode {
    match (status, output) {
        (ExportStatus::Success(_), Some(path)) => {
            println!("Saved {} to {}", status, path.display());
        }
        (ExportStatus::Success(_), None) => println!("{}", status),
        (ExportStatus::EmptyResult, _) => println!("{}", status),
        _ => eprintln!("{}", status),
    }
    status.exit_code()
}
