#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod cli;
mod commands;
mod error_fmt;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use commands::Context;
use eyre::{Result, WrapErr};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    match run(cli) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", error_fmt::format_error_json(&e));
            } else {
                eprintln!("{}", error_fmt::humanize(&e));
            }
            std::process::exit(error_fmt::exit_code_for_error(&e));
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let cfg = match &cli.config {
        Some(path) => {
            let cfg = leaven_config::load_toml_file(path)?;
            cfg.validate().wrap_err("invalid configuration")?;
            cfg
        }
        None => leaven_config::Config::default(),
    };

    init_tracing(cli.json, cli.log_level.as_deref(), &cfg.logging)?;
    tracing::debug!(config = ?cli.config, calibration = ?cli.calibration, "starting");

    let ctx = Context::from_config(&cfg, cli.calibration.as_deref(), cli.json)?;
    match cli.cmd {
        Commands::Estimate {
            temperature,
            unit,
            starter,
            rise,
            start,
        } => commands::run_estimate(&ctx, temperature, unit, starter, rise, start),
        Commands::Convert { value, from } => Ok(commands::run_convert(&ctx, value, from)),
        Commands::Table { rise } => Ok(commands::run_table(&ctx, rise)),
    }
}

/// Console logs go to stderr so stdout stays machine-readable. `RUST_LOG`
/// overrides `--log-level`, which overrides `[logging] level`.
fn init_tracing(
    json: bool,
    cli_level: Option<&str>,
    logging: &leaven_config::Logging,
) -> Result<()> {
    let level = cli_level
        .or(logging.level.as_deref())
        .unwrap_or("warn")
        .to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let (json_layer, text_layer) = if json {
        (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
            None,
        )
    } else {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            ),
        )
    };

    let file_layer = match &logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let Some(name) = path.file_name() else {
                eyre::bail!("logging.file {file:?} has no file name");
            };
            let rotation = match logging.rotation.as_deref().map(str::to_ascii_lowercase) {
                Some(r) if r == "daily" => tracing_appender::rolling::Rotation::DAILY,
                Some(r) if r == "hourly" => tracing_appender::rolling::Rotation::HOURLY,
                _ => tracing_appender::rolling::Rotation::NEVER,
            };
            let appender = tracing_appender::rolling::RollingFileAppender::builder()
                .rotation(rotation)
                .filename_prefix(name.to_string_lossy())
                .build(dir)
                .wrap_err_with(|| format!("open log file {file:?}"))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(())
}
