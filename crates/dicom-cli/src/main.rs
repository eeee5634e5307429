//! `dicom-meta`: filter, drop, and extract over DICOM metadata tables.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use dicom_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use dicom_cli::commands::run;
use dicom_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod summary;

use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli.command) {
        Ok(result) => {
            print_summary(&result);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Maps the global logging flags of `dicom-meta` onto a [`LogConfig`].
///
/// `--log-level` wins over `-v`/`-q`, and either one disables `RUST_LOG`.
/// Logs go to stderr unless `--log-file` is given, in which case `--color auto`
/// writes them without ANSI codes. Tag values reach the logs only with
/// `--log-data`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        log_data: cli.log_data,
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(flags: &[&str]) -> Cli {
        let mut argv = vec!["dicom-meta", "extract", "--input", "dir", "-k", "Modality"];
        argv.extend_from_slice(flags);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_defer_to_rust_log() {
        let config = log_config_from_cli(&parse(&[]));
        assert!(config.use_env_filter);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(!config.log_data);
    }

    #[test]
    fn log_level_overrides_verbosity() {
        let config = log_config_from_cli(&parse(&["-vv", "--log-level", "error"]));
        assert!(!config.use_env_filter);
        assert_eq!(config.level_filter, LevelFilter::ERROR);
    }

    #[test]
    fn log_file_disables_ansi_on_auto() {
        let config = log_config_from_cli(&parse(&["--log-file", "run.log", "--log-data"]));
        assert!(!config.with_ansi);
        assert!(config.log_data);
        assert!(config.log_file.is_some());
    }
}
