mod cli;
mod config;
mod event_loop;
mod logging;
mod notification;
mod protocol;
mod repository;
mod shutdown;
mod tracker;
mod tray;

use std::{env, ffi::OsString, path::PathBuf, process};

use anyhow::{Context as _, Result};
use clap::{Parser, error::ErrorKind};
use config::Config;
use log::error;
use thiserror::Error;

/// Tray icon companion for the mail client, started through native messaging.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path of the native messaging manifest that registered this program
    manifest: PathBuf,

    /// Id of the extension that started this program
    extension_id: String,
}

#[derive(Error, Debug)]
enum UsageError {
    /// `--help` or `--version`, printed by clap itself.
    #[error("{0}")]
    Informational(clap::Error),
    #[error("{} requires two command line parameters", env!("CARGO_PKG_NAME"))]
    WrongArguments(ErrorKind),
}

fn parse_args<I, T>(args: I) -> Result<Args, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => UsageError::Informational(e),
        kind => UsageError::WrongArguments(kind),
    })
}

fn main() -> Result<()> {
    let args = match parse_args(env::args_os()) {
        Err(UsageError::Informational(e)) => e.exit(),
        Err(e) => {
            // stdout is the only channel the mail client shows to the user
            println!("{e}");
            Err(e)
        }
        Ok(args) => Ok(args),
    };

    let config = Config::load().context("config should be loadable")?;
    logging::init(&config).context("log file should be writable")?;

    let args = match args {
        Ok(args) => args,
        Err(e) => {
            error!("requires a manifest path and an extension id: {e:?}");
            process::exit(1);
        }
    };

    cli::run(&args, &config)
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::no_arguments(vec!["mailtray"])]
    #[case::manifest_only(vec!["mailtray", "/tmp/mailtray.json"])]
    #[case::extra_argument(vec!["mailtray", "/tmp/mailtray.json", "tray@example.org", "extra"])]
    fn test_args_require_exactly_two_parameters(#[case] args: Vec<&str>) {
        let e = assert_err!(parse_args(args));
        assert!(matches!(e, UsageError::WrongArguments(_)));
        assert_eq!("mailtray requires two command line parameters", e.to_string());
    }

    #[rstest]
    fn test_args_accept_manifest_and_extension_id() {
        let args = assert_ok!(parse_args(["mailtray", "/tmp/mailtray.json", "tray@example.org"]));
        assert_eq!(PathBuf::from("/tmp/mailtray.json"), args.manifest);
        assert_eq!("tray@example.org", args.extension_id);
    }

    #[rstest]
    #[case("--help", ErrorKind::DisplayHelp)]
    #[case("--version", ErrorKind::DisplayVersion)]
    fn test_args_leave_help_and_version_to_clap(#[case] flag: &str, #[case] expected: ErrorKind) {
        let UsageError::Informational(e) = assert_err!(parse_args(["mailtray", flag])) else {
            panic!("expected clap to handle {flag}");
        };
        assert_eq!(expected, e.kind());
    }
}
