mod journal;

use std::{
    fs::OpenOptions,
    io::{self, Write as _},
};

use anstyle::{AnsiColor, Effects};
use env_logger::{Builder, Env, Target, fmt::Formatter};
use journal::connected_to_journal;
use log::{Level, Record};

use crate::config::Config;

/// Installs the global logger.
///
/// stdout carries the native messaging protocol, so records go to stderr or
/// are appended to the configured log file. With logging set to `off` and no
/// `RUST_LOG` override every record is discarded.
pub fn init(config: &Config) -> io::Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(config.logging());
    builder.parse_env(Env::default());

    if let Some(log_file) = config.log_file() {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        builder.target(Target::Pipe(Box::new(file)));
        builder.format(plain_format);
    } else if connected_to_journal() {
        builder.format(journal_format);
    } else {
        builder.format(styled_format);
    }
    builder.init();
    Ok(())
}

fn journal_format(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    writeln!(
        buf,
        "<{}>{}: {}",
        match record.level() {
            Level::Error => 3,
            Level::Warn => 4,
            Level::Info => 6,
            Level::Debug | Level::Trace => 7,
        },
        record.target(),
        record.args()
    )
}

fn plain_format(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    write!(
        buf,
        "[{:.3} {:5} {}",
        jiff::Timestamp::now(),
        record.level(),
        record.target()
    )?;
    if let Some(line) = record.line() {
        write!(buf, ":{line}")?;
    }
    writeln!(buf, "] {}", record.args())
}

fn styled_format(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let subtle = AnsiColor::BrightBlack.on_default();
    let level_style = match record.level() {
        Level::Error => AnsiColor::Red.on_default().effects(Effects::BOLD),
        Level::Warn => AnsiColor::Yellow.on_default(),
        Level::Info => AnsiColor::Green.on_default(),
        Level::Debug => AnsiColor::Blue.on_default(),
        Level::Trace => AnsiColor::Cyan.on_default(),
    };
    write!(
        buf,
        "{subtle}[{subtle:#}{:.3} {level_style}{}{level_style:#} {}",
        jiff::Timestamp::now(),
        record.level(),
        record.target(),
    )?;
    if let Some(line) = record.line() {
        write!(buf, ":{line}")?;
    }
    write!(buf, "{subtle}]{subtle:#} ")?;
    writeln!(buf, "{}", record.args())
}
