use std::{
    fs::read_to_string,
    io,
    path::{Path, PathBuf},
};

use derive_getters::Getters;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{Palette, default_config_file};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings fixed for the lifetime of the process.
#[derive(Debug, Deserialize, Getters, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Raise a desktop notification when new mail arrives.
    notify: bool,
    /// Keep the icon visible when no unseen mail is left.
    show_read_icon: bool,
    reset_menu: bool,
    quit_menu: bool,
    /// Log every raw payload received from the mail client.
    log_payloads: bool,
    #[getter(skip)]
    logging: LevelFilter,
    #[getter(skip)]
    log_file: Option<PathBuf>,
    #[getter(skip)]
    colors: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notify: false,
            show_read_icon: false,
            reset_menu: true,
            quit_menu: false,
            log_payloads: false,
            logging: LevelFilter::Off,
            log_file: None,
            colors: Palette::default(),
        }
    }
}

impl Config {
    /// Loads the config file from `$MAILTRAY_CONFIG` or the XDG config directory.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match default_config_file() {
            Some(file) => Self::load_from_file(&file),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(file: &Path) -> Result<Self, ConfigError> {
        let contents = match read_to_string(file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: file.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: file.to_path_buf(),
            source,
        })
    }

    pub fn logging(&self) -> LevelFilter {
        self.logging
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn colors(&self) -> &Palette {
        &self.colors
    }
}
