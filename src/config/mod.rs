mod mailtray;
mod palette;

use std::env;
use std::path::PathBuf;

pub use mailtray::Config;
pub use palette::Palette;

const CONFIG_ENV: &str = "MAILTRAY_CONFIG";

fn default_config_file() -> Option<PathBuf> {
    if let Some(file) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(file));
    }
    let mut config_dir = if let Some(config_home) = env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config_home)
    } else {
        let mut config_home = PathBuf::from(env::var_os("HOME")?);
        config_home.push(".config");
        config_home
    };
    config_dir.push(env!("CARGO_PKG_NAME"));
    config_dir.push("config.toml");

    Some(config_dir)
}
