use std::path::PathBuf;

use serde::Deserialize;

/// Optional user configuration, read from
/// `<config dir>/ferrite/config.toml`. Every field has a default, so a
/// missing file is not an error; a malformed one is reported and
/// ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Block image used when `--block` is not given.
    pub block: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        let Some(dir) = dirs::config_dir() else {
            return Self::default();
        };
        let path = dir.join("ferrite").join("config.toml");
        let Ok(text) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ferrite: warning: {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
