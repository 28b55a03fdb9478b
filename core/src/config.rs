use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DATA_DIR_ENV: &str = "MILLBOARD_DATA_DIR";
const DEFAULT_DIR_NAME: &str = ".millboard";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Reads `MILLBOARD_DATA_DIR`, falling back to `~/.millboard`.
    pub fn from_env() -> Result<Self> {
        match env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Ok(Self::new(PathBuf::from(dir))),
            _ => Ok(Self::new(default_data_dir()?)),
        }
    }

    /// A command-line override wins over the environment.
    pub fn with_override(self, data_dir: Option<PathBuf>) -> Self {
        match data_dir {
            Some(dir) => Self::new(dir),
            None => self,
        }
    }
}

pub(crate) fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::Persistence("could not determine home directory".to_string()))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}
