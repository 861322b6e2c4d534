use std::env;
use std::path::PathBuf;

use crate::{nbu, privatbank};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub nbu_base_url: String,
    pub privatbank_base_url: String,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nbu_base_url: nbu::DEFAULT_BASE_URL.to_string(),
            privatbank_base_url: privatbank::DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Defaults, overridden by `.env` and then by the process environment.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env loaded: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            nbu_base_url: lookup("NBU_BASE_URL").unwrap_or(defaults.nbu_base_url),
            privatbank_base_url: lookup("PRIVATBANK_BASE_URL")
                .unwrap_or(defaults.privatbank_base_url),
            output_dir: lookup("RATES_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }
}
