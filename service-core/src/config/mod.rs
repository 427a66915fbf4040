use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Local overrides checked after `.env`, e.g. a frontend checkout sharing secrets.
const LOCAL_ENV_FILES: [&str; 2] = [".env.local", "../.env.local"];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        load_dotenv();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Load `.env` and the first `.env.local` found. Existing process variables win.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();

    for path in LOCAL_ENV_FILES {
        if dotenvy::from_filename(path).is_ok() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_8000() {
        assert_eq!(Config::default().port, 8000);
    }
}
