//! Configuration management for CertChain

use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_ledger_path")]
    pub path: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = fs::read_to_string("config.toml").unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        // Provide sane defaults when config.toml is absent
        Config {
            ledger: LedgerConfig::default(),
        }
    } else {
        toml::from_str(&config_str)?
    };

    if config.ledger.path.is_empty() {
        return Err("ledger.path must be set in config.toml".into());
    }

    Ok(config)
}

fn default_ledger_path() -> String {
    "cert_chain.json".to_string()
}
