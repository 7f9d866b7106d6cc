use std::path::PathBuf;

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::{common::error::AppError, domain::credit::SettlementPolicy};

/// Runtime settings, read from `credit-ledger.toml` (optional) and then
/// `LEDGER_*` environment variables, e.g. `LEDGER_SETTLEMENT=partial`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Shop name stamped on every persisted payment record.
    #[serde(default = "default_shop")]
    pub shop: String,
    #[serde(default)]
    pub settlement: SettlementPolicy,
    /// Append accepted payments to this CSV file. Kept in memory when unset.
    #[serde(default)]
    pub payments_out: Option<PathBuf>,
    #[serde(default)]
    pub transactions_out: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_shop() -> String {
    "main".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shop: default_shop(),
            settlement: SettlementPolicy::default(),
            payments_out: None,
            transactions_out: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("credit-ledger").required(false))
                .add_source(Environment::with_prefix("LEDGER")),
        )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        Ok(builder.build()?.try_deserialize()?)
    }
}
