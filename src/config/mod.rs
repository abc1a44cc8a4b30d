use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::format::{Item, StrftimeItems};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    bank::{CheckingLimits, StatementFormat},
    errors::ConfigError,
    utils::{app_data_dir, ensure_dir},
};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Settings applied to newly opened accounts and to statement rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub withdrawal_limit: Decimal,
    pub max_withdrawals: u32,
    pub timestamp_format: String,
}

impl Default for Config {
    fn default() -> Self {
        let limits = CheckingLimits::default();
        Self {
            currency_symbol: "R$".into(),
            withdrawal_limit: limits.per_withdrawal,
            max_withdrawals: limits.max_withdrawals,
            timestamp_format: "%d-%m-%Y %H:%M:%S".into(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = [
        "currency_symbol",
        "withdrawal_limit",
        "max_withdrawals",
        "timestamp_format",
    ];

    pub fn checking_limits(&self) -> CheckingLimits {
        CheckingLimits {
            per_withdrawal: self.withdrawal_limit,
            max_withdrawals: self.max_withdrawals,
        }
    }

    pub fn statement_format(&self) -> StatementFormat<'_> {
        StatementFormat {
            currency_symbol: &self.currency_symbol,
            timestamp_format: &self.timestamp_format,
        }
    }

    /// Updates a single setting from its textual form. The configuration is
    /// left unchanged when the new value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let mut updated = self.clone();
        match key {
            "currency_symbol" => updated.currency_symbol = value.to_string(),
            "withdrawal_limit" => {
                updated.withdrawal_limit = value.parse().map_err(|_| {
                    ConfigError::Invalid(format!("`{}` is not a valid amount", value))
                })?;
            }
            "max_withdrawals" => {
                updated.max_withdrawals = value.parse().map_err(|_| {
                    ConfigError::Invalid(format!("`{}` is not a valid count", value))
                })?;
            }
            "timestamp_format" => updated.timestamp_format = value.to_string(),
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown setting `{}` (expected one of: {})",
                    other,
                    Self::KEYS.join(", ")
                )))
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Checks every setting, whether it came from `set` or from disk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("currency symbol cannot be empty".into()));
        }
        if self.withdrawal_limit <= Decimal::ZERO {
            return Err(ConfigError::Invalid(
                "withdrawal limit must be positive".into(),
            ));
        }
        if self.max_withdrawals == 0 {
            return Err(ConfigError::Invalid(
                "max withdrawals must be at least 1".into(),
            ));
        }
        if !is_valid_timestamp_format(&self.timestamp_format) {
            return Err(ConfigError::Invalid(format!(
                "`{}` is not a valid timestamp format",
                self.timestamp_format
            )));
        }
        Ok(())
    }
}

fn is_valid_timestamp_format(format: &str) -> bool {
    !format.trim().is_empty()
        && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
