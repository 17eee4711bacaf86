use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use thiserror::Error;

/// Fallback category set when EXPENSE_CATEGORIES is not configured.
pub const DEFAULT_CATEGORIES: &[&str] = &["food", "cafe", "transport", "living", "shopping", "etc"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in .env file")]
    MissingVar(&'static str),
    #[error("invalid budget target entry: {0}")]
    InvalidTarget(String),
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Application configuration, loaded once at startup. The participant set,
/// their monthly targets, and the timezone that defines "this month" all
/// live here rather than in the database.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub timezone: Tz,
    pub targets: BTreeMap<String, Decimal>,
    pub categories: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_targets =
            env::var("BUDGET_TARGETS").map_err(|_| ConfigError::MissingVar("BUDGET_TARGETS"))?;
        let targets = parse_targets(&raw_targets)?;

        let timezone = match env::var("APP_TIMEZONE") {
            Ok(raw) => {
                Tz::from_str(raw.trim()).map_err(|_| ConfigError::UnknownTimezone(raw))?
            }
            Err(_) => Tz::UTC,
        };

        let categories = match env::var("EXPENSE_CATEGORIES") {
            Ok(raw) => parse_categories(&raw),
            Err(_) => DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        };

        Ok(Self {
            timezone,
            targets,
            categories,
        })
    }
}

/// Parse "Nayun=1000.00,Chaerin=800.00" into a name -> monthly target map.
pub fn parse_targets(raw: &str) -> Result<BTreeMap<String, Decimal>, ConfigError> {
    let mut targets = BTreeMap::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (name, amount) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidTarget(entry.to_string()))?;
        let name = name.trim();
        let target = Decimal::from_str(amount.trim())
            .map_err(|_| ConfigError::InvalidTarget(entry.to_string()))?;

        if name.is_empty() || target < Decimal::ZERO {
            return Err(ConfigError::InvalidTarget(entry.to_string()));
        }

        targets.insert(name.to_string(), target);
    }

    if targets.is_empty() {
        return Err(ConfigError::MissingVar("BUDGET_TARGETS"));
    }

    Ok(targets)
}

pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_string)
        .collect()
}
