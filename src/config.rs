//! Runtime configuration read from environment variables
//!
//!   EMI_PREFS_PATH       preference file (default: emi_prefs.json)
//!   EMI_SYSTEM_THEME     "dark" or "light", used when no preference is stored
//!   EMI_CURRENCY_SYMBOL  prefix for displayed amounts (default: ₹)

use std::path::PathBuf;

use crate::preferences::ThemeMode;

pub const DEFAULT_PREFS_PATH: &str = "emi_prefs.json";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub prefs_path: PathBuf,
    pub system_theme: ThemeMode,
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
            system_theme: ThemeMode::Light,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("EMI_PREFS_PATH").filter(|p| !p.is_empty()) {
            config.prefs_path = PathBuf::from(path);
        }

        if let Some(theme) = lookup("EMI_SYSTEM_THEME") {
            match ThemeMode::parse(theme.trim()) {
                Some(mode) => config.system_theme = mode,
                None => log::warn!("EMI_SYSTEM_THEME={:?} not recognised, using light", theme),
            }
        }

        if let Some(symbol) = lookup("EMI_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }
}
