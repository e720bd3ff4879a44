//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only once the command starts.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storefront_core::{CartLimits, Money, CART_STORAGE_KEY};
use tracing::warn;

/// Fallback data directory when no platform directory can be determined.
const FALLBACK_DATA_DIR: &str = ".storefront";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Directory holding the persisted cart.
    pub data_dir: PathBuf,

    /// Storage key for the cart.
    pub cart_key: String,

    /// Cart limits (8 unique products, 3 units each by default).
    pub limits: CartLimits,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Data dir: platform data directory
    ///   (`~/.local/share/storefront` on Linux)
    /// - Key: "cart"
    /// - Limits: 8 unique products, 3 units each
    /// - Currency: $ with 2 decimals
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            cart_key: CART_STORAGE_KEY.to_string(),
            limits: CartLimits::default(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl AppConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_DATA_DIR`: Override the data directory
    /// - `STOREFRONT_CART_KEY`: Override the storage key
    /// - `STOREFRONT_MAX_UNIQUE_ITEMS`: Override the unique-product cap
    /// - `STOREFRONT_MAX_QUANTITY`: Override the per-product cap
    /// - `STOREFRONT_CURRENCY_SYMBOL`: Override the currency symbol
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();

        if let Some(dir) = lookup("STOREFRONT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = lookup("STOREFRONT_CART_KEY") {
            config.cart_key = key;
        }

        if let Some(max) = parse_var(&lookup, "STOREFRONT_MAX_UNIQUE_ITEMS") {
            config.limits.max_unique_items = max;
        }

        if let Some(max) = parse_var(&lookup, "STOREFRONT_MAX_QUANTITY") {
            config.limits.max_quantity_per_item = max;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_cli::config::AppConfig;
    /// use storefront_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let divisor = 10_i64.pow(u32::from(self.currency_decimals));
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

/// Parses a numeric variable; a malformed or zero value is ignored with a
/// warning.
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Some(value),
        _ => {
            warn!(variable = name, value = %raw, "ignoring invalid limit");
            None
        }
    }
}

/// Platform-specific data directory.
///
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront`
/// - **Windows**: `%APPDATA%\storefront\storefront\data`
/// - **Linux**: `~/.local/share/storefront`
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}
