//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `DRIFTWEAR_STORAGE_DIR` - Directory for file-backed slots (default: .driftwear)
//! - `DRIFTWEAR_CART_SLOT` - Slot name for the cart (default: cart)
//! - `DRIFTWEAR_WISHLIST_SLOT` - Slot name for the wishlist (default: wishlist)
//! - `DRIFTWEAR_TAX_RATE` - Tax rate as a decimal fraction (default: 0.10)
//! - `DRIFTWEAR_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 100)
//! - `DRIFTWEAR_FLAT_SHIPPING` - Shipping fee below the threshold (default: 10)
//! - `DRIFTWEAR_CURRENCY` - Display currency code (default: USD)
//! - `DRIFTWEAR_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::path::PathBuf;
use std::str::FromStr;

use driftwear_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::slots;
use crate::services::PricingPolicy;
use crate::storage::validate_slot;
use crate::telemetry::LogFormat;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Session store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding file-backed slots
    pub storage_dir: PathBuf,
    /// Slot name for the cart
    pub cart_slot: String,
    /// Slot name for the wishlist
    pub wishlist_slot: String,
    /// Tax and shipping rules
    pub pricing: PricingPolicy,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".driftwear"),
            cart_slot: slots::CART.to_string(),
            wishlist_slot: slots::WISHLIST.to_string(),
            pricing: PricingPolicy::default(),
            currency: CurrencyCode::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let defaults_pricing = defaults.pricing;

        let storage_dir = lookup("DRIFTWEAR_STORAGE_DIR")
            .map_or(defaults.storage_dir, PathBuf::from);
        let cart_slot = get_slot(&lookup, "DRIFTWEAR_CART_SLOT", defaults.cart_slot)?;
        let wishlist_slot = get_slot(&lookup, "DRIFTWEAR_WISHLIST_SLOT", defaults.wishlist_slot)?;

        let pricing = PricingPolicy {
            tax_rate: get_amount(&lookup, "DRIFTWEAR_TAX_RATE", defaults_pricing.tax_rate)?,
            free_shipping_threshold: get_amount(
                &lookup,
                "DRIFTWEAR_FREE_SHIPPING_THRESHOLD",
                defaults_pricing.free_shipping_threshold,
            )?,
            flat_shipping: get_amount(
                &lookup,
                "DRIFTWEAR_FLAT_SHIPPING",
                defaults_pricing.flat_shipping,
            )?,
        };

        let currency = get_parsed(&lookup, "DRIFTWEAR_CURRENCY", defaults.currency)?;
        let log_format = get_parsed(&lookup, "DRIFTWEAR_LOG_FORMAT", defaults.log_format)?;

        if wishlist_slot == cart_slot {
            return Err(ConfigError::InvalidEnvVar(
                "DRIFTWEAR_WISHLIST_SLOT".to_string(),
                "must differ from DRIFTWEAR_CART_SLOT".to_string(),
            ));
        }

        Ok(Self {
            storage_dir,
            cart_slot,
            wishlist_slot,
            pricing,
            currency,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable with `FromStr`, falling back to `default` when unset.
fn get_parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a non-negative decimal amount.
fn get_amount<F>(lookup: &F, key: &str, default: Decimal) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let amount: Decimal = get_parsed(lookup, key, default)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not be negative (got {amount})"),
        ));
    }
    Ok(amount)
}

/// Read a slot name and check it is usable by every storage backend.
fn get_slot<F>(lookup: &F, key: &str, default: String) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let slot = lookup(key).unwrap_or(default);
    validate_slot(&slot).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(slot)
}
