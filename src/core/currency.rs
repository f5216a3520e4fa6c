//! Currency rate abstractions and core types

use crate::core::window::DateWindow;
use crate::error::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The two currencies tracked against the rouble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Currency::Usd => "USD",
                Currency::Eur => "EUR",
            }
        )
    }
}

/// Latest rate of a currency and its change against the previous business day.
///
/// Both fields hold `NaN` until populated, which reads as "not available".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub latest: f32,
    pub delta: f32,
}

impl CurrencyRate {
    pub fn unavailable() -> Self {
        CurrencyRate {
            latest: f32::NAN,
            delta: f32::NAN,
        }
    }

    /// Builds a rate from the older and newer samples of a two-day window.
    pub fn from_samples(older: f32, newer: f32) -> Self {
        CurrencyRate {
            latest: newer,
            delta: newer - older,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.latest.is_nan() && !self.delta.is_nan()
    }
}

impl Default for CurrencyRate {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Result of one fetch: both tracked currencies for the same date window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub window: DateWindow,
    pub usd: CurrencyRate,
    pub eur: CurrencyRate,
}

impl RateSnapshot {
    pub fn get(&self, currency: Currency) -> CurrencyRate {
        match currency {
            Currency::Usd => self.usd,
            Currency::Eur => self.eur,
        }
    }
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Fetches the rate of a single currency for the given window.
    async fn fetch_rate(
        &self,
        currency: Currency,
        window: &DateWindow,
    ) -> Result<CurrencyRate, FetchError>;
}
