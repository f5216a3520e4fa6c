//! Aggregates the per-currency fetches into one snapshot.

use crate::core::{Currency, CurrencyRate, CurrencyRateProvider, DateWindow, RateSnapshot};
use crate::error::FetchError;
use chrono::NaiveDate;
use tracing::{debug, error};

pub struct RateFetcher<P: CurrencyRateProvider> {
    provider: P,
}

impl<P: CurrencyRateProvider> RateFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetches both currencies for the window ending on the current local date.
    pub async fn fetch(&self) -> Result<RateSnapshot, FetchError> {
        self.fetch_window(DateWindow::current()).await
    }

    pub async fn fetch_on(&self, today: NaiveDate) -> Result<RateSnapshot, FetchError> {
        self.fetch_window(DateWindow::ending_on(today)).await
    }

    /// Fetches USD, then EUR. The first failure aborts the whole call.
    pub async fn fetch_window(&self, window: DateWindow) -> Result<RateSnapshot, FetchError> {
        debug!(from = %window.from, to = %window.to, "Fetching rates");

        let mut snapshot = RateSnapshot {
            window,
            usd: CurrencyRate::unavailable(),
            eur: CurrencyRate::unavailable(),
        };
        snapshot.usd = self.fetch_one(Currency::Usd, &window).await?;
        snapshot.eur = self.fetch_one(Currency::Eur, &window).await?;
        Ok(snapshot)
    }

    async fn fetch_one(
        &self,
        currency: Currency,
        window: &DateWindow,
    ) -> Result<CurrencyRate, FetchError> {
        self.provider
            .fetch_rate(currency, window)
            .await
            .inspect_err(|e| error!(%currency, error = %e, "Currency rate fetch failed"))
    }
}
