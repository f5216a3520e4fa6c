use crate::core::config::CbrProviderConfig;
use crate::core::{Currency, CurrencyRate, CurrencyRateProvider, DateWindow};
use crate::error::FetchError;
use crate::providers::xml;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Provider series id of the US dollar.
pub const USD_SERIES_ID: &str = "R01235";
/// Provider series id of the euro.
pub const EUR_SERIES_ID: &str = "R01239";

pub fn series_id(currency: Currency) -> &'static str {
    match currency {
        Currency::Usd => USD_SERIES_ID,
        Currency::Eur => EUR_SERIES_ID,
    }
}

// CbrProvider implementation for CurrencyRateProvider
pub struct CbrProvider {
    base_url: String,
    max_response_bytes: usize,
    client: reqwest::Client,
}

impl CbrProvider {
    pub fn new(config: &CbrProviderConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cbr-rates/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FetchError::Client)?;

        Ok(CbrProvider {
            base_url: config.base_url.clone(),
            max_response_bytes: config.max_response_bytes,
            client,
        })
    }

    pub fn build_url(&self, currency: Currency, window: &DateWindow) -> String {
        format!(
            "{}?date_req1={}&date_req2={}&VAL_NM_RQ={}",
            self.base_url,
            window.from_param(),
            window.to_param(),
            series_id(currency)
        )
    }

    async fn read_body(
        &self,
        currency: Currency,
        mut response: reqwest::Response,
    ) -> Result<Vec<u8>, FetchError> {
        let limit = self.max_response_bytes;
        if let Some(len) = response.content_length()
            && len > limit as u64
        {
            return Err(FetchError::ResponseTooLarge { currency, limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| FetchError::Request { currency, source })?
        {
            if body.len() + chunk.len() > limit {
                return Err(FetchError::ResponseTooLarge { currency, limit });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

/// Parses a provider decimal, which uses `,` as the fractional separator.
fn parse_decimal(currency: Currency, text: &str) -> Result<f32, FetchError> {
    text.trim()
        .replace(',', ".")
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FetchError::InvalidNumber {
            currency,
            value: text.to_string(),
        })
}

/// Extracts the rate from a response body: the first two `Value` elements are the older
/// and the newer sample of the window.
pub fn parse_rate(currency: Currency, body: &[u8]) -> Result<CurrencyRate, FetchError> {
    let values = xml::element_texts(body, "Value")
        .map_err(|source| FetchError::Parse { currency, source })?;

    let [older, newer, ..] = values.as_slice() else {
        return Err(FetchError::MissingSamples {
            currency,
            found: values.len(),
        });
    };

    let older = parse_decimal(currency, older)?;
    let newer = parse_decimal(currency, newer)?;
    Ok(CurrencyRate::from_samples(older, newer))
}

#[async_trait]
impl CurrencyRateProvider for CbrProvider {
    #[instrument(
        name = "CbrRateFetch",
        skip(self, window),
        fields(currency = %currency)
    )]
    async fn fetch_rate(
        &self,
        currency: Currency,
        window: &DateWindow,
    ) -> Result<CurrencyRate, FetchError> {
        let url = self.build_url(currency, window);
        info!("Requesting currency rate from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request { currency, source })?;

        debug!(response = ?response, "Received CBR response");

        if !response.status().is_success() {
            return Err(FetchError::Status {
                currency,
                status: response.status(),
            });
        }

        let body = self.read_body(currency, response).await?;
        let rate = parse_rate(currency, &body)?;
        debug!(latest = rate.latest, delta = rate.delta, "Parsed currency rate");
        Ok(rate)
    }
}
