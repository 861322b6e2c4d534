//! National Bank of Ukraine daily rates.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::exchange_rate::{DateRange, ExchangeRateRecord};
use crate::export::Export;
use crate::source::{RateSource, fetch_range};
use crate::transport::{HttpTransport, Transport};

pub const DEFAULT_BASE_URL: &str = "https://bank.gov.ua";

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct NbuRate {
    #[serde(rename = "exchangedate")]
    pub exchange_date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
}

pub struct NbuClient<T = HttpTransport> {
    transport: T,
    base_url: String,
}

impl NbuClient<HttpTransport> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(HttpTransport::new(), base_url)
    }
}

impl<T: Transport> NbuClient<T> {
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// One record per day of `range`, in order. Any failing day aborts the
    /// whole range.
    pub async fn get_exchange_rates(
        &self,
        valcode: &str,
        range: &DateRange,
        export: &Export,
    ) -> Result<Vec<ExchangeRateRecord>> {
        fetch_range(self, valcode, range, export).await
    }

    fn get_url(&self, valcode: &str, date: NaiveDate) -> String {
        format!(
            "{}/NBUStatService/v1/statdirectory/exchange?valcode={}&date={}&json",
            self.base_url.trim_end_matches('/'),
            valcode,
            date.format("%Y%m%d")
        )
    }
}

impl<T: Transport> RateSource for NbuClient<T> {
    const NAME: &'static str = "NBU";
    const FILE_STEM: &'static str = "rates_nbu";

    async fn fetch_day(&self, valcode: &str, day: NaiveDate) -> Result<Option<ExchangeRateRecord>> {
        let url = self.get_url(valcode, day);
        let text = self.transport.get_text(&url).await?;
        let rates: Vec<NbuRate> = serde_json::from_str(&text)?;

        let rate = rates
            .into_iter()
            .next()
            .ok_or(anyhow::anyhow!("Empty NBU response for {}", url))?;

        Ok(Some(ExchangeRateRecord::new(
            rate.exchange_date,
            valcode,
            rate.rate,
        )))
    }
}
