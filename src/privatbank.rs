//! PrivatBank archive rates.
//!
//! The archive endpoint returns every currency for a day at once, so the
//! requested one has to be picked out of the table.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::exchange_rate::{DateRange, ExchangeRateRecord};
use crate::export::Export;
use crate::source::{RateSource, fetch_range};
use crate::transport::{HttpTransport, Transport};

pub const DEFAULT_BASE_URL: &str = "https://api.privatbank.ua";

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct CurrencyRate {
    pub currency: Option<String>,
    #[serde(
        rename = "saleRate",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub sale_rate: Option<Decimal>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ArchiveRates {
    #[serde(rename = "exchangeRate")]
    pub exchange_rate: Vec<CurrencyRate>,
}

pub struct PrivatBankClient<T = HttpTransport> {
    transport: T,
    base_url: String,
}

impl PrivatBankClient<HttpTransport> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(HttpTransport::new(), base_url)
    }
}

impl<T: Transport> PrivatBankClient<T> {
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Sale rates of `valcode` (any case) for each day of `range`. Days the
    /// bank has no rate for are left out.
    pub async fn get_exchange_rates(
        &self,
        valcode: &str,
        range: &DateRange,
        export: &Export,
    ) -> Result<Vec<ExchangeRateRecord>> {
        fetch_range(self, valcode, range, export).await
    }

    fn get_url(&self, date: &str) -> String {
        format!(
            "{}/p24api/exchange_rates?json&date={}",
            self.base_url.trim_end_matches('/'),
            date
        )
    }
}

impl<T: Transport> RateSource for PrivatBankClient<T> {
    const NAME: &'static str = "PrivatBank";
    const FILE_STEM: &'static str = "rates_pb";

    fn normalize_valcode(&self, valcode: &str) -> String {
        valcode.to_uppercase()
    }

    async fn fetch_day(&self, valcode: &str, day: NaiveDate) -> Result<Option<ExchangeRateRecord>> {
        let date = day.format("%d.%m.%Y").to_string();
        let text = self.transport.get_text(&self.get_url(&date)).await?;
        let archive: ArchiveRates = serde_json::from_str(&text)?;

        // The first entry is the base currency row, never a real rate.
        let found = archive
            .exchange_rate
            .iter()
            .skip(1)
            .find(|rate| rate.currency.as_deref() == Some(valcode));

        let Some(found) = found else {
            return Ok(None);
        };

        let sale_rate = found
            .sale_rate
            .ok_or(anyhow::anyhow!("No sale rate for {} on {}", valcode, date))?;

        Ok(Some(ExchangeRateRecord::new(date, valcode, sale_rate)))
    }
}
