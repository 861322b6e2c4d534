use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day's rate of one currency, as reported by a single source.
///
/// `date` keeps the source's own formatting and is not normalized across
/// sources.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ExchangeRateRecord {
    pub date: String,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
}

impl ExchangeRateRecord {
    pub fn new(date: impl Into<String>, currency: impl Into<String>, rate: Decimal) -> Self {
        Self {
            date: date.into(),
            currency: currency.into(),
            rate,
        }
    }
}

/// Inclusive range of calendar days. Without an end it covers `start` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self> {
        if let Some(end) = end {
            if start > end {
                anyhow::bail!("Start date must be before end date: {} > {}", start, end);
            }
        }

        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: None,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end.unwrap_or(self.start)
    }

    /// Days of the range in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end();
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn num_days(&self) -> usize {
        (self.end() - self.start).num_days() as usize + 1
    }
}
