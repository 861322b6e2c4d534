use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::exchange_rate::{DateRange, ExchangeRateRecord};
use crate::export::Export;

/// A rate API that answers one day at a time.
#[allow(async_fn_in_trait)]
pub trait RateSource {
    /// Human readable name, used in logs, errors and chart legends.
    const NAME: &'static str;
    /// Export file name without extension.
    const FILE_STEM: &'static str;

    fn normalize_valcode(&self, valcode: &str) -> String {
        valcode.to_string()
    }

    /// `None` means the source has no rate for this currency on `day`.
    async fn fetch_day(
        &self,
        valcode: &str,
        day: NaiveDate,
    ) -> Result<Option<ExchangeRateRecord>>;
}

/// Queries `source` once per day of `range`, oldest first, and exports the
/// collected records. The first failing day aborts the whole range.
pub async fn fetch_range<S: RateSource>(
    source: &S,
    valcode: &str,
    range: &DateRange,
    export: &Export,
) -> Result<Vec<ExchangeRateRecord>> {
    let valcode = source.normalize_valcode(valcode);
    log::info!(
        "Fetching {} rates of {} from {} to {}",
        S::NAME,
        valcode,
        range.start(),
        range.end()
    );

    let mut rates = Vec::with_capacity(range.num_days());
    for day in range.days() {
        let record = source
            .fetch_day(&valcode, day)
            .await
            .with_context(|| format!("Can't get {} rate of {} for {}", S::NAME, valcode, day))?;

        match record {
            Some(record) => rates.push(record),
            None => log::debug!("{} has no {} rate for {}", S::NAME, valcode, day),
        }
    }

    export.write(S::FILE_STEM, &rates)?;

    Ok(rates)
}
