//! Rate charts: a plain data model plus the renderers that draw it.

use std::collections::HashMap;

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::exchange_rate::{DateRange, ExchangeRateRecord};
use crate::export::Export;
use crate::nbu::NbuClient;
use crate::privatbank::PrivatBankClient;
use crate::source::RateSource;
use crate::transport::Transport;

mod window;

pub use window::Window;

/// One named line. `values[i]` belongs to the chart's `labels[i]`; `None`
/// leaves a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub markers: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub x_label: String,
    pub y_label: String,
}

impl Chart {
    /// Single line of `rates` against their dates.
    pub fn of_rates(title: impl Into<String>, rates: &[ExchangeRateRecord]) -> Self {
        let name = rates
            .first()
            .map(|rate| rate.currency.clone())
            .unwrap_or_default();

        Self {
            title: title.into(),
            labels: rates.iter().map(|rate| rate.date.clone()).collect(),
            series: vec![Series {
                name,
                values: rates.iter().map(|rate| to_value(rate.rate)).collect(),
                markers: false,
            }],
            x_label: String::new(),
            y_label: String::new(),
        }
    }

    /// Both sources over the NBU dates. PrivatBank days are matched by date,
    /// so a day missing on its side shows up as a gap.
    pub fn comparison(
        valcode: &str,
        nbu: &[ExchangeRateRecord],
        privatbank: &[ExchangeRateRecord],
    ) -> Self {
        let labels: Vec<String> = nbu.iter().map(|rate| rate.date.clone()).collect();

        let by_date: HashMap<&str, Decimal> = privatbank
            .iter()
            .map(|rate| (rate.date.as_str(), rate.rate))
            .collect();
        let aligned = labels
            .iter()
            .map(|date| by_date.get(date.as_str()).and_then(|rate| to_value(*rate)))
            .collect();

        Self {
            title: format!("{} exchange rates", valcode.to_uppercase()),
            series: vec![
                Series {
                    name: <NbuClient as RateSource>::NAME.to_string(),
                    values: nbu.iter().map(|rate| to_value(rate.rate)).collect(),
                    markers: true,
                },
                Series {
                    name: <PrivatBankClient as RateSource>::NAME.to_string(),
                    values: aligned,
                    markers: true,
                },
            ],
            labels,
            x_label: "Dates".to_string(),
            y_label: "Rates".to_string(),
        }
    }
}

fn to_value(rate: Decimal) -> Option<f64> {
    rate.to_f64()
}

/// Something that can put a chart in front of the user.
pub trait Renderer {
    fn render(&self, chart: &Chart) -> Result<()>;
}

/// Runs `producer`, draws what it returned as a single line and hands the
/// rates back untouched. Nothing is drawn if the producer fails.
pub async fn plotted<R, F, Fut>(
    renderer: &R,
    title: &str,
    producer: F,
) -> Result<Vec<ExchangeRateRecord>>
where
    R: Renderer,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<ExchangeRateRecord>>>,
{
    let rates = producer().await?;
    renderer.render(&Chart::of_rates(title, &rates))?;

    Ok(rates)
}

/// Fetches `valcode` from both banks (without exporting) and builds the
/// comparison chart.
pub async fn comparison_chart<A: Transport, B: Transport>(
    nbu: &NbuClient<A>,
    privatbank: &PrivatBankClient<B>,
    valcode: &str,
    range: &DateRange,
) -> Result<Chart> {
    let nbu_rates = nbu
        .get_exchange_rates(valcode, range, &Export::none())
        .await?;
    let pb_rates = privatbank
        .get_exchange_rates(valcode, range, &Export::none())
        .await?;

    if pb_rates.len() != nbu_rates.len() {
        log::warn!(
            "PrivatBank returned {} of {} days for {}",
            pb_rates.len(),
            nbu_rates.len(),
            valcode
        );
    }

    Ok(Chart::comparison(valcode, &nbu_rates, &pb_rates))
}

pub async fn show_comparison<A: Transport, B: Transport, R: Renderer>(
    nbu: &NbuClient<A>,
    privatbank: &PrivatBankClient<B>,
    renderer: &R,
    valcode: &str,
    range: &DateRange,
) -> Result<()> {
    let chart = comparison_chart(nbu, privatbank, valcode, range).await?;
    renderer.render(&chart)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDate;

    use super::*;
    use crate::{nbu, privatbank};

    #[derive(Default)]
    struct Recorder {
        charts: RefCell<Vec<Chart>>,
    }

    impl Renderer for Recorder {
        fn render(&self, chart: &Chart) -> Result<()> {
            self.charts.borrow_mut().push(chart.clone());
            Ok(())
        }
    }

    fn april_range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2022, 4, 20).unwrap(),
            NaiveDate::from_ymd_opt(2022, 4, 24),
        )
        .unwrap()
    }

    fn rates() -> Vec<ExchangeRateRecord> {
        vec![
            ExchangeRateRecord::new("20.04.2022", "EUR", Decimal::new(3175, 2)),
            ExchangeRateRecord::new("21.04.2022", "EUR", Decimal::new(3180, 2)),
        ]
    }

    #[tokio::test]
    async fn plotted_renders_once_and_returns_input() {
        let recorder = Recorder::default();

        let out = plotted(&recorder, "EUR", || async { Ok(rates()) })
            .await
            .unwrap();

        assert_eq!(out, rates());
        let charts = recorder.charts.borrow();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].labels, vec!["20.04.2022", "21.04.2022"]);
        assert_eq!(charts[0].series.len(), 1);
        assert_eq!(charts[0].series[0].values, vec![Some(31.75), Some(31.8)]);
    }

    #[tokio::test]
    async fn plotted_skips_rendering_on_error() {
        let recorder = Recorder::default();

        let result = plotted(&recorder, "EUR", || async {
            Err::<Vec<ExchangeRateRecord>, _>(anyhow::anyhow!("offline"))
        })
        .await;

        assert!(result.is_err());
        assert!(recorder.charts.borrow().is_empty());
    }

    #[tokio::test]
    async fn comparison_aligns_missing_privatbank_days() {
        let nbu = NbuClient::with_transport(nbu::tests::april_eur(), nbu::tests::BASE);
        let pb = PrivatBankClient::with_transport(privatbank::tests::april(), privatbank::tests::BASE);
        let recorder = Recorder::default();

        show_comparison(&nbu, &pb, &recorder, "EUR", &april_range())
            .await
            .unwrap();

        let charts = recorder.charts.borrow();
        let chart = &charts[0];
        assert_eq!(chart.title, "EUR exchange rates");
        assert_eq!(chart.x_label, "Dates");
        assert_eq!(chart.y_label, "Rates");
        assert_eq!(
            chart.labels,
            vec!["20.04.2022", "21.04.2022", "22.04.2022", "23.04.2022", "24.04.2022"]
        );

        let names: Vec<_> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["NBU", "PrivatBank"]);
        assert!(chart.series.iter().all(|s| s.markers));
        assert_eq!(
            chart.series[0].values,
            vec![Some(31.2), Some(31.21), Some(31.22), Some(31.23), Some(31.24)]
        );
        assert_eq!(
            chart.series[1].values,
            vec![Some(33.2), Some(33.21), Some(33.22), None, Some(33.24)]
        );
    }

    #[tokio::test]
    async fn comparison_fails_when_a_source_fails() {
        let nbu = NbuClient::with_transport(nbu::tests::april_eur(), nbu::tests::BASE);
        let pb = PrivatBankClient::with_transport(
            crate::transport::fake::FakeTransport::new(),
            privatbank::tests::BASE,
        );

        let result = comparison_chart(&nbu, &pb, "EUR", &april_range()).await;

        assert!(result.is_err());
    }
}
