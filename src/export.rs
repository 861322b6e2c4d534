use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{Reader, Writer};
use rust_decimal::Decimal;

use crate::exchange_rate::ExchangeRateRecord;

const CSV_HEADER: [&str; 3] = ["date", "currency", "rate"];

/// Which files a fetch should write, and where.
///
/// File names are fixed per source (`<stem>.csv`, `<stem>.json`); existing
/// files are overwritten.
#[derive(Debug, Clone, Default)]
pub struct Export {
    dir: PathBuf,
    csv: bool,
    json: bool,
}

impl Export {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn csv(mut self, enabled: bool) -> Self {
        self.csv = enabled;
        self
    }

    pub fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    pub fn csv_path(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", stem))
    }

    pub fn json_path(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{}.json", stem))
    }

    pub fn write(&self, stem: &str, rates: &[ExchangeRateRecord]) -> Result<()> {
        if self.csv {
            let path = self.csv_path(stem);
            write_csv(&path, rates)?;
            log::info!("Wrote {} rates to {}", rates.len(), path.display());
        }

        if self.json {
            let path = self.json_path(stem);
            write_json(&path, rates)?;
            log::info!("Wrote {} rates to {}", rates.len(), path.display());
        }

        Ok(())
    }
}

pub fn write_csv(path: &Path, rates: &[ExchangeRateRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Can't create {}", path.display()))?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(CSV_HEADER)?;

    for rate in rates {
        writer.write_record([
            rate.date.as_str(),
            rate.currency.as_str(),
            rate.rate.to_string().as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn read_csv(path: &Path) -> Result<Vec<ExchangeRateRecord>> {
    let file = File::open(path).with_context(|| format!("Can't open {}", path.display()))?;
    let mut reader = Reader::from_reader(file);
    let mut rates = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.len() < CSV_HEADER.len() {
            anyhow::bail!("Short row in {}: {:?}", path.display(), record);
        }

        let rate: Decimal = record[2]
            .parse()
            .with_context(|| format!("Can't parse rate {:?}", &record[2]))?;
        rates.push(ExchangeRateRecord::new(&record[0], &record[1], rate));
    }

    Ok(rates)
}

pub fn write_json(path: &Path, rates: &[ExchangeRateRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Can't create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, rates)?;
    writer.flush()?;

    Ok(())
}

pub fn read_json(path: &Path) -> Result<Vec<ExchangeRateRecord>> {
    let file = File::open(path).with_context(|| format!("Can't open {}", path.display()))?;
    let rates = serde_json::from_reader(BufReader::new(file))?;

    Ok(rates)
}
