use anyhow::Result;
use chrono::NaiveDate;
use tokio::runtime::Runtime;
use ua_rates::{
    Chart, Config, DateRange, Export, NbuClient, PrivatBankClient, Renderer, Window,
};

const VALCODE: &str = "EUR";

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config::from_env();
    let start_date = NaiveDate::from_ymd_opt(2022, 4, 20)
        .ok_or(anyhow::anyhow!("Can't build start date"))?;
    let end_date = NaiveDate::from_ymd_opt(2022, 4, 24)
        .ok_or(anyhow::anyhow!("Can't build end date"))?;
    let range = DateRange::new(start_date, Some(end_date))?;

    // Fetch first; the chart window needs the main thread to itself.
    let rt = Runtime::new()?;
    let chart = rt.block_on(fetch_all(&config, &range))?;

    Window.render(&chart)
}

async fn fetch_all(config: &Config, range: &DateRange) -> Result<Chart> {
    let nbu = NbuClient::new(&config.nbu_base_url);
    let privatbank = PrivatBankClient::new(&config.privatbank_base_url);
    let export = Export::in_dir(&config.output_dir).csv(true).json(true);

    let nbu_rates = nbu.get_exchange_rates(VALCODE, range, &export).await?;
    println!("NBU: {:?}", nbu_rates);

    let pb_rates = privatbank.get_exchange_rates(VALCODE, range, &export).await?;
    println!("PrivatBank: {:?}", pb_rates);

    Ok(Chart::comparison(VALCODE, &nbu_rates, &pb_rates))
}
