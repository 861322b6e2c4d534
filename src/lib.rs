//! Historical UAH exchange rates from the National Bank of Ukraine and
//! PrivatBank, with CSV/JSON export and a comparison chart.

pub mod chart;
pub mod config;
pub mod exchange_rate;
pub mod export;
pub mod nbu;
pub mod privatbank;
pub mod source;
pub mod transport;

pub use chart::{Chart, Renderer, Window, comparison_chart, plotted, show_comparison};
pub use config::Config;
pub use exchange_rate::{DateRange, ExchangeRateRecord};
pub use export::Export;
pub use nbu::NbuClient;
pub use privatbank::PrivatBankClient;
pub use transport::{HttpTransport, Transport};
