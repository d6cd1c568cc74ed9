//! Exchange-facing services.

pub mod coinbase;
pub mod market_data;

pub use coinbase::CoinbaseMarketDataProvider;
pub use market_data::MarketDataProvider;
