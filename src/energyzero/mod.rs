//! EnergyZero API integration for daily gas prices

pub mod api;
pub mod client;
pub mod types;

pub use api::{GAS_PRICE_QUERY, GasPriceVariables, parse_response, request_body};
pub use client::PriceFetcher;
pub use types::{AdditionalCost, MarketPrices, MarketPricesData, PriceInterval};
