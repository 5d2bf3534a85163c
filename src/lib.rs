//! # EnergyZero gas prices
//!
//! Hourly gas tariffs from the EnergyZero GraphQL API, shaped into one
//! record per refresh and exposed through read-only sensor facades.
//!
//! ## Architecture
//!
//! - `energyzero`: GraphQL query, wire types and the [`PriceFetcher`]
//! - `pricing`: the [`GasPriceRecord`] and how API intervals map onto it
//! - `money`: half-up rounding of monetary values
//! - `timezone`: local-midnight windows for today and tomorrow
//! - `coordinator`: scheduled refreshes and fan-out of the latest record
//! - `sensor`: one parametrized sensor per (period, price component)
//! - `config`: YAML configuration with defaults and validation
//! - `logging`: structured logging and tracing

pub mod config;
pub mod coordinator;
pub mod energyzero;
pub mod error;
pub mod logging;
pub mod money;
pub mod pricing;
pub mod sensor;
pub mod timezone;

// Re-export commonly used types
pub use config::Config;
pub use coordinator::{CoordinatorSnapshot, PriceCoordinator, PriceSource};
pub use energyzero::PriceFetcher;
pub use error::{GasPriceError, Result};
pub use pricing::{GasPriceRecord, Period, PeriodPrices};
pub use sensor::{GasPriceSensor, PriceComponent};
