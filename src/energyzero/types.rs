use serde::{Deserialize, Serialize};

/// `data` object of the price query, one entry per aliased field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketPricesData {
    #[serde(default)]
    pub current: Option<MarketPrices>,
    #[serde(default)]
    pub next: Option<MarketPrices>,
}

/// Result of one `energyMarketPrices` selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPrices {
    #[serde(default)]
    pub average_incl: Option<f64>,
    #[serde(default)]
    pub average_excl: Option<f64>,
    #[serde(default)]
    pub prices: Option<Vec<PriceInterval>>,
}

impl MarketPrices {
    /// Representative interval; daily granularity yields exactly one
    pub fn first_interval(&self) -> Option<&PriceInterval> {
        self.prices.as_deref().and_then(<[PriceInterval]>::first)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInterval {
    #[serde(default)]
    pub energy_price_excl: Option<f64>,
    #[serde(default)]
    pub energy_price_incl: Option<f64>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub till: Option<String>,
    #[serde(default)]
    pub is_average: Option<bool>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub vat: Option<f64>,
    #[serde(default)]
    pub additional_costs: Option<Vec<AdditionalCost>>,
}

/// Named surcharge on top of the market price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalCost {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_excl: Option<f64>,
    #[serde(default)]
    pub price_incl: Option<f64>,
}
