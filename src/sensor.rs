//! Read-only sensor facades over the latest record
//!
//! One sensor type covers every metric: the pair (period, component) picks
//! the values, and the display name and unique id derive from it.

use crate::coordinator::CoordinatorSnapshot;
use crate::pricing::{GasPriceRecord, Period, PeriodPrices};
use serde_json::{Map, Value, json};

/// Integration domain, prefix of every unique id
pub const DOMAIN: &str = "energyzero_better_gas_prices";
/// Euro per cubic metre
pub const UNIT_OF_MEASUREMENT: &str = "€/m³";
pub const ICON: &str = "mdi:meter-gas";

/// Part of the gas price a sensor reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceComponent {
    MarketPrice,
    EnergyTax,
    PurchasingCost,
    TotalPrice,
}

impl PriceComponent {
    pub const ALL: [PriceComponent; 4] = [
        PriceComponent::MarketPrice,
        PriceComponent::EnergyTax,
        PriceComponent::PurchasingCost,
        PriceComponent::TotalPrice,
    ];

    /// Key used in unique ids
    pub fn key(&self) -> &'static str {
        match self {
            Self::MarketPrice => "market",
            Self::EnergyTax => "energy_tax",
            Self::PurchasingCost => "purchasing_cost",
            Self::TotalPrice => "total",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MarketPrice => "Market Price",
            Self::EnergyTax => "Energy Tax",
            Self::PurchasingCost => "Purchasing Cost",
            Self::TotalPrice => "Total Price",
        }
    }

    /// `(excl, incl)` VAT values of this component
    pub fn values(&self, prices: &PeriodPrices) -> (Option<f64>, Option<f64>) {
        match self {
            Self::MarketPrice => (prices.market_price_excl, prices.market_price_incl),
            Self::EnergyTax => (prices.energy_tax_excl, prices.energy_tax_incl),
            Self::PurchasingCost => (prices.purchasing_cost_excl, prices.purchasing_cost_incl),
            Self::TotalPrice => (prices.total_price_excl, prices.total_price_incl),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GasPriceSensor {
    pub period: Period,
    pub component: PriceComponent,
}

impl GasPriceSensor {
    pub fn new(period: Period, component: PriceComponent) -> Self {
        Self { period, component }
    }

    pub fn unique_id(&self) -> String {
        format!(
            "{}_{}_{}_gas_price",
            DOMAIN,
            self.period.as_str(),
            self.component.key()
        )
    }

    /// e.g. `Better Gas Next Energy Tax`
    pub fn name(&self) -> String {
        format!("Better Gas {} {}", self.period.label(), self.component.label())
    }

    pub fn unit_of_measurement(&self) -> &'static str {
        UNIT_OF_MEASUREMENT
    }

    pub fn icon(&self) -> &'static str {
        ICON
    }

    /// VAT-inclusive value, `None` without data
    pub fn native_value(&self, record: Option<&GasPriceRecord>) -> Option<f64> {
        record.and_then(|r| self.component.values(r.period(self.period)).1)
    }

    /// Extra state attributes; empty without data
    pub fn attributes(&self, record: Option<&GasPriceRecord>) -> Map<String, Value> {
        let mut attrs = Map::new();
        let Some(record) = record else {
            return attrs;
        };
        let prices = record.period(self.period);
        let period = self.period.as_str();

        attrs.insert("last_updated".into(), json!(record.last_updated.to_rfc3339()));
        attrs.insert(format!("{}_from", period), json!(prices.from));
        attrs.insert(format!("{}_till", period), json!(prices.till));
        attrs.insert(
            "price_excl_vat".into(),
            json!(self.component.values(prices).0),
        );

        if self.component == PriceComponent::TotalPrice {
            for part in [
                PriceComponent::MarketPrice,
                PriceComponent::EnergyTax,
                PriceComponent::PurchasingCost,
            ] {
                let (excl, incl) = part.values(prices);
                attrs.insert(format!("{}_incl_vat", attr_prefix(part)), json!(incl));
                attrs.insert(format!("{}_excl_vat", attr_prefix(part)), json!(excl));
            }
        }
        attrs
    }

    /// Available while the last refresh succeeded and data exists
    pub fn available(&self, snapshot: &CoordinatorSnapshot) -> bool {
        snapshot.last_update_success && snapshot.data.is_some()
    }
}

fn attr_prefix(component: PriceComponent) -> &'static str {
    match component {
        PriceComponent::MarketPrice => "market_price",
        other => other.key(),
    }
}

/// The eight sensors, current day first
pub fn all_sensors() -> Vec<GasPriceSensor> {
    Period::ALL
        .into_iter()
        .flat_map(|period| {
            PriceComponent::ALL
                .into_iter()
                .map(move |component| GasPriceSensor::new(period, component))
        })
        .collect()
}
