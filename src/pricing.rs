//! Gas price record and the shaping of API intervals into it
//!
//! A period's breakdown is either entirely absent (no interval for that
//! day) or populated from the first interval. Within a populated breakdown
//! the tax and cost buckets default to zero while the market price keeps its
//! absence.

use crate::energyzero::types::{MarketPrices, MarketPricesData, PriceInterval};
use crate::money::round_monetary;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Additional-cost name feeding the energy tax bucket
pub const ENERGY_TAX_COST_NAME: &str = "Energy tax";
/// Additional-cost name feeding the purchasing cost bucket
pub const PURCHASING_COST_NAME: &str = "Purchasing cost";

/// Day a breakdown belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Current,
    Next,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Current, Period::Next];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Next => "next",
        }
    }

    /// Capitalized form used in display names
    pub fn label(&self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::Next => "Next",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prices of one day, rounded to cents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodPrices {
    pub market_price_excl: Option<f64>,
    pub market_price_incl: Option<f64>,
    pub energy_tax_excl: Option<f64>,
    pub energy_tax_incl: Option<f64>,
    pub purchasing_cost_excl: Option<f64>,
    pub purchasing_cost_incl: Option<f64>,
    pub total_price_excl: Option<f64>,
    pub total_price_incl: Option<f64>,
    /// Interval start exactly as the API sent it
    pub from: Option<String>,
    /// Interval end exactly as the API sent it
    pub till: Option<String>,
}

impl PeriodPrices {
    /// Breakdown for one period; absent or empty price lists give all-`None`
    pub fn from_market_prices(prices: Option<&MarketPrices>) -> Self {
        prices
            .and_then(MarketPrices::first_interval)
            .map(Self::from_interval)
            .unwrap_or_default()
    }

    pub fn from_interval(interval: &PriceInterval) -> Self {
        // A missing market price still lets the surcharges add up to a total
        let mut total_excl = interval.energy_price_excl.unwrap_or(0.0);
        let mut total_incl = interval.energy_price_incl.unwrap_or(0.0);

        let mut energy_tax = (0.0, 0.0);
        let mut purchasing_cost = (0.0, 0.0);

        for cost in interval.additional_costs.iter().flatten() {
            let excl = cost.price_excl.unwrap_or(0.0);
            let incl = cost.price_incl.unwrap_or(0.0);
            total_excl += excl;
            total_incl += incl;

            match cost.name.as_deref() {
                Some(ENERGY_TAX_COST_NAME) => energy_tax = (excl, incl),
                Some(PURCHASING_COST_NAME) => purchasing_cost = (excl, incl),
                _ => {}
            }
        }

        Self {
            market_price_excl: round_monetary(interval.energy_price_excl),
            market_price_incl: round_monetary(interval.energy_price_incl),
            energy_tax_excl: round_monetary(Some(energy_tax.0)),
            energy_tax_incl: round_monetary(Some(energy_tax.1)),
            purchasing_cost_excl: round_monetary(Some(purchasing_cost.0)),
            purchasing_cost_incl: round_monetary(Some(purchasing_cost.1)),
            total_price_excl: round_monetary(Some(total_excl)),
            total_price_incl: round_monetary(Some(total_incl)),
            from: interval.from.clone(),
            till: interval.till.clone(),
        }
    }

    /// Whether the API delivered an interval for this period
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of one refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasPriceRecord {
    pub current: PeriodPrices,
    pub next: PeriodPrices,
    pub last_updated: DateTime<FixedOffset>,
}

impl GasPriceRecord {
    pub fn from_data(data: &MarketPricesData, last_updated: DateTime<FixedOffset>) -> Self {
        Self {
            current: PeriodPrices::from_market_prices(data.current.as_ref()),
            next: PeriodPrices::from_market_prices(data.next.as_ref()),
            last_updated,
        }
    }

    pub fn period(&self, period: Period) -> &PeriodPrices {
        match period {
            Period::Current => &self.current,
            Period::Next => &self.next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energyzero::types::AdditionalCost;

    fn cost(name: &str, excl: f64, incl: f64) -> AdditionalCost {
        AdditionalCost {
            name: Some(name.to_string()),
            price_excl: Some(excl),
            price_incl: Some(incl),
        }
    }

    fn interval(excl: Option<f64>, incl: Option<f64>, costs: Vec<AdditionalCost>) -> PriceInterval {
        PriceInterval {
            energy_price_excl: excl,
            energy_price_incl: incl,
            from: Some("2024-01-01T00:00:00".to_string()),
            till: Some("2024-01-02T00:00:00".to_string()),
            additional_costs: Some(costs),
            ..Default::default()
        }
    }

    #[test]
    fn total_sums_every_cost_before_rounding() {
        let p = PeriodPrices::from_interval(&interval(
            Some(0.504),
            Some(0.611),
            vec![
                cost(ENERGY_TAX_COST_NAME, 0.003, 0.004),
                cost("Grid fee", 0.003, 0.004),
            ],
        ));
        // 0.504 + 0.003 + 0.003 = 0.510, not 0.50 + 0.00 + 0.00
        assert_eq!(p.total_price_excl, Some(0.51));
        assert_eq!(p.total_price_incl, Some(0.62));
        assert_eq!(p.market_price_excl, Some(0.5));
        assert_eq!(p.energy_tax_excl, Some(0.0));
    }

    #[test]
    fn without_costs_total_equals_market_price() {
        for costs in [None, Some(Vec::new())] {
            let mut i = interval(Some(1.236), Some(1.4955), Vec::new());
            i.additional_costs = costs;
            let p = PeriodPrices::from_interval(&i);
            assert_eq!(p.total_price_excl, Some(1.24));
            assert_eq!(p.total_price_excl, p.market_price_excl);
            assert_eq!(p.total_price_incl, Some(1.5));
            assert_eq!(p.energy_tax_incl, Some(0.0));
            assert_eq!(p.purchasing_cost_incl, Some(0.0));
        }
    }

    #[test]
    fn cost_names_match_exactly() {
        let p = PeriodPrices::from_interval(&interval(
            Some(0.5),
            Some(0.6),
            vec![
                cost("energy tax", 0.1, 0.12),
                cost("Purchasing Cost", 0.05, 0.06),
            ],
        ));
        assert_eq!(p.energy_tax_excl, Some(0.0));
        assert_eq!(p.purchasing_cost_excl, Some(0.0));
        assert_eq!(p.total_price_excl, Some(0.65));
        assert_eq!(p.total_price_incl, Some(0.78));
    }

    #[test]
    fn last_matching_cost_wins() {
        let p = PeriodPrices::from_interval(&interval(
            Some(0.5),
            Some(0.6),
            vec![
                cost(ENERGY_TAX_COST_NAME, 0.1, 0.12),
                cost(ENERGY_TAX_COST_NAME, 0.2, 0.24),
            ],
        ));
        assert_eq!(p.energy_tax_excl, Some(0.2));
        assert_eq!(p.energy_tax_incl, Some(0.24));
        assert_eq!(p.total_price_excl, Some(0.8));
    }

    #[test]
    fn missing_market_price_stays_null_but_total_is_computed() {
        let p = PeriodPrices::from_interval(&interval(
            None,
            None,
            vec![cost(ENERGY_TAX_COST_NAME, 0.58, 0.7)],
        ));
        assert_eq!(p.market_price_excl, None);
        assert_eq!(p.market_price_incl, None);
        assert_eq!(p.total_price_excl, Some(0.58));
        assert_eq!(p.total_price_incl, Some(0.7));
    }

    #[test]
    fn cost_with_missing_amounts_counts_as_zero() {
        let mut i = interval(Some(0.5), Some(0.6), Vec::new());
        i.additional_costs = Some(vec![AdditionalCost {
            name: Some(PURCHASING_COST_NAME.to_string()),
            price_excl: None,
            price_incl: Some(0.06),
        }]);
        let p = PeriodPrices::from_interval(&i);
        assert_eq!(p.purchasing_cost_excl, Some(0.0));
        assert_eq!(p.purchasing_cost_incl, Some(0.06));
        assert_eq!(p.total_price_excl, Some(0.5));
    }

    #[test]
    fn timestamps_are_copied_verbatim() {
        let mut i = interval(Some(0.5), Some(0.6), Vec::new());
        i.from = Some("2023-12-31T23:00:00.000Z".to_string());
        let p = PeriodPrices::from_interval(&i);
        assert_eq!(p.from.as_deref(), Some("2023-12-31T23:00:00.000Z"));
        assert_eq!(p.till.as_deref(), Some("2024-01-02T00:00:00"));
    }

    #[test]
    fn only_the_first_interval_is_used() {
        let prices = MarketPrices {
            prices: Some(vec![
                interval(Some(0.5), Some(0.6), Vec::new()),
                interval(Some(9.0), Some(9.0), Vec::new()),
            ]),
            ..Default::default()
        };
        let p = PeriodPrices::from_market_prices(Some(&prices));
        assert_eq!(p.market_price_excl, Some(0.5));
    }

    #[test]
    fn empty_or_absent_period_is_all_null() {
        let empty = MarketPrices {
            prices: Some(Vec::new()),
            ..Default::default()
        };
        assert!(PeriodPrices::from_market_prices(Some(&empty)).is_empty());
        assert!(PeriodPrices::from_market_prices(None).is_empty());
        assert!(PeriodPrices::from_market_prices(Some(&MarketPrices::default())).is_empty());
    }

    #[test]
    fn record_exposes_periods_by_enum() {
        let data = MarketPricesData {
            current: Some(MarketPrices {
                prices: Some(vec![interval(Some(0.5), Some(0.6), Vec::new())]),
                ..Default::default()
            }),
            next: None,
        };
        let now = chrono::DateTime::parse_from_rfc3339("2024-01-01T10:00:00+01:00").unwrap();
        let record = GasPriceRecord::from_data(&data, now);
        assert_eq!(record.period(Period::Current).market_price_incl, Some(0.6));
        assert!(record.period(Period::Next).is_empty());
        assert_eq!(record.last_updated, now);
        assert_eq!(Period::Next.to_string(), "next");
        assert_eq!(Period::Current.label(), "Current");
    }
}
