//! Wire format of the EnergyZero price query

use crate::energyzero::types::MarketPricesData;
use crate::error::{GasPriceError, Result};
use crate::timezone::{DayWindows, format_timestamp};
use serde::Serialize;
use serde_json::Value;

/// Daily gas prices for today (`current`) and tomorrow (`next`)
pub const GAS_PRICE_QUERY: &str = r#"
query EnergyMarketPricesGas(
  $gasCurrentFrom: Time!
  $gasCurrentTill: Time!
  $gasNextFrom: Time!
  $gasNextTill: Time!
) {
  current: energyMarketPrices(
    input: {
      from: $gasCurrentFrom
      till: $gasCurrentTill
      intervalType: Daily
      type: Gas
    }
  ) {
    averageIncl
    averageExcl
    prices {
      energyPriceExcl
      energyPriceIncl
      from
      isAverage
      till
      type
      vat
      additionalCosts {
        name
        priceExcl
        priceIncl
      }
    }
  }
  next: energyMarketPrices(
    input: {
      from: $gasNextFrom
      till: $gasNextTill
      intervalType: Daily
      type: Gas
    }
  ) {
    averageIncl
    averageExcl
    prices {
      energyPriceExcl
      energyPriceIncl
      from
      isAverage
      till
      type
      vat
      additionalCosts {
        name
        priceExcl
        priceIncl
      }
    }
  }
}
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceVariables {
    pub gas_current_from: String,
    pub gas_current_till: String,
    pub gas_next_from: String,
    pub gas_next_till: String,
}

impl From<&DayWindows> for GasPriceVariables {
    fn from(windows: &DayWindows) -> Self {
        Self {
            gas_current_from: format_timestamp(&windows.current.from),
            gas_current_till: format_timestamp(&windows.current.till),
            gas_next_from: format_timestamp(&windows.next.from),
            gas_next_till: format_timestamp(&windows.next.till),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: GasPriceVariables,
}

/// POST body covering both windows in one round-trip
pub fn request_body(windows: &DayWindows) -> GraphQlRequest {
    GraphQlRequest {
        query: GAS_PRICE_QUERY,
        variables: GasPriceVariables::from(windows),
    }
}

/// Decode a 200 response body into the `data` object
///
/// A top-level `errors` key wins over `data`, even when both are present.
pub fn parse_response(body: &str) -> Result<MarketPricesData> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| GasPriceError::malformed(format!("Response is not JSON: {}", e)))?;
    let Some(object) = payload.as_object() else {
        return Err(GasPriceError::malformed("Response is not a JSON object"));
    };

    if let Some(errors) = object.get("errors") {
        let list = match errors {
            Value::Array(items) => items.clone(),
            other => vec![other.clone()],
        };
        return Err(GasPriceError::graphql(list));
    }

    match object.get("data") {
        None | Some(Value::Null) => Err(GasPriceError::malformed("No data in response")),
        Some(data) => serde_json::from_value(data.clone())
            .map_err(|e| GasPriceError::malformed(format!("Unexpected data shape: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn amsterdam_windows() -> DayWindows {
        let now = chrono_tz::Europe::Amsterdam
            .with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
            .unwrap();
        DayWindows::starting_on_day_of(&now).unwrap()
    }

    #[test]
    fn request_body_carries_four_variables() {
        let body = serde_json::to_value(request_body(&amsterdam_windows())).unwrap();
        assert_eq!(
            body["variables"],
            json!({
                "gasCurrentFrom": "2024-01-01T00:00:00+01:00",
                "gasCurrentTill": "2024-01-02T00:00:00+01:00",
                "gasNextFrom": "2024-01-02T00:00:00+01:00",
                "gasNextTill": "2024-01-03T00:00:00+01:00",
            })
        );
        let query = body["query"].as_str().unwrap();
        assert!(query.contains("current: energyMarketPrices"));
        assert!(query.contains("next: energyMarketPrices"));
        assert!(query.contains("type: Gas"));
    }

    #[test]
    fn errors_take_precedence_over_data() {
        let body = json!({
            "data": {"current": null, "next": null},
            "errors": [{"message": "rate limited"}]
        })
        .to_string();
        let err = parse_response(&body).unwrap_err();
        match err {
            GasPriceError::GraphQl { errors } => {
                assert_eq!(errors, vec![json!({"message": "rate limited"})]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_list_errors_are_wrapped() {
        let err = parse_response(r#"{"errors": {"message": "oops"}}"#).unwrap_err();
        assert!(matches!(err, GasPriceError::GraphQl { ref errors } if errors.len() == 1));
    }

    #[test]
    fn missing_or_null_data_is_malformed() {
        for body in [r#"{}"#, r#"{"data": null}"#, r#"[1, 2]"#, "<html>"] {
            let err = parse_response(body).unwrap_err();
            assert!(
                matches!(err, GasPriceError::MalformedResponse { .. }),
                "{body}: {err:?}"
            );
        }
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let err = parse_response(r#"{"data": {"current": {"prices": "soon"}}}"#).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn absent_periods_decode_as_none() {
        let data = parse_response(r#"{"data": {"current": {"prices": []}}}"#).unwrap();
        assert_eq!(data.current.unwrap().prices, Some(Vec::new()));
        assert!(data.next.is_none());
    }

    #[test]
    fn full_interval_decodes() {
        let body = json!({"data": {"current": {
            "averageIncl": 1.2, "averageExcl": 1.0,
            "prices": [{
                "energyPriceExcl": 0.5, "energyPriceIncl": 0.6,
                "from": "2023-12-31T23:00:00.000Z", "till": "2024-01-01T23:00:00.000Z",
                "isAverage": false, "type": "Gas", "vat": 21,
                "additionalCosts": [{"name": "Energy tax", "priceExcl": 0.1, "priceIncl": 0.12}]
            }]
        }}})
        .to_string();
        let data = parse_response(&body).unwrap();
        let interval = data.current.as_ref().unwrap().first_interval().unwrap().clone();
        assert_eq!(interval.kind.as_deref(), Some("Gas"));
        assert_eq!(interval.vat, Some(21.0));
        assert_eq!(interval.from.as_deref(), Some("2023-12-31T23:00:00.000Z"));
        assert_eq!(interval.additional_costs.unwrap()[0].price_incl, Some(0.12));
    }
}
