use crate::config::{ApiConfig, Config};
use crate::energyzero::api;
use crate::error::{GasPriceError, Result};
use crate::logging::{StructuredLogger, get_logger};
use crate::pricing::GasPriceRecord;
use crate::timezone::{DayWindows, Timezone};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};

/// Fetches today's and tomorrow's gas prices in a single GraphQL request
///
/// The HTTP client lives from construction until [`PriceFetcher::shutdown`].
/// Every refresh is one attempt; failures are logged and returned as-is.
pub struct PriceFetcher {
    client: Option<reqwest::Client>,
    endpoint: String,
    user_agent: String,
    timezone: Timezone,
    logger: StructuredLogger,
}

impl PriceFetcher {
    /// Create a fetcher for the given API settings
    pub fn new(api: &ApiConfig, timezone: Timezone) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(api.timeout()).build()?;
        let logger = get_logger("energyzero").with_field("endpoint", api.endpoint.clone());
        Ok(Self {
            client: Some(client),
            endpoint: api.endpoint.clone(),
            user_agent: api.user_agent.clone(),
            timezone,
            logger,
        })
    }

    /// Create a fetcher from a full, validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(&config.api, config.timezone()?)
    }

    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Fetch prices for the windows around the current instant
    pub async fn refresh(&self) -> Result<GasPriceRecord> {
        let windows = self.timezone.day_windows()?;
        self.refresh_for(&windows).await
    }

    /// Fetch prices for explicit windows
    pub async fn refresh_for(&self, windows: &DayWindows) -> Result<GasPriceRecord> {
        match self.fetch_and_shape(windows).await {
            Ok(record) => {
                self.logger.debug(&format!(
                    "Gas prices updated: current total incl {:?}, next total incl {:?}",
                    record.current.total_price_incl, record.next.total_price_incl
                ));
                Ok(record)
            }
            Err(e) => {
                self.logger
                    .error(&format!("Error updating gas price data: {}", e));
                Err(e)
            }
        }
    }

    async fn fetch_and_shape(&self, windows: &DayWindows) -> Result<GasPriceRecord> {
        let client = self.client.as_ref().ok_or(GasPriceError::Closed)?;

        let resp = client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.user_agent.as_str())
            .json(&api::request_body(windows))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if status != StatusCode::OK {
            return Err(GasPriceError::transport(status.as_u16(), body));
        }

        let data = api::parse_response(&body)?;
        for (name, prices) in [("current", &data.current), ("next", &data.next)] {
            if prices.as_ref().and_then(|p| p.first_interval()).is_none() {
                self.logger
                    .warn(&format!("No {} gas price available yet", name));
            }
        }

        Ok(GasPriceRecord::from_data(&data, self.timezone.now()))
    }

    /// Release the HTTP client; calling it again is a no-op
    pub fn shutdown(&mut self) {
        if self.client.take().is_some() {
            self.logger.debug("HTTP client released");
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.client.is_none()
    }
}
