//! Periodic refresh and fan-out of the latest gas price record
//!
//! The coordinator keeps exactly one record: the last successful one. A
//! failed refresh leaves it in place and flips `last_update_success`, which
//! sensor facades surface as unavailability.

use crate::energyzero::PriceFetcher;
use crate::error::Result;
use crate::logging::{StructuredLogger, get_logger};
use crate::pricing::GasPriceRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Anything that can produce a fresh price record
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self) -> Result<GasPriceRecord>;

    /// Release held resources; must tolerate repeated calls
    async fn close(&mut self) {}
}

#[async_trait::async_trait]
impl PriceSource for PriceFetcher {
    async fn fetch(&self) -> Result<GasPriceRecord> {
        self.refresh().await
    }

    async fn close(&mut self) {
        self.shutdown();
    }
}

/// What subscribers see after each refresh attempt
#[derive(Debug, Clone, Default)]
pub struct CoordinatorSnapshot {
    /// Last successfully fetched record
    pub data: Option<Arc<GasPriceRecord>>,
    pub last_update_success: bool,
    /// Display form of the most recent failure, cleared on success
    pub last_error: Option<String>,
}

pub struct PriceCoordinator {
    source: Box<dyn PriceSource>,
    update_interval: Duration,
    state_tx: watch::Sender<CoordinatorSnapshot>,
    closed: bool,
    logger: StructuredLogger,
}

impl PriceCoordinator {
    pub fn new(source: Box<dyn PriceSource>, update_interval: Duration) -> Self {
        let (state_tx, _rx) = watch::channel(CoordinatorSnapshot::default());
        Self {
            source,
            update_interval,
            state_tx,
            closed: false,
            logger: get_logger("coordinator"),
        }
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Receiver for read-only snapshots
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorSnapshot> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> CoordinatorSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Latest successful record, possibly stale
    pub fn data(&self) -> Option<Arc<GasPriceRecord>> {
        self.state_tx.borrow().data.clone()
    }

    /// Run one refresh and publish its outcome
    pub async fn refresh(&mut self) -> Result<Arc<GasPriceRecord>> {
        match self.source.fetch().await {
            Ok(record) => {
                let record = Arc::new(record);
                self.state_tx.send_modify(|state| {
                    state.data = Some(record.clone());
                    state.last_update_success = true;
                    state.last_error = None;
                });
                Ok(record)
            }
            Err(e) => {
                self.logger
                    .warn(&format!("Refresh failed, keeping previous data: {}", e));
                let message = e.to_string();
                self.state_tx.send_modify(|state| {
                    state.last_update_success = false;
                    state.last_error = Some(message);
                });
                Err(e)
            }
        }
    }

    /// Refresh on every tick until `shutdown` turns true or its sender is dropped
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.update_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.logger.info(&format!(
            "Refreshing gas prices every {}s",
            self.update_interval.as_secs()
        ));

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    // Already logged and published; the next tick is the retry
                    let _ = self.refresh().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        self.shutdown().await;
    }

    /// Tear down the source; later calls do nothing
    pub async fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.source.close().await;
        self.logger.info("Coordinator shut down");
    }
}
