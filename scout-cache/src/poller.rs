//! Periodic sampling of cache metrics for display surfaces.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use scout_core::traits::MetricsSource;
use scout_core::types::UsageMetrics;

use crate::config::PollerConfig;

/// Samples a [`MetricsSource`] on a fixed interval and republishes the
/// snapshot to every subscriber.
///
/// Read-only: polling never changes the counters it reads. Dropping the poller
/// aborts its task; [`MetricsPoller::stop`] ends it gracefully.
pub struct MetricsPoller {
    latest: watch::Receiver<UsageMetrics>,
    shutdown: broadcast::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl MetricsPoller {
    /// Spawns the sampling task on the current tokio runtime.
    ///
    /// Samples every [`PollerConfig::period`]; a zero interval runs at
    /// [`MIN_POLL_INTERVAL`](crate::MIN_POLL_INTERVAL).
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(source: Arc<dyn MetricsSource>, config: PollerConfig) -> Self {
        let (tx, latest) = watch::channel(source.metrics());
        let (shutdown, mut shutdown_rx) = broadcast::channel(1);
        if config.interval.is_zero() {
            warn!("Zero metrics poll interval, using the minimum");
        }
        let period = config.period();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!(interval_ms = period.as_millis() as u64, "Metrics poller started");

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!("Metrics poller received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        tx.send_replace(source.metrics());
                    }
                }
            }
        });

        Self {
            latest,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Returns a receiver that observes every published snapshot.
    ///
    /// `changed()` on the receiver fails once the poller has stopped.
    pub fn subscribe(&self) -> watch::Receiver<UsageMetrics> {
        self.latest.clone()
    }

    /// Returns the most recently published snapshot.
    pub fn latest(&self) -> UsageMetrics {
        *self.latest.borrow()
    }

    /// Returns true while the sampling task is alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops sampling and waits for the task to exit.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Metrics poller task ended abnormally");
            }
        }
    }
}

impl Drop for MetricsPoller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResultCache;
    use scout_core::types::{Query, ResultRecord};
    use std::time::Duration;
    use tokio::time::timeout;

    fn poller_config() -> PollerConfig {
        PollerConfig::default().with_interval(Duration::from_millis(1000))
    }

    async fn wait_for(rx: &mut watch::Receiver<UsageMetrics>, expected: UsageMetrics) {
        timeout(Duration::from_secs(10), async {
            loop {
                if *rx.borrow_and_update() == expected {
                    return;
                }
                rx.changed().await.unwrap();
            }
        })
        .await
        .expect("snapshot never published");
    }

    async fn wait_closed(rx: &mut watch::Receiver<UsageMetrics>) {
        timeout(Duration::from_secs(10), async { while rx.changed().await.is_ok() {} })
            .await
            .expect("poller still publishing");
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_cache_metrics() {
        let cache: Arc<ResultCache> = Arc::new(ResultCache::new());
        let poller = MetricsPoller::start(cache.clone(), poller_config());
        let mut rx = poller.subscribe();

        let query = Query::new().with("role", "angel");
        cache.get(&query);
        cache.set(&query, vec![ResultRecord::new("a")]);
        cache.get(&query);

        wait_for(&mut rx, UsageMetrics { hits: 1, misses: 1, size: 1 }).await;
        assert_eq!(poller.latest(), UsageMetrics { hits: 1, misses: 1, size: 1 });
        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_snapshot_available() {
        let cache: Arc<ResultCache> = Arc::new(ResultCache::new());
        cache.get(&Query::new());

        let poller = MetricsPoller::start(cache.clone(), poller_config());
        assert_eq!(poller.latest().misses, 1);
        assert!(poller.is_running());
        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_leaves_counters_alone() {
        let cache: Arc<ResultCache> = Arc::new(ResultCache::new());
        let query = Query::new().with("stage", "seed");
        cache.set(&query, vec![ResultRecord::new("a")]);
        cache.get(&query);
        let before = cache.metrics();

        for _ in 0..3 {
            let poller = MetricsPoller::start(cache.clone(), poller_config());
            tokio::time::sleep(Duration::from_millis(2500)).await;
            poller.stop().await;
        }

        assert_eq!(cache.metrics(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_keeps_polling() {
        let cache: Arc<ResultCache> = Arc::new(ResultCache::new());
        let config = PollerConfig::default().with_interval(Duration::ZERO);
        let poller = MetricsPoller::start(cache.clone(), config);
        let mut rx = poller.subscribe();

        cache.get(&Query::new().with("role", "angel"));
        wait_for(&mut rx, UsageMetrics { hits: 0, misses: 1, size: 0 }).await;
        assert!(poller.is_running());
        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_closes_subscribers() {
        let cache: Arc<ResultCache> = Arc::new(ResultCache::new());
        let poller = MetricsPoller::start(cache, poller_config());
        let mut rx = poller.subscribe();

        poller.stop().await;
        wait_closed(&mut rx).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let cache: Arc<ResultCache> = Arc::new(ResultCache::new());
        let poller = MetricsPoller::start(cache, poller_config());
        let mut rx = poller.subscribe();

        drop(poller);
        wait_closed(&mut rx).await;
    }
}
