//! # Exchange-Rate Refresh
//!
//! Periodically pulls a [`RateSnapshot`] from a [`RateSource`] and hands it
//! to a sink. The bundled [`StaticRateSource`] returns fixed quotes; it
//! exists so the display has something to show, and conversion never
//! depends on it.
//!
//! The refresher is fire-and-forget: a failed fetch is logged and the next
//! tick tries again. Nothing here retries, cancels mid-fetch, or blocks.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default refresh period (5 minutes).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// A displayed quote such as `USD/CNY 7.25`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub pair: String,
    pub value: f64,
}

/// Quotes captured at one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub quotes: Vec<RateQuote>,
    pub captured_at: DateTime<Local>,
}

impl RateSnapshot {
    /// Capture time as `H:MM`.
    pub fn updated_label(&self) -> String {
        self.captured_at.format("%-H:%M").to_string()
    }
}

#[derive(Debug)]
pub enum RateError {
    /// The source could not produce a snapshot right now.
    Unavailable(String),
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateError::Unavailable(msg) => write!(f, "rates unavailable: {msg}"),
        }
    }
}

impl std::error::Error for RateError {}

#[async_trait]
pub trait RateSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<RateSnapshot, RateError>;
}

/// Fixed quotes against CNY.
pub struct StaticRateSource;

const STATIC_QUOTES: &[(&str, f64)] = &[
    ("USD/CNY", 7.25),
    ("EUR/CNY", 7.85),
    ("GBP/CNY", 9.12),
    ("JPY/CNY", 0.048),
];

#[async_trait]
impl RateSource for StaticRateSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<RateSnapshot, RateError> {
        Ok(RateSnapshot {
            quotes: STATIC_QUOTES
                .iter()
                .map(|(pair, value)| RateQuote {
                    pair: (*pair).to_string(),
                    value: *value,
                })
                .collect(),
            captured_at: Local::now(),
        })
    }
}

/// A background job that can be started and stopped.
pub trait ScheduledTask {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Receives each snapshot the refresher produces.
pub type SnapshotSink = Arc<dyn Fn(RateSnapshot) + Send + Sync>;

/// Runs `source.fetch()` right away and then once per `interval`.
///
/// `start` must be called from within a tokio runtime.
pub struct RateRefresher {
    source: Arc<dyn RateSource>,
    interval: Duration,
    sink: SnapshotSink,
    handle: Option<JoinHandle<()>>,
}

impl RateRefresher {
    pub fn new(source: Arc<dyn RateSource>, interval: Duration, sink: SnapshotSink) -> Self {
        Self {
            source,
            // tokio's interval panics on a zero period
            interval: interval.max(Duration::from_millis(1)),
            sink,
            handle: None,
        }
    }
}

impl ScheduledTask for RateRefresher {
    fn start(&mut self) {
        if self.is_running() {
            return;
        }
        info!(
            "Starting rate refresh from '{}' every {}s",
            self.source.name(),
            self.interval.as_secs()
        );

        let source = self.source.clone();
        let sink = self.sink.clone();
        let period = self.interval;

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                match source.fetch().await {
                    Ok(snapshot) => {
                        debug!("Fetched {} quote(s)", snapshot.quotes.len());
                        sink(snapshot);
                    }
                    Err(e) => warn!("Rate refresh failed: {}", e),
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Stopped rate refresh");
        }
    }

    fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RateRefresher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_sink() -> (SnapshotSink, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let sink: SnapshotSink = Arc::new(move |_snapshot: RateSnapshot| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (sink, count)
    }

    struct FailingSource;

    #[async_trait]
    impl RateSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self) -> Result<RateSnapshot, RateError> {
            Err(RateError::Unavailable("offline".into()))
        }
    }

    #[tokio::test]
    async fn test_static_source_quotes() {
        let snapshot = StaticRateSource.fetch().await.unwrap();
        assert_eq!(snapshot.quotes.len(), 4);
        assert_eq!(snapshot.quotes[0].pair, "USD/CNY");
        assert_eq!(snapshot.quotes[0].value, 7.25);
        assert_eq!(snapshot.quotes[3].value, 0.048);
    }

    #[tokio::test]
    async fn test_refresher_fires_immediately_and_repeats() {
        let (sink, count) = counting_sink();
        let mut refresher =
            RateRefresher::new(Arc::new(StaticRateSource), Duration::from_millis(20), sink);

        refresher.start();
        assert!(refresher.is_running());
        tokio::time::sleep(Duration::from_millis(70)).await;
        refresher.stop();

        assert!(count.load(Ordering::SeqCst) >= 2);
        assert!(!refresher.is_running());
    }

    #[tokio::test]
    async fn test_stop_halts_delivery() {
        let (sink, count) = counting_sink();
        let mut refresher =
            RateRefresher::new(Arc::new(StaticRateSource), Duration::from_millis(10), sink);

        refresher.start();
        tokio::time::sleep(Duration::from_millis(30)).await;
        refresher.stop();
        // Let any in-flight abort settle before sampling
        tokio::time::sleep(Duration::from_millis(5)).await;
        let after_stop = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn test_double_start_keeps_one_task() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let seen = delivered.clone();
        let sink: SnapshotSink = Arc::new(move |snapshot: RateSnapshot| {
            seen.lock().unwrap().push(snapshot.captured_at);
        });
        let mut refresher =
            RateRefresher::new(Arc::new(StaticRateSource), Duration::from_secs(60), sink);

        refresher.start();
        refresher.start();
        tokio::time::sleep(Duration::from_millis(30)).await;
        refresher.stop();

        // Only the immediate first tick of a single task
        assert_eq!(delivered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_do_not_reach_sink() {
        let (sink, count) = counting_sink();
        let mut refresher =
            RateRefresher::new(Arc::new(FailingSource), Duration::from_millis(10), sink);

        refresher.start();
        tokio::time::sleep(Duration::from_millis(35)).await;
        assert!(refresher.is_running());
        refresher.stop();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let (sink, _) = counting_sink();
        let refresher = RateRefresher::new(Arc::new(StaticRateSource), Duration::ZERO, sink);
        assert_eq!(refresher.interval, Duration::from_millis(1));
    }

    #[test]
    fn test_updated_label_format() {
        use chrono::TimeZone;
        let snapshot = RateSnapshot {
            quotes: Vec::new(),
            captured_at: Local.with_ymd_and_hms(2024, 3, 9, 8, 5, 0).single().unwrap(),
        };
        assert_eq!(snapshot.updated_label(), "8:05");
    }
}
