//! Optional `opentelemetry` instrumentation. Excluded functionality (cross-router consensus, RTT
//! congestion control, ...) is a separate concern from ambient observability, so this is carried
//! regardless and is simply a no-op when absent.

#[cfg(feature = "metrics")]
use opentelemetry::KeyValue;
#[cfg(feature = "metrics")]
use opentelemetry::metrics::{Counter, Meter, UpDownCounter};

/// Counters for NACKs received/emitted by reason, Interests buffered/forwarded/dropped, and a
/// live up/down counter for active mitigation records.
///
/// Construct via [`StrategyMetrics::new`] when the `metrics` feature is enabled and an
/// `opentelemetry::metrics::Meter` is available; otherwise leave `Strategy`'s metrics handle as
/// `None` and every call below becomes a no-op.
#[derive(Clone)]
pub struct StrategyMetrics {
    #[cfg(feature = "metrics")]
    nacks_received: Counter<u64>,
    #[cfg(feature = "metrics")]
    nacks_emitted: Counter<u64>,
    #[cfg(feature = "metrics")]
    interests_buffered: Counter<u64>,
    #[cfg(feature = "metrics")]
    interests_forwarded: Counter<u64>,
    #[cfg(feature = "metrics")]
    interests_dropped: Counter<u64>,
    #[cfg(feature = "metrics")]
    active_records: UpDownCounter<i64>,
}

impl std::fmt::Debug for StrategyMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyMetrics").finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl StrategyMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            nacks_received: meter
                .u64_counter("ddos_nacks_received_total")
                .with_description("DDoS NACKs received, by reason")
                .build(),
            nacks_emitted: meter
                .u64_counter("ddos_nacks_emitted_total")
                .with_description("DDoS NACKs emitted as pushback, by reason")
                .build(),
            interests_buffered: meter
                .u64_counter("ddos_interests_buffered_total")
                .build(),
            interests_forwarded: meter
                .u64_counter("ddos_interests_forwarded_total")
                .build(),
            interests_dropped: meter
                .u64_counter("ddos_interests_dropped_total")
                .with_description("Buffered Interests dropped at tick drain because they exceeded the face's token budget")
                .build(),
            active_records: meter
                .i64_up_down_counter("ddos_active_mitigation_records")
                .build(),
        }
    }
}

#[cfg_attr(not(feature = "metrics"), allow(unused_variables))]
impl StrategyMetrics {
    pub(crate) fn nack_received(&self, reason: &str) {
        #[cfg(feature = "metrics")]
        self.nacks_received
            .add(1, &[KeyValue::new("reason", reason.to_string())]);
    }

    pub(crate) fn nack_emitted(&self, reason: &str) {
        #[cfg(feature = "metrics")]
        self.nacks_emitted
            .add(1, &[KeyValue::new("reason", reason.to_string())]);
    }

    pub(crate) fn interest_buffered(&self) {
        #[cfg(feature = "metrics")]
        self.interests_buffered.add(1, &[]);
    }

    pub(crate) fn interest_forwarded(&self, count: u64) {
        #[cfg(feature = "metrics")]
        self.interests_forwarded.add(count, &[]);
    }

    pub(crate) fn interests_dropped(&self, count: u64) {
        #[cfg(feature = "metrics")]
        self.interests_dropped.add(count, &[]);
    }

    pub(crate) fn record_created(&self) {
        #[cfg(feature = "metrics")]
        self.active_records.add(1, &[]);
    }

    pub(crate) fn record_erased(&self) {
        #[cfg(feature = "metrics")]
        self.active_records.add(-1, &[]);
    }
}
