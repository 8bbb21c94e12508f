//! Localization counters.
//!
//! Observational only: nothing in the engine reads these back, so output
//! never depends on them.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global localization metrics singleton.
pub struct LocalizationMetrics {
    /// Number of top-level localize calls
    localize_calls: AtomicUsize,

    /// Number of field pairs collapsed into a single field
    pairs_merged: AtomicUsize,

    /// Number of primaries that had more than one secondary candidate
    ambiguous_pairings: AtomicUsize,

    /// Number of transforms aborted on a cyclic input
    cycles_detected: AtomicUsize,
}

static METRICS: OnceLock<LocalizationMetrics> = OnceLock::new();

impl LocalizationMetrics {
    /// Get the global metrics instance.
    pub fn global() -> &'static LocalizationMetrics {
        METRICS.get_or_init(|| LocalizationMetrics {
            localize_calls: AtomicUsize::new(0),
            pairs_merged: AtomicUsize::new(0),
            ambiguous_pairings: AtomicUsize::new(0),
            cycles_detected: AtomicUsize::new(0),
        })
    }

    pub fn record_localize_call(&self) {
        self.localize_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pair_merged(&self) {
        self.pairs_merged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ambiguous_pairing(&self) {
        self.ambiguous_pairings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cycle_detected(&self) {
        self.cycles_detected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn localize_calls(&self) -> usize {
        self.localize_calls.load(Ordering::Relaxed)
    }

    pub fn pairs_merged(&self) -> usize {
        self.pairs_merged.load(Ordering::Relaxed)
    }

    pub fn ambiguous_pairings(&self) -> usize {
        self.ambiguous_pairings.load(Ordering::Relaxed)
    }

    pub fn cycles_detected(&self) -> usize {
        self.cycles_detected.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let calls = self.localize_calls();
        let pairs = self.pairs_merged();
        let pairs_per_call = if calls > 0 {
            pairs as f64 / calls as f64
        } else {
            0.0
        };

        MetricsReport {
            localize_calls: calls,
            pairs_merged: pairs,
            pairs_per_call,
            ambiguous_pairings: self.ambiguous_pairings(),
            cycles_detected: self.cycles_detected(),
        }
    }
}

/// Snapshot of the localization counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub localize_calls: usize,
    pub pairs_merged: usize,
    /// Average merged pairs per localize call
    pub pairs_per_call: f64,
    pub ambiguous_pairings: usize,
    pub cycles_detected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counters are shared with every other test in the binary, so these
    // tests only assert on deltas.

    #[test]
    fn test_counters_increase() {
        let metrics = LocalizationMetrics::global();

        let before = metrics.report();
        metrics.record_localize_call();
        metrics.record_pair_merged();
        metrics.record_ambiguous_pairing();
        metrics.record_cycle_detected();
        let after = metrics.report();

        assert!(after.localize_calls > before.localize_calls);
        assert!(after.pairs_merged > before.pairs_merged);
        assert!(after.ambiguous_pairings > before.ambiguous_pairings);
        assert!(after.cycles_detected > before.cycles_detected);
    }

    #[test]
    fn test_report_ratio_is_finite() {
        let metrics = LocalizationMetrics::global();
        metrics.record_localize_call();
        let report = metrics.report();
        assert!(report.pairs_per_call.is_finite());
        assert!(report.pairs_per_call >= 0.0);
    }

    #[test]
    fn test_global_returns_same_instance() {
        let metrics1 = LocalizationMetrics::global();
        let metrics2 = LocalizationMetrics::global();
        assert!(std::ptr::eq(metrics1, metrics2));
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(LocalizationMetrics::global().report()).unwrap();
        assert!(json.get("pairs_merged").is_some());
        assert!(json.get("cycles_detected").is_some());
    }
}
