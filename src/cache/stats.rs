//! Cache Statistics Module
//!
//! Tracks hits, the three kinds of misses, and swallowed write failures.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of the cache counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads for keys with no record
    pub misses_not_found: u64,
    /// Reads for records older than their TTL
    pub misses_expired: u64,
    /// Reads for records that could not be decoded
    pub misses_decode: u64,
    /// Writes the store rejected
    pub write_failures: u64,
}

impl CacheStats {
    // == Misses ==
    /// Total misses of any kind.
    pub fn misses(&self) -> u64 {
        self.misses_not_found + self.misses_expired + self.misses_decode
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Lock-free counters shared by every request.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses_not_found: AtomicU64,
    misses_expired: AtomicU64,
    misses_decode: AtomicU64,
    write_failures: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_not_found(&self) {
        self.misses_not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expired(&self) {
        self.misses_expired.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_decode(&self) {
        self.misses_decode.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write_failure(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses_not_found: self.misses_not_found.load(Ordering::Relaxed),
            misses_expired: self.misses_expired.load(Ordering::Relaxed),
            misses_decode: self.misses_decode.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StatsRecorder::default().snapshot();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_misses_sum_all_kinds() {
        let recorder = StatsRecorder::default();
        recorder.record_not_found();
        recorder.record_expired();
        recorder.record_decode();

        assert_eq!(recorder.snapshot().misses(), 3);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let recorder = StatsRecorder::default();
        recorder.record_hit();
        recorder.record_hit();
        recorder.record_hit();
        recorder.record_expired();

        assert_eq!(recorder.snapshot().hit_rate(), 0.75);
    }

    #[test]
    fn test_record_write_failure() {
        let recorder = StatsRecorder::default();
        recorder.record_write_failure();
        recorder.record_write_failure();

        let stats = recorder.snapshot();
        assert_eq!(stats.write_failures, 2);
        assert_eq!(stats.misses(), 0);
    }
}
