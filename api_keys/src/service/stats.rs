use db::models::key::{ApiKey, KeyStatus};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeyStats {
    pub total: usize,
    pub active: usize,
    pub total_usage: u64,
}

/// Totals over the whole key set, ignoring search and filters.
pub fn key_stats(records: &[ApiKey]) -> KeyStats {
    records.iter().fold(KeyStats::default(), |mut stats, r| {
        stats.total += 1;
        if r.status == KeyStatus::Active {
            stats.active += 1;
        }
        stats.total_usage = stats.total_usage.saturating_add(r.usage);
        stats
    })
}
