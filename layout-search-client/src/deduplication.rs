use crate::layout::LayoutRecord;
use std::collections::HashSet;

/// Configuration for layout deduplication
#[derive(Clone, Debug)]
pub struct DeduplicationConfig {
    /// Whether deduplication is enabled
    pub enabled: bool,
}

impl Default for DeduplicationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl DeduplicationConfig {
    /// `redupe` is the user-facing switch: asking to see duplicates again
    /// turns the filter off.
    pub fn from_redupe(redupe: bool) -> Self {
        Self { enabled: !redupe }
    }
}

/// Drops layouts that share a title and creator with one already kept.
/// The first occurrence wins and the relative order of kept layouts is
/// unchanged.
#[derive(Clone, Debug, Default)]
pub struct LayoutDeduplicator {
    config: DeduplicationConfig,
}

impl LayoutDeduplicator {
    pub fn new(config: DeduplicationConfig) -> Self {
        Self { config }
    }

    pub fn filter(&self, records: Vec<LayoutRecord>) -> Vec<LayoutRecord> {
        self.filter_with_stats(records).0
    }

    pub fn filter_with_stats(
        &self,
        records: Vec<LayoutRecord>,
    ) -> (Vec<LayoutRecord>, DeduplicationStats) {
        let total = records.len();
        if !self.config.enabled {
            return (
                records,
                DeduplicationStats {
                    kept: total,
                    dropped: 0,
                },
            );
        }

        let mut seen = HashSet::with_capacity(total);
        let kept: Vec<_> = records
            .into_iter()
            .filter(|record| {
                let fresh = seen.insert(record.semantic_key());
                if !fresh {
                    log::debug!(
                        "Dropping duplicate layout {} ({:?} by {:?})",
                        record.id(),
                        record.title(),
                        record.creator()
                    );
                }
                fresh
            })
            .collect();

        let stats = DeduplicationStats {
            kept: kept.len(),
            dropped: total - kept.len(),
        };
        log::debug!("Deduplicated layouts: {:?}", stats);
        (kept, stats)
    }
}

/// Statistics for a single deduplication pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeduplicationStats {
    pub kept: usize,
    pub dropped: usize,
}

/// Deduplicate `records` unless `redupe` is set.
pub fn filter(records: Vec<LayoutRecord>, redupe: bool) -> Vec<LayoutRecord> {
    LayoutDeduplicator::new(DeduplicationConfig::from_redupe(redupe)).filter(records)
}
