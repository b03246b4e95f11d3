//! Cache statistics.

/// Counters for monitoring how reads are being served.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Total `read()` calls
    pub reads: u64,
    /// Reads answered with resolved data
    pub hits: u64,
    /// Reads answered with a stored failure
    pub failures_served: u64,
    /// Network fetches started
    pub fetches_started: u64,
    /// Reads that suspended on a fetch someone else started
    pub coalesced: u64,
    /// Calls to `clear()`
    pub clears: u64,
}

impl CacheStats {
    /// Returns the hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        if self.reads == 0 {
            0.0
        } else {
            self.hits as f64 / self.reads as f64
        }
    }

    /// Reads that had to suspend, whether they started the fetch or not.
    pub fn suspensions(&self) -> u64 {
        self.fetches_started + self.coalesced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_ratio_empty() {
        assert_eq!(CacheStats::default().hit_ratio(), 0.0);
    }

    #[test]
    fn test_hit_ratio() {
        let stats = CacheStats {
            reads: 4,
            hits: 3,
            fetches_started: 1,
            ..Default::default()
        };
        assert!((stats.hit_ratio() - 0.75).abs() < 0.001);
        assert_eq!(stats.suspensions(), 1);
    }
}
