//! Ordered threshold tables
//!
//! A table maps the lower bound of each tier to a value. Lookups binary
//! search for the highest threshold that is `<=` the input, so a value sitting
//! exactly on a threshold belongs to the higher tier.

#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable<T: 'static> {
    steps: &'static [(u64, T)],
}

impl<T: Copy> ThresholdTable<T> {
    /// `steps` must be sorted by strictly ascending threshold.
    pub const fn new(steps: &'static [(u64, T)]) -> Self {
        Self { steps }
    }

    /// Value of the tier containing `input`, or `None` below the first threshold.
    pub fn lookup(&self, input: u64) -> Option<T> {
        let idx = self.steps.partition_point(|(threshold, _)| *threshold <= input);
        idx.checked_sub(1).map(|i| self.steps[i].1)
    }

    /// Lowest threshold in the table.
    pub fn floor(&self) -> u64 {
        self.steps.first().map(|(threshold, _)| *threshold).unwrap_or(0)
    }

    pub fn steps(&self) -> &'static [(u64, T)] {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: ThresholdTable<u32> = ThresholdTable::new(&[(10, 1), (50, 2), (100, 3)]);

    #[test]
    fn test_lookup_below_floor() {
        assert_eq!(TABLE.lookup(0), None);
        assert_eq!(TABLE.lookup(9), None);
        assert_eq!(TABLE.floor(), 10);
    }

    #[test]
    fn test_exact_threshold_goes_to_higher_tier() {
        assert_eq!(TABLE.lookup(10), Some(1));
        assert_eq!(TABLE.lookup(49), Some(1));
        assert_eq!(TABLE.lookup(50), Some(2));
        assert_eq!(TABLE.lookup(100), Some(3));
        assert_eq!(TABLE.lookup(u64::MAX), Some(3));
    }
}
