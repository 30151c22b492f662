use cpustat_core::PercentageVector;
use std::collections::VecDeque;

/// Number of bars of `bar_width` columns (plus a one-column gap) that fit in
/// `width_columns`.  Zero when not even one bar fits.
pub fn capacity_for(width_columns: u16, bar_width: u16) -> usize {
    width_columns as usize / (bar_width as usize + 1)
}

/// Rolling window of usage samples, oldest first, one entry per chart bar.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    samples: VecDeque<PercentageVector>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new sample as the newest entry.
    pub fn append(&mut self, sample: PercentageVector) {
        self.samples.push_back(sample);
    }

    /// Drop the oldest entries until at most `max_bars` remain.
    pub fn truncate(&mut self, max_bars: usize) {
        let excess = self.samples.len().saturating_sub(max_bars);
        self.samples.drain(..excess);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &PercentageVector> {
        self.samples.iter()
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<&PercentageVector> {
        self.samples.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> PercentageVector {
        vec![n as f64, 0.0, 100.0 - n as f64]
    }

    #[test]
    fn capacity_is_floor_division() {
        assert_eq!(capacity_for(80, 3), 20);
        assert_eq!(capacity_for(79, 3), 19);
        assert_eq!(capacity_for(3, 3), 0);
        assert_eq!(capacity_for(0, 1), 0);
    }

    #[test]
    fn keeps_newest_entries() {
        let mut history = HistoryBuffer::new();
        for n in 1..=20 {
            history.append(sample(n));
            history.truncate(10);
            assert!(history.len() <= 10);
        }

        let kept: Vec<_> = history.iter().cloned().collect();
        let expected: Vec<_> = (11..=20).map(sample).collect();
        assert_eq!(kept, expected);
        assert_eq!(history.latest(), Some(&sample(20)));
    }

    #[test]
    fn shrinking_truncates_and_growing_fabricates_nothing() {
        let mut history = HistoryBuffer::new();
        for n in 0..8 {
            history.append(sample(n));
        }

        history.truncate(5);
        assert_eq!(history.len(), 5);
        assert_eq!(history.iter().next(), Some(&sample(3)));

        history.truncate(50);
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn zero_capacity_empties() {
        let mut history = HistoryBuffer::new();
        history.append(sample(1));
        history.truncate(capacity_for(2, 3));
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
    }
}
