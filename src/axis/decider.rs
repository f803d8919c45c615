//! Generic slice scoring shared by all deciders.

/// Per-cell scoring contract.
///
/// A decider looks at one cell at a time; [`AxisScan`] handles averaging over
/// a slice (one row or one column) and picking the winners.
pub trait Decider {
    /// Score a single cell. Higher means "more like this decider's label".
    fn score_cell(&self, cell: &str) -> f64;

    /// Whether `top_score` is good enough for the winning slices to claim an
    /// axis. The default accepts anything non-negative, which lets a decider
    /// win by being the least bad candidate.
    fn qualifies(&self, top_score: f64) -> bool {
        top_score >= 0.0
    }
}

/// The result of scoring every slice of one orientation (all rows, or all
/// columns) with one decider.
#[derive(Debug, Clone)]
pub struct AxisScan {
    /// Mean cell score per slice, in slice order.
    pub entries_scores: Vec<f64>,
    /// Indices of every slice sharing the maximum score, if that maximum
    /// qualifies. Empty means this orientation does not claim the axis.
    pub top_indexes: Vec<usize>,
}

impl AxisScan {
    /// Score `slices` with `decider`.
    pub fn run<D: Decider>(decider: &D, slices: &[Vec<&str>]) -> AxisScan {
        let entries_scores: Vec<f64> = slices
            .iter()
            .map(|slice| {
                if slice.is_empty() {
                    return 0.0;
                }
                let sum: f64 = slice.iter().map(|cell| decider.score_cell(cell)).sum();
                sum / slice.len() as f64
            })
            .collect();

        let mut top_indexes = Vec::new();
        let top_score = entries_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !entries_scores.is_empty() && decider.qualifies(top_score) {
            top_indexes = entries_scores
                .iter()
                .enumerate()
                .filter(|(_, s)| **s == top_score)
                .map(|(i, _)| i)
                .collect();
        }

        AxisScan {
            entries_scores,
            top_indexes,
        }
    }

    /// Whether this orientation claims the axis.
    pub fn is_axis(&self) -> bool {
        !self.top_indexes.is_empty()
    }

    /// Winning slice index and its score, if any. Ties resolve to the first
    /// winning slice.
    pub fn top(&self) -> Option<(usize, f64)> {
        let index = *self.top_indexes.first()?;
        Some((index, self.entries_scores[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DigitCounter;

    impl Decider for DigitCounter {
        fn score_cell(&self, cell: &str) -> f64 {
            cell.chars().filter(char::is_ascii_digit).count() as f64
        }
    }

    struct Strict;

    impl Decider for Strict {
        fn score_cell(&self, _cell: &str) -> f64 {
            0.0
        }

        fn qualifies(&self, top_score: f64) -> bool {
            top_score > 0.0
        }
    }

    #[test]
    fn scores_are_slice_means() {
        let slices = vec![vec!["1", "23"], vec!["", "x"]];
        let scan = AxisScan::run(&DigitCounter, &slices);
        assert_eq!(scan.entries_scores, vec![1.5, 0.0]);
        assert_eq!(scan.top_indexes, vec![0]);
        assert_eq!(scan.top(), Some((0, 1.5)));
    }

    #[test]
    fn ties_keep_every_winner_in_order() {
        let slices = vec![vec!["12"], vec!["34"], vec!["5"]];
        let scan = AxisScan::run(&DigitCounter, &slices);
        assert_eq!(scan.top_indexes, vec![0, 1]);
        assert_eq!(scan.top(), Some((0, 2.0)));
    }

    #[test]
    fn strict_threshold_rejects_zero_maxima() {
        let slices = vec![vec!["a"], vec!["b"]];
        assert!(AxisScan::run(&DigitCounter, &slices).is_axis());
        assert!(!AxisScan::run(&Strict, &slices).is_axis());
    }

    #[test]
    fn empty_input_claims_nothing() {
        let scan = AxisScan::run(&DigitCounter, &[]);
        assert!(!scan.is_axis());
        assert_eq!(scan.top(), None);
    }
}
