//! Title axis decider.

use regex::Regex;

use crate::axis::decider::Decider;

/// Scores cells by how *unlike* titles they look.
///
/// Row titles are prose ("Gross Rent", "Discount/Promotion"); data cells and
/// many date labels lead with digits. Each digit-led cell costs a point, so
/// every slice scores at or below zero and the least penalized slice wins.
/// A net-negative winner is legal; it only ever matters as a fallback, and
/// the decision combiner keeps the title axis off the date axis regardless.
pub struct TitleDecider {
    digit_prefix: Regex,
}

impl TitleDecider {
    pub fn new() -> TitleDecider {
        TitleDecider {
            digit_prefix: Regex::new(r"^\d+").expect("Regex compilation failure"),
        }
    }
}

impl Default for TitleDecider {
    fn default() -> Self {
        Self::new()
    }
}

impl Decider for TitleDecider {
    fn score_cell(&self, cell: &str) -> f64 {
        if cell.trim().is_empty() {
            return 0.0;
        }
        if self.digit_prefix.is_match(cell) { -1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::decider::AxisScan;

    #[test]
    fn digit_led_cells_are_penalized() {
        let decider = TitleDecider::new();
        assert_eq!(decider.score_cell("4500"), -1.0);
        assert_eq!(decider.score_cell("12/3/4"), -1.0);
        assert_eq!(decider.score_cell("$4,500"), 0.0);
        assert_eq!(decider.score_cell("Gross Rent"), 0.0);
        assert_eq!(decider.score_cell("JAN 17"), 0.0);
        assert_eq!(decider.score_cell(""), 0.0);
    }

    #[test]
    fn all_negative_slices_still_claim_an_axis() {
        let decider = TitleDecider::new();
        let slices = vec![vec!["1", "2"], vec!["3", "Net Income"]];
        let scan = AxisScan::run(&decider, &slices);
        assert!(scan.is_axis());
        assert_eq!(scan.top(), Some((1, -0.5)));
    }
}
