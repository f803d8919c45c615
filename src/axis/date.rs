//! Date axis decider.

use regex::Regex;

use crate::axis::decider::Decider;

const MONTHS_FULL: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const MONTHS_ABBR: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Scores cells by how strongly they resemble date labels.
///
/// A cell earns points for each matching pattern: 1 for a match anywhere,
/// 2 when the match starts the cell. Patterns cover unformatted dates
/// (`1/5/2017`) and month-name forms (`SEP 17`, `totals through May 2018`),
/// case-insensitively, with each distinct month name counted once ("may" is
/// both a full name and an abbreviation).
pub struct DateDecider {
    patterns: Vec<Regex>,
}

impl DateDecider {
    pub fn new() -> DateDecider {
        let mut patterns = vec![Regex::new(r"(\d+/\d+/\d+)").expect("Regex compilation failure")];
        for month in Self::month_names() {
            for template in [format!(r"(?i)({month} \d+)"), format!(r"(?i)(.*{month}.*)")] {
                patterns.push(Regex::new(&template).expect("Regex compilation failure"));
            }
        }
        DateDecider { patterns }
    }

    fn month_names() -> impl Iterator<Item = &'static str> {
        MONTHS_FULL
            .into_iter()
            .chain(MONTHS_ABBR.into_iter().filter(|m| !MONTHS_FULL.contains(m)))
    }

    fn score_pattern(pattern: &Regex, cell: &str) -> f64 {
        match pattern.find(cell) {
            Some(found) if found.start() == 0 => 2.0,
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}

impl Default for DateDecider {
    fn default() -> Self {
        Self::new()
    }
}

impl Decider for DateDecider {
    fn score_cell(&self, cell: &str) -> f64 {
        if cell.trim().is_empty() {
            return 0.0;
        }
        self.patterns
            .iter()
            .map(|p| Self::score_pattern(p, cell))
            .sum()
    }

    /// Dates must score strictly positively: a sheet with no date-like token
    /// anywhere has no date axis at all.
    fn qualifies(&self, top_score: f64) -> bool {
        top_score > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_label_scores_prefix_points_twice() {
        let decider = DateDecider::new();
        // "(jan \d+)" and "(.*jan.*)" both anchor at the start.
        assert_eq!(decider.score_cell("JAN 17"), 4.0);
        assert_eq!(decider.score_cell("jan 2017"), 4.0);
    }

    #[test]
    fn embedded_month_scores_lower_than_leading_month() {
        let decider = DateDecider::new();
        // "(september \d+)" matches mid-cell (1) vs. at the start (2);
        // "(.*september.*)" and "(.*sep.*)" anchor at the start either way.
        let embedded = decider.score_cell("totals through September 2018");
        let leading = decider.score_cell("September 2018");
        assert!(embedded < leading);
        assert_eq!(embedded, 5.0);
        assert_eq!(leading, 6.0);
    }

    #[test]
    fn unformatted_date_scores() {
        let decider = DateDecider::new();
        assert_eq!(decider.score_cell("1/5/2017"), 2.0);
        assert_eq!(decider.score_cell("due 1/5/2017"), 1.0);
    }

    #[test]
    fn non_dates_score_zero() {
        let decider = DateDecider::new();
        assert_eq!(decider.score_cell(""), 0.0);
        assert_eq!(decider.score_cell("   "), 0.0);
        assert_eq!(decider.score_cell("4500"), 0.0);
        assert_eq!(decider.score_cell("Gross Rent"), 0.0);
    }
}
