//! Conditional highlighting for the standings table.
//!
//! Rules are derived from a finished [`TableView`] and handed to the
//! renderer as an ordered list. The renderer applies them in order, so when
//! several rules match one cell the last one is what is seen.

use serde::Serialize;

use crate::table_view::{TableColumn, TableView};

/// Ranks strictly above this are in the relegation zone.
pub const RELEGATION_AFTER_RANK: i64 = 17;

/// Columns where the largest value is the best one.
pub const HIGHER_IS_BETTER: [TableColumn; 3] = [
    TableColumn::Won,
    TableColumn::GoalsFor,
    TableColumn::GoalDifference,
];

/// Columns where the smallest value is the best one.
pub const LOWER_IS_BETTER: [TableColumn; 2] = [TableColumn::Lost, TableColumn::GoalsAgainst];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Predicate {
    EqualsMax(i64),
    EqualsMin(i64),
    Positive,
    Negative,
    GreaterThan(i64),
}

impl Predicate {
    pub fn matches(self, value: i64) -> bool {
        match self {
            Predicate::EqualsMax(max) => value == max,
            Predicate::EqualsMin(min) => value == min,
            Predicate::Positive => value > 0,
            Predicate::Negative => value < 0,
            Predicate::GreaterThan(threshold) => value > threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Best,
    Worst,
    Positive,
    Negative,
    Relegation,
}

impl Highlight {
    pub fn color(self) -> &'static str {
        match self {
            Highlight::Best => "#FFD700",
            Highlight::Worst => "#D1D1D1",
            Highlight::Positive => "lightgreen",
            Highlight::Negative | Highlight::Relegation => "pink",
        }
    }

    pub fn rgb(self) -> u32 {
        match self {
            Highlight::Best => 0xFFD700,
            Highlight::Worst => 0xD1D1D1,
            Highlight::Positive => 0x90EE90,
            Highlight::Negative | Highlight::Relegation => 0xFFC0CB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StylingRule {
    pub column: TableColumn,
    pub predicate: Predicate,
    pub highlight: Highlight,
    pub color: &'static str,
}

impl StylingRule {
    pub fn applies(&self, column: TableColumn, value: i64) -> bool {
        self.column == column && self.predicate.matches(value)
    }
}

/// Derives the ordered rule list for a table.
///
/// Per tracked column the best rule comes before the worst rule. Goal
/// difference sign rules follow all best/worst rules, and the relegation
/// rule is last. Extremal rules are skipped for an empty table.
pub fn style_rules(view: &TableView) -> Vec<StylingRule> {
    let mut rules = Vec::new();

    for column in HIGHER_IS_BETTER {
        if let Some((min, max)) = extrema(view, column) {
            rules.push(rule(column, Predicate::EqualsMax(max), Highlight::Best));
            rules.push(rule(column, Predicate::EqualsMin(min), Highlight::Worst));
        }
    }
    for column in LOWER_IS_BETTER {
        if let Some((min, max)) = extrema(view, column) {
            rules.push(rule(column, Predicate::EqualsMin(min), Highlight::Best));
            rules.push(rule(column, Predicate::EqualsMax(max), Highlight::Worst));
        }
    }

    rules.push(rule(
        TableColumn::GoalDifference,
        Predicate::Positive,
        Highlight::Positive,
    ));
    rules.push(rule(
        TableColumn::GoalDifference,
        Predicate::Negative,
        Highlight::Negative,
    ));
    rules.push(rule(
        TableColumn::Position,
        Predicate::GreaterThan(RELEGATION_AFTER_RANK),
        Highlight::Relegation,
    ));
    rules
}

/// The highlight a cell ends up with: the last matching rule wins.
pub fn cell_highlight(
    rules: &[StylingRule],
    column: TableColumn,
    value: i64,
) -> Option<Highlight> {
    rules
        .iter()
        .rev()
        .find(|r| r.applies(column, value))
        .map(|r| r.highlight)
}

fn extrema(view: &TableView, column: TableColumn) -> Option<(i64, i64)> {
    let values = view.column_values(column);
    let min = values.iter().copied().min()?;
    let max = values.iter().copied().max()?;
    Some((min, max))
}

fn rule(column: TableColumn, predicate: Predicate, highlight: Highlight) -> StylingRule {
    StylingRule {
        column,
        predicate,
        highlight,
        color: highlight.color(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(Predicate::EqualsMax(5).matches(5));
        assert!(!Predicate::EqualsMax(5).matches(4));
        assert!(Predicate::Positive.matches(1));
        assert!(!Predicate::Positive.matches(0));
        assert!(!Predicate::Negative.matches(0));
        assert!(Predicate::GreaterThan(17).matches(18));
        assert!(!Predicate::GreaterThan(17).matches(17));
    }

    #[test]
    fn last_matching_rule_wins() {
        let rules = vec![
            rule(TableColumn::Won, Predicate::EqualsMax(3), Highlight::Best),
            rule(TableColumn::Won, Predicate::EqualsMin(3), Highlight::Worst),
        ];
        assert_eq!(cell_highlight(&rules, TableColumn::Won, 3), Some(Highlight::Worst));
        assert_eq!(cell_highlight(&rules, TableColumn::Won, 2), None);
        assert_eq!(cell_highlight(&rules, TableColumn::Lost, 3), None);
    }
}
