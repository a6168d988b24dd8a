use pl_standings::model::{RankConflict, SeasonTable, Standing};
use pl_standings::styling::{Highlight, Predicate, cell_highlight, style_rules};
use pl_standings::table_view::{TableColumn, TableView, project_table};

fn club(rank: i64, won: i64, lost: i64, goals_for: i64, goals_against: i64) -> Standing {
    Standing {
        rank,
        club: format!("Club {rank}"),
        badge_url: None,
        points: won * 3,
        played: won + lost,
        won,
        drawn: 0,
        lost,
        goals_for,
        goals_against,
        form: Vec::new(),
    }
}

fn build_view(rows: Vec<Standing>) -> TableView {
    let table = SeasonTable::from_standings(rows, RankConflict::Reject).expect("unique ranks");
    project_table(&table)
}

#[test]
fn extremes_with_ties_all_highlighted() {
    let view = build_view(vec![
        club(1, 5, 0, 10, 10),
        club(2, 3, 1, 10, 10),
        club(3, 3, 2, 10, 10),
        club(4, 1, 3, 10, 10),
    ]);
    let rules = style_rules(&view);

    let highlights: Vec<_> = view
        .rows
        .iter()
        .map(|row| cell_highlight(&rules, TableColumn::Won, row.won))
        .collect();
    assert_eq!(
        highlights,
        vec![Some(Highlight::Best), None, None, Some(Highlight::Worst)]
    );

    let tied = build_view(vec![club(1, 5, 0, 1, 0), club(2, 5, 0, 1, 0), club(3, 1, 4, 1, 0)]);
    let rules = style_rules(&tied);
    let best = tied
        .rows
        .iter()
        .filter(|row| cell_highlight(&rules, TableColumn::Won, row.won) == Some(Highlight::Best))
        .count();
    assert_eq!(best, 2);
}

#[test]
fn lower_is_better_columns_invert() {
    let view = build_view(vec![club(1, 9, 1, 30, 12), club(2, 4, 6, 20, 25)]);
    let rules = style_rules(&view);
    assert_eq!(cell_highlight(&rules, TableColumn::Lost, 1), Some(Highlight::Best));
    assert_eq!(cell_highlight(&rules, TableColumn::Lost, 6), Some(Highlight::Worst));
    assert_eq!(cell_highlight(&rules, TableColumn::GoalsAgainst, 12), Some(Highlight::Best));
    assert_eq!(cell_highlight(&rules, TableColumn::GoalsAgainst, 25), Some(Highlight::Worst));
}

#[test]
fn rule_order_is_fixed() {
    let view = build_view(vec![club(1, 9, 1, 30, 12), club(2, 4, 6, 20, 25)]);
    let order: Vec<_> = style_rules(&view)
        .iter()
        .map(|r| (r.column, r.highlight))
        .collect();
    assert_eq!(
        order,
        vec![
            (TableColumn::Won, Highlight::Best),
            (TableColumn::Won, Highlight::Worst),
            (TableColumn::GoalsFor, Highlight::Best),
            (TableColumn::GoalsFor, Highlight::Worst),
            (TableColumn::GoalDifference, Highlight::Best),
            (TableColumn::GoalDifference, Highlight::Worst),
            (TableColumn::Lost, Highlight::Best),
            (TableColumn::Lost, Highlight::Worst),
            (TableColumn::GoalsAgainst, Highlight::Best),
            (TableColumn::GoalsAgainst, Highlight::Worst),
            (TableColumn::GoalDifference, Highlight::Positive),
            (TableColumn::GoalDifference, Highlight::Negative),
            (TableColumn::Position, Highlight::Relegation),
        ]
    );
}

#[test]
fn single_club_matches_both_extremes() {
    let view = build_view(vec![club(1, 4, 2, 9, 6)]);
    let rules = style_rules(&view);

    let won: Vec<_> = rules
        .iter()
        .filter(|r| r.column == TableColumn::Won)
        .collect();
    assert_eq!(won[0].predicate, Predicate::EqualsMax(4));
    assert_eq!(won[1].predicate, Predicate::EqualsMin(4));
    assert!(won.iter().all(|r| r.predicate.matches(4)));

    // Worst is emitted after best, so it is what shows.
    assert_eq!(cell_highlight(&rules, TableColumn::Won, 4), Some(Highlight::Worst));
    assert_eq!(cell_highlight(&rules, TableColumn::Lost, 2), Some(Highlight::Worst));
    // Sign rules follow the extremal ones for goal difference.
    assert_eq!(
        cell_highlight(&rules, TableColumn::GoalDifference, 3),
        Some(Highlight::Positive)
    );
}

#[test]
fn goal_difference_sign_overrides_extremes() {
    let view = build_view(vec![
        club(1, 9, 1, 30, 12),
        club(2, 5, 5, 20, 20),
        club(3, 1, 9, 8, 30),
    ]);
    let rules = style_rules(&view);
    assert_eq!(
        cell_highlight(&rules, TableColumn::GoalDifference, 18),
        Some(Highlight::Positive)
    );
    assert_eq!(cell_highlight(&rules, TableColumn::GoalDifference, 0), None);
    assert_eq!(
        cell_highlight(&rules, TableColumn::GoalDifference, -22),
        Some(Highlight::Negative)
    );
}

#[test]
fn relegation_starts_at_eighteenth() {
    let view = build_view((1..=20).map(|rank| club(rank, 20 - rank, rank, 30, 30)).collect());
    let rules = style_rules(&view);
    let flagged: Vec<i64> = view
        .rows
        .iter()
        .filter(|row| {
            cell_highlight(&rules, TableColumn::Position, row.position)
                == Some(Highlight::Relegation)
        })
        .map(|row| row.position)
        .collect();
    assert_eq!(flagged, vec![18, 19, 20]);
}

#[test]
fn empty_table_has_only_fixed_rules() {
    let rules = style_rules(&build_view(Vec::new()));
    assert_eq!(rules.len(), 3);
    assert!(rules.iter().all(|r| !matches!(
        r.predicate,
        Predicate::EqualsMax(_) | Predicate::EqualsMin(_)
    )));
}
