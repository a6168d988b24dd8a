use pl_standings::model::{MatchResult, RankConflict, SeasonTable, Standing};
use pl_standings::plot::{
    AxisRange, Placement, PlotMetric, XAnchor, YAnchor, bar_layout, project_plot, scatter_layout,
};
use pl_standings::table_view::{Presentation, TableColumn, project_table};

fn standing(rank: i64, club: &str, goals_for: i64, goals_against: i64, points: i64) -> Standing {
    Standing {
        rank,
        club: club.to_string(),
        badge_url: Some(format!("https://badges.example/{club}.png")),
        points,
        played: 38,
        won: points / 3,
        drawn: points % 3,
        lost: 38 - points / 3 - points % 3,
        goals_for,
        goals_against,
        form: vec![MatchResult::Win, MatchResult::Loss, MatchResult::Draw],
    }
}

fn sample_table() -> SeasonTable {
    SeasonTable::from_standings(
        vec![
            standing(2, "Beta", 30, 20, 60),
            standing(1, "Alpha", 50, 10, 80),
            standing(3, "Gamma", 10, 45, 20),
        ],
        RankConflict::Reject,
    )
    .expect("unique ranks")
}

#[test]
fn table_rows_follow_rank_and_derive_goal_difference() {
    let view = project_table(&sample_table());
    let clubs: Vec<&str> = view.rows.iter().map(|r| r.club.name.as_str()).collect();
    assert_eq!(clubs, vec!["Alpha", "Beta", "Gamma"]);
    for row in &view.rows {
        assert_eq!(row.goal_difference, row.goals_for - row.goals_against);
    }
    assert_eq!(view.rows[2].goal_difference, -35);
    assert_eq!(
        view.rows[0].club.badge_url.as_deref(),
        Some("https://badges.example/Alpha.png")
    );
    assert_eq!(
        view.rows[0].form,
        vec![MatchResult::Win, MatchResult::Loss, MatchResult::Draw]
    );
}

#[test]
fn only_club_and_form_are_rich() {
    let view = project_table(&sample_table());
    let rich: Vec<TableColumn> = view
        .columns
        .iter()
        .filter(|c| c.presentation == Presentation::Rich)
        .map(|c| c.column)
        .collect();
    assert_eq!(rich, vec![TableColumn::Club, TableColumn::Form]);
    let headers: Vec<&str> = view.columns.iter().map(|c| c.header).collect();
    assert_eq!(headers[6..9], ["GF", "GA", "GD"]);
}

#[test]
fn plot_frame_keeps_numbers_and_maps_badges() {
    let frame = project_plot(&sample_table());
    assert_eq!(frame.rows.len(), 3);
    assert_eq!(frame.rows[0].position, 1);
    assert_eq!(frame.rows[0].goal_difference, 40);
    assert_eq!(
        frame.badges.get("Gamma").cloned().flatten().as_deref(),
        Some("https://badges.example/Gamma.png")
    );
    assert_eq!(frame.rows[1].value(PlotMetric::Points), 60);
}

#[test]
fn scatter_range_and_paper_coordinates() {
    let r = AxisRange::scatter(10, 50);
    assert_eq!((r.min, r.max), (9.0, 55.0));
    assert!((r.to_paper(10.0) - 0.0217).abs() < 1e-4);

    let frame = project_plot(&sample_table());
    let layout = scatter_layout(&frame, PlotMetric::GoalsFor, PlotMetric::GoalsAgainst).unwrap();
    assert_eq!((layout.x_range.min, layout.x_range.max), (9.0, 55.0));
    assert_eq!((layout.y_range.min, layout.y_range.max), (9.0, 49.0));

    let alpha = &layout.badges[0];
    assert_eq!(alpha.club, "Alpha");
    assert_eq!(alpha.x_anchor, XAnchor::Center);
    assert_eq!(alpha.y_anchor, YAnchor::Middle);
    assert_eq!(alpha.size_x, 0.1);
    let Placement::Paper { x, y } = alpha.placement else {
        panic!("scatter badges sit in paper space");
    };
    assert!((x - 41.0 / 46.0).abs() < 1e-12);
    assert!((y - 1.0 / 40.0).abs() < 1e-12);
}

#[test]
fn bar_badges_sit_above_each_bar() {
    let frame = project_plot(&sample_table());
    let layout = bar_layout(&frame, PlotMetric::Points).unwrap();
    assert!((layout.y_range.max - 96.0).abs() < 1e-9);
    assert_eq!(layout.y_range.min, 0.0);

    let beta = &layout.badges[1];
    assert_eq!(beta.y_anchor, YAnchor::Bottom);
    assert!((beta.size_x - 8.0).abs() < 1e-9);
    match &beta.placement {
        Placement::Data { category, y } => {
            assert_eq!(category, "Beta");
            assert!((y - 60.8).abs() < 1e-9);
        }
        other => panic!("unexpected placement {other:?}"),
    }
}

#[test]
fn empty_frame_has_no_layouts() {
    let frame = project_plot(&SeasonTable::default());
    assert!(bar_layout(&frame, PlotMetric::Points).is_none());
    assert!(scatter_layout(&frame, PlotMetric::Won, PlotMetric::Lost).is_none());
}
