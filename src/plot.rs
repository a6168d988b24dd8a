use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::model::{SeasonTable, Standing};

/// Scatter axes span from 90% of the smallest to 110% of the largest value.
const SCATTER_LOW_FACTOR: f64 = 0.9;
const SCATTER_HIGH_FACTOR: f64 = 1.1;
const SCATTER_BADGE_SIZE: f64 = 0.1;

const BAR_AXIS_HEADROOM: f64 = 1.2;
const BAR_BADGE_OFFSET: f64 = 0.01;
const BAR_BADGE_SIZE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlotMetric {
    Position,
    Played,
    Won,
    Drawn,
    Lost,
    GoalsFor,
    GoalsAgainst,
    GoalDifference,
    Points,
}

impl PlotMetric {
    /// Metrics offered for chart axis selection.
    pub const SELECTABLE: [PlotMetric; 6] = [
        PlotMetric::Won,
        PlotMetric::Drawn,
        PlotMetric::Lost,
        PlotMetric::GoalsFor,
        PlotMetric::GoalsAgainst,
        PlotMetric::Points,
    ];

    pub const DEFAULT_BAR: PlotMetric = PlotMetric::Points;
    pub const DEFAULT_SCATTER: (PlotMetric, PlotMetric) =
        (PlotMetric::GoalsFor, PlotMetric::GoalsAgainst);

    pub fn label(self) -> &'static str {
        match self {
            PlotMetric::Position => "Position",
            PlotMetric::Played => "Played",
            PlotMetric::Won => "Won",
            PlotMetric::Drawn => "Drawn",
            PlotMetric::Lost => "Lost",
            PlotMetric::GoalsFor => "Goals For",
            PlotMetric::GoalsAgainst => "Goals Against",
            PlotMetric::GoalDifference => "Goal Difference",
            PlotMetric::Points => "Points",
        }
    }
}

impl fmt::Display for PlotMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlotMetric {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "position" => Ok(PlotMetric::Position),
            "played" | "gp" => Ok(PlotMetric::Played),
            "won" | "w" => Ok(PlotMetric::Won),
            "drawn" | "d" => Ok(PlotMetric::Drawn),
            "lost" | "l" => Ok(PlotMetric::Lost),
            "goalsfor" | "gf" => Ok(PlotMetric::GoalsFor),
            "goalsagainst" | "ga" => Ok(PlotMetric::GoalsAgainst),
            "goaldifference" | "gd" => Ok(PlotMetric::GoalDifference),
            "points" | "pts" => Ok(PlotMetric::Points),
            _ => Err(format!("unknown plot metric {raw:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotRow {
    pub position: i64,
    pub club: String,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
}

impl PlotRow {
    fn from_standing(s: &Standing) -> Self {
        Self {
            position: s.rank,
            club: s.club.clone(),
            played: s.played,
            won: s.won,
            drawn: s.drawn,
            lost: s.lost,
            goals_for: s.goals_for,
            goals_against: s.goals_against,
            goal_difference: s.goal_difference(),
            points: s.points,
        }
    }

    pub fn value(&self, metric: PlotMetric) -> i64 {
        match metric {
            PlotMetric::Position => self.position,
            PlotMetric::Played => self.played,
            PlotMetric::Won => self.won,
            PlotMetric::Drawn => self.drawn,
            PlotMetric::Lost => self.lost,
            PlotMetric::GoalsFor => self.goals_for,
            PlotMetric::GoalsAgainst => self.goals_against,
            PlotMetric::GoalDifference => self.goal_difference,
            PlotMetric::Points => self.points,
        }
    }
}

/// Numeric projection of a season plus each club's badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotFrame {
    pub rows: Vec<PlotRow>,
    pub badges: BTreeMap<String, Option<String>>,
}

impl PlotFrame {
    fn observed(&self, metric: PlotMetric) -> Option<(i64, i64)> {
        let min = self.rows.iter().map(|r| r.value(metric)).min()?;
        let max = self.rows.iter().map(|r| r.value(metric)).max()?;
        Some((min, max))
    }

    fn badge(&self, club: &str) -> Option<String> {
        self.badges.get(club).cloned().flatten()
    }
}

pub fn project_plot(table: &SeasonTable) -> PlotFrame {
    let rows: Vec<PlotRow> = table.standings().map(PlotRow::from_standing).collect();
    let badges = table
        .standings()
        .map(|s| (s.club.clone(), s.badge_url.clone()))
        .collect();
    PlotFrame { rows, badges }
}

/// Visible range of one chart axis in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Scatter range: bounds scaled by 0.9 and 1.1 and truncated toward zero.
    pub fn scatter(data_min: i64, data_max: i64) -> Self {
        Self {
            min: (SCATTER_LOW_FACTOR * data_min as f64).trunc(),
            max: (SCATTER_HIGH_FACTOR * data_max as f64).trunc(),
        }
    }

    /// Maps a data value into paper space. Values outside the range fall
    /// outside [0, 1]; a zero-width range maps everything to its centre.
    pub fn to_paper(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() {
            return 0.5;
        }
        (value - self.min) / span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XAnchor {
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YAnchor {
    Middle,
    Bottom,
}

/// Where an overlay sits: chart-relative, or on a category at a data height.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "ref", rename_all = "snake_case")]
pub enum Placement {
    Paper { x: f64, y: f64 },
    Data { category: String, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeOverlay {
    pub club: String,
    pub source: Option<String>,
    pub placement: Placement,
    pub size_x: f64,
    pub size_y: f64,
    pub x_anchor: XAnchor,
    pub y_anchor: YAnchor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterLayout {
    pub x: PlotMetric,
    pub y: PlotMetric,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub badges: Vec<BadgeOverlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLayout {
    pub metric: PlotMetric,
    pub y_range: AxisRange,
    pub badges: Vec<BadgeOverlay>,
}

/// Badge positions for a scatter of `x` against `y`. `None` for no rows.
pub fn scatter_layout(frame: &PlotFrame, x: PlotMetric, y: PlotMetric) -> Option<ScatterLayout> {
    let (x_min, x_max) = frame.observed(x)?;
    let (y_min, y_max) = frame.observed(y)?;
    let x_range = AxisRange::scatter(x_min, x_max);
    let y_range = AxisRange::scatter(y_min, y_max);

    let badges = frame
        .rows
        .iter()
        .map(|row| BadgeOverlay {
            club: row.club.clone(),
            source: frame.badge(&row.club),
            placement: Placement::Paper {
                x: x_range.to_paper(row.value(x) as f64),
                y: y_range.to_paper(row.value(y) as f64),
            },
            size_x: SCATTER_BADGE_SIZE,
            size_y: SCATTER_BADGE_SIZE,
            x_anchor: XAnchor::Center,
            y_anchor: YAnchor::Middle,
        })
        .collect();

    Some(ScatterLayout {
        x,
        y,
        x_range,
        y_range,
        badges,
    })
}

/// Badge positions just above each bar of `metric`. `None` for no rows.
pub fn bar_layout(frame: &PlotFrame, metric: PlotMetric) -> Option<BarLayout> {
    let (_, max) = frame.observed(metric)?;
    let max = max as f64;
    let size = max * BAR_BADGE_SIZE;

    let badges = frame
        .rows
        .iter()
        .map(|row| BadgeOverlay {
            club: row.club.clone(),
            source: frame.badge(&row.club),
            placement: Placement::Data {
                category: row.club.clone(),
                y: row.value(metric) as f64 + max * BAR_BADGE_OFFSET,
            },
            size_x: size,
            size_y: size,
            x_anchor: XAnchor::Center,
            y_anchor: YAnchor::Bottom,
        })
        .collect();

    Some(BarLayout {
        metric,
        y_range: AxisRange {
            min: 0.0,
            max: max * BAR_AXIS_HEADROOM,
        },
        badges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_range_truncates_toward_zero() {
        let r = AxisRange::scatter(10, 50);
        assert_eq!(r.min, 9.0);
        assert_eq!(r.max, 55.0);
        assert!((r.to_paper(10.0) - 1.0 / 46.0).abs() < 1e-12);

        let r = AxisRange::scatter(7, 33);
        assert_eq!(r.min, 6.0); // 6.3
        assert_eq!(r.max, 36.0); // 36.3

        let r = AxisRange::scatter(-15, -3);
        assert_eq!(r.min, -13.0); // -13.5
        assert_eq!(r.max, -3.0); // -3.3
    }

    #[test]
    fn zero_width_range_maps_to_centre() {
        let r = AxisRange::scatter(0, 0);
        assert_eq!(r.to_paper(0.0), 0.5);
    }

    #[test]
    fn metric_names_parse() {
        assert_eq!("Goals For".parse::<PlotMetric>(), Ok(PlotMetric::GoalsFor));
        assert_eq!("gd".parse::<PlotMetric>(), Ok(PlotMetric::GoalDifference));
        assert!("xg".parse::<PlotMetric>().is_err());
    }
}
