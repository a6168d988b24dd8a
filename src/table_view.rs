use serde::Serialize;

use crate::model::{MatchResult, SeasonTable, Standing};

/// Display columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableColumn {
    Position,
    Club,
    Played,
    Won,
    Drawn,
    Lost,
    GoalsFor,
    GoalsAgainst,
    GoalDifference,
    Points,
    Form,
}

impl TableColumn {
    pub const ALL: [TableColumn; 11] = [
        TableColumn::Position,
        TableColumn::Club,
        TableColumn::Played,
        TableColumn::Won,
        TableColumn::Drawn,
        TableColumn::Lost,
        TableColumn::GoalsFor,
        TableColumn::GoalsAgainst,
        TableColumn::GoalDifference,
        TableColumn::Points,
        TableColumn::Form,
    ];

    pub fn long_name(self) -> &'static str {
        match self {
            TableColumn::Position => "Position",
            TableColumn::Club => "Club",
            TableColumn::Played => "Played",
            TableColumn::Won => "Won",
            TableColumn::Drawn => "Drawn",
            TableColumn::Lost => "Lost",
            TableColumn::GoalsFor => "Goals For",
            TableColumn::GoalsAgainst => "Goals Against",
            TableColumn::GoalDifference => "Goal Difference",
            TableColumn::Points => "Points",
            TableColumn::Form => "Form",
        }
    }

    /// Header shown in the table: the glossary abbreviation where one
    /// exists, the long name otherwise.
    pub fn header(self) -> &'static str {
        GLOSSARY
            .iter()
            .find(|(long, _)| *long == self.long_name())
            .map(|(_, short)| *short)
            .unwrap_or(self.long_name())
    }

    pub fn presentation(self) -> Presentation {
        match self {
            TableColumn::Club | TableColumn::Form => Presentation::Rich,
            _ => Presentation::Plain,
        }
    }
}

/// Long column name to table abbreviation.
pub const GLOSSARY: [(&str, &str); 7] = [
    ("Played", "GP"),
    ("Won", "W"),
    ("Drawn", "D"),
    ("Lost", "L"),
    ("Goals For", "GF"),
    ("Goals Against", "GA"),
    ("Goal Difference", "GD"),
];

pub const HIGHLIGHT_LEGEND: &str = "The best value in columns W, L, GF, GA and GD is highlighted \
in gold and the worst value in gray. In column GD positive values are highlighted in green and \
negative values in red. In column Position clubs highlighted in red were relegated, or are at \
risk of relegation when the ongoing season is selected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    Plain,
    Rich,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMeta {
    pub column: TableColumn,
    pub header: &'static str,
    pub presentation: Presentation,
}

/// Club cell: name and badge kept apart for the renderer to compose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubLabel {
    pub name: String,
    pub badge_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub position: i64,
    pub club: ClubLabel,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
    pub form: Vec<MatchResult>,
}

impl TableRow {
    fn from_standing(s: &Standing) -> Self {
        Self {
            position: s.rank,
            club: ClubLabel {
                name: s.club.clone(),
                badge_url: s.badge_url.clone(),
            },
            played: s.played,
            won: s.won,
            drawn: s.drawn,
            lost: s.lost,
            goals_for: s.goals_for,
            goals_against: s.goals_against,
            goal_difference: s.goal_difference(),
            points: s.points,
            form: s.form.clone(),
        }
    }

    /// Numeric value of a column; `None` for the rich columns.
    pub fn value(&self, column: TableColumn) -> Option<i64> {
        match column {
            TableColumn::Position => Some(self.position),
            TableColumn::Played => Some(self.played),
            TableColumn::Won => Some(self.won),
            TableColumn::Drawn => Some(self.drawn),
            TableColumn::Lost => Some(self.lost),
            TableColumn::GoalsFor => Some(self.goals_for),
            TableColumn::GoalsAgainst => Some(self.goals_against),
            TableColumn::GoalDifference => Some(self.goal_difference),
            TableColumn::Points => Some(self.points),
            TableColumn::Club | TableColumn::Form => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// All values of one numeric column, in row order.
    pub fn column_values(&self, column: TableColumn) -> Vec<i64> {
        self.rows.iter().filter_map(|r| r.value(column)).collect()
    }
}

pub fn project_table(table: &SeasonTable) -> TableView {
    let columns = TableColumn::ALL
        .iter()
        .map(|&column| ColumnMeta {
            column,
            header: column.header(),
            presentation: column.presentation(),
        })
        .collect();
    let rows = table.standings().map(TableRow::from_standing).collect();
    TableView { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_use_glossary_abbreviations() {
        let headers: Vec<&str> = TableColumn::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            vec!["Position", "Club", "GP", "W", "D", "L", "GF", "GA", "GD", "Points", "Form"]
        );
    }

    #[test]
    fn goal_difference_sits_after_goals_against() {
        let ga = TableColumn::ALL
            .iter()
            .position(|c| *c == TableColumn::GoalsAgainst)
            .unwrap();
        assert_eq!(TableColumn::ALL[ga + 1], TableColumn::GoalDifference);
    }
}
