use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// First month (1-based) that belongs to a new season.
const SEASON_START_MONTH: u32 = 8;

/// A league cycle identified as `"YYYY-YYYY"`. Ordered by start year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Season {
    start: i32,
}

impl Season {
    pub fn starting(start: i32) -> Self {
        Self { start }
    }

    pub fn start_year(&self) -> i32 {
        self.start
    }

    pub fn end_year(&self) -> i32 {
        self.start + 1
    }

    /// The season in progress (or most recently started) on `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start = if date.month() >= SEASON_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self { start }
    }
}

impl Ord for Season {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start)
    }
}

impl PartialOrd for Season {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end_year())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid season identifier {0:?}, expected YYYY-YYYY")]
pub struct SeasonParseError(pub String);

impl FromStr for Season {
    type Err = SeasonParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let err = || SeasonParseError(raw.to_string());
        let (start, end) = trimmed.split_once('-').ok_or_else(err)?;
        if start.len() != 4 || end.len() != 4 {
            return Err(err());
        }
        let start = start.parse::<i32>().map_err(|_| err())?;
        let end = end.parse::<i32>().map_err(|_| err())?;
        if end != start + 1 {
            return Err(err());
        }
        Ok(Self { start })
    }
}

impl TryFrom<String> for Season {
    type Error = SeasonParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.to_string()
    }
}

/// The `count` most recent seasons relative to `today`, most recent first.
pub fn recent_seasons(today: NaiveDate, count: usize) -> Vec<Season> {
    let current = Season::containing(today);
    (0..count)
        .map(|back| Season::starting(current.start - back as i32))
        .collect()
}

pub fn recent_seasons_now(count: usize) -> Vec<Season> {
    recent_seasons(Local::now().date_naive(), count)
}
