use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::error::FetchError;

/// One result in a club's recent form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Self::Win),
            'D' => Some(Self::Draw),
            'L' => Some(Self::Loss),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Win => 'W',
            Self::Draw => 'D',
            Self::Loss => 'L',
        }
    }
}

pub fn form_to_string(form: &[MatchResult]) -> String {
    form.iter().map(|r| r.as_char()).collect()
}

/// One club's record for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: i64,
    pub club: String,
    pub badge_url: Option<String>,
    pub points: i64,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    /// Oldest first, as received.
    pub form: Vec<MatchResult>,
}

impl Standing {
    /// Saturates instead of overflowing on out-of-range upstream counts.
    pub fn goal_difference(&self) -> i64 {
        self.goals_for.saturating_sub(self.goals_against)
    }
}

/// How to treat two records claiming the same rank within a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankConflict {
    KeepFirst,
    #[default]
    KeepLast,
    Reject,
}

impl FromStr for RankConflict {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "keep-first" | "first" => Ok(Self::KeepFirst),
            "keep-last" | "last" => Ok(Self::KeepLast),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown rank conflict policy {other:?}")),
        }
    }
}

impl fmt::Display for RankConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::KeepFirst => "keep-first",
            Self::KeepLast => "keep-last",
            Self::Reject => "reject",
        };
        f.write_str(label)
    }
}

/// Standings for one season keyed by rank. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeasonTable {
    by_rank: BTreeMap<i64, Standing>,
}

impl SeasonTable {
    pub fn from_standings(
        standings: impl IntoIterator<Item = Standing>,
        policy: RankConflict,
    ) -> Result<Self, FetchError> {
        let mut by_rank: BTreeMap<i64, Standing> = BTreeMap::new();
        for standing in standings {
            let rank = standing.rank;
            if let Some(existing) = by_rank.get(&rank) {
                match policy {
                    RankConflict::Reject => return Err(FetchError::RankConflict { rank }),
                    RankConflict::KeepFirst => {
                        warn!(
                            rank,
                            kept = %existing.club,
                            dropped = %standing.club,
                            "duplicate rank"
                        );
                        continue;
                    }
                    RankConflict::KeepLast => {
                        warn!(
                            rank,
                            kept = %standing.club,
                            dropped = %existing.club,
                            "duplicate rank"
                        );
                    }
                }
            }
            by_rank.insert(rank, standing);
        }
        Ok(Self::from_ranked(by_rank))
    }

    /// Builds a table from standings already keyed by rank, such as a
    /// persisted document whose keys are unique by construction.
    pub fn from_ranked(by_rank: BTreeMap<i64, Standing>) -> Self {
        let table = Self { by_rank };
        if !table.ranks_are_contiguous() {
            warn!(
                clubs = table.len(),
                "ranks do not form a contiguous range starting at 1"
            );
        }
        table
    }

    pub fn len(&self) -> usize {
        self.by_rank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_rank.is_empty()
    }

    pub fn get(&self, rank: i64) -> Option<&Standing> {
        self.by_rank.get(&rank)
    }

    /// Standings in ascending rank order.
    pub fn standings(&self) -> impl Iterator<Item = &Standing> {
        self.by_rank.values()
    }

    pub fn ranks_are_contiguous(&self) -> bool {
        self.by_rank
            .keys()
            .enumerate()
            .all(|(idx, rank)| *rank == idx as i64 + 1)
    }
}
