use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::StoreError;
use crate::fetch::{StandingsSource, fetch_seasons};
use crate::model::{MatchResult, SeasonTable, Standing, form_to_string};
use crate::normalize::UNKNOWN_CLUB;
use crate::seasons::{Season, recent_seasons_now};

/// On-disk shape of one club record. Keys match the historical `data.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredClub {
    #[serde(default)]
    club: Option<String>,
    badge_url: Option<String>,
    points: i64,
    #[serde(default)]
    form: Option<String>,
    played: i64,
    won: i64,
    drawn: i64,
    lost: i64,
    #[serde(rename = "goals for")]
    goals_for: i64,
    #[serde(rename = "goals against")]
    goals_against: i64,
}

type StoredDocument = BTreeMap<Season, BTreeMap<i64, StoredClub>>;

impl StoredClub {
    fn from_standing(s: &Standing) -> Self {
        Self {
            club: Some(s.club.clone()),
            badge_url: s.badge_url.clone(),
            points: s.points,
            form: Some(form_to_string(&s.form)),
            played: s.played,
            won: s.won,
            drawn: s.drawn,
            lost: s.lost,
            goals_for: s.goals_for,
            goals_against: s.goals_against,
        }
    }

    fn into_standing(self, season: &Season, rank: i64) -> Standing {
        let club = self.club.unwrap_or_else(|| {
            warn!(
                %season,
                rank,
                field = "club",
                default = UNKNOWN_CLUB,
                "stored club name is null"
            );
            UNKNOWN_CLUB.to_string()
        });
        let form = match self.form {
            Some(raw) => raw.chars().filter_map(MatchResult::from_char).collect(),
            None => {
                warn!(
                    %season,
                    rank,
                    field = "form",
                    "stored form is null, using empty sequence"
                );
                Vec::new()
            }
        };
        Standing {
            rank,
            club,
            badge_url: self.badge_url,
            points: self.points,
            played: self.played,
            won: self.won,
            drawn: self.drawn,
            lost: self.lost,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            form,
        }
    }
}

/// Reads the whole season document.
pub fn load_document(path: &Path) -> Result<BTreeMap<Season, SeasonTable>, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let doc: StoredDocument = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut out = BTreeMap::new();
    for (season, clubs) in doc {
        let by_rank = clubs
            .into_iter()
            .map(|(rank, club)| (rank, club.into_standing(&season, rank)))
            .collect();
        out.insert(season, SeasonTable::from_ranked(by_rank));
    }
    Ok(out)
}

/// Writes the whole season document, replacing any previous one.
pub fn save_document(
    path: &Path,
    tables: &BTreeMap<Season, SeasonTable>,
) -> Result<(), StoreError> {
    let doc: StoredDocument = tables
        .iter()
        .map(|(season, table)| {
            let clubs = table
                .standings()
                .map(|s| (s.rank, StoredClub::from_standing(s)))
                .collect();
            (season.clone(), clubs)
        })
        .collect();

    let json = serde_json::to_string_pretty(&doc).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            action: "create directory for",
            path: path.to_path_buf(),
            source,
        })?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|source| StoreError::Io {
        action: "write",
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Io {
        action: "swap",
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Season-keyed standings, built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SeasonStore {
    tables: BTreeMap<Season, SeasonTable>,
    /// Per-season failures from the fetch cycle that built this store, if any.
    fetch_errors: Vec<String>,
}

impl SeasonStore {
    /// Loads the persisted document unless `refresh` is set or it cannot be
    /// read, in which case a fetch cycle runs and the result is written back.
    pub fn load_or_fetch(config: &Config, source: &dyn StandingsSource, refresh: bool) -> Self {
        let path = config.data_path.as_path();
        if !refresh {
            match load_document(path) {
                Ok(tables) => {
                    info!(path = %path.display(), seasons = tables.len(), "loaded season document");
                    return Self {
                        tables,
                        fetch_errors: Vec::new(),
                    };
                }
                Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    info!(path = %path.display(), "no season document, fetching");
                }
                Err(err) => {
                    warn!(%err, "season document unusable, fetching");
                }
            }
        }

        let seasons = recent_seasons_now(config.season_count);
        let summary = fetch_seasons(
            source,
            config.league_id,
            &seasons,
            config.rank_conflict,
            config.fetch_parallelism,
        );
        info!(
            succeeded = summary.seasons_succeeded(),
            total = summary.seasons_total,
            policy = %config.rank_conflict,
            "fetch cycle complete"
        );

        if summary.tables.is_empty() {
            warn!(
                path = %path.display(),
                "fetch cycle returned no seasons, document left untouched"
            );
        } else {
            match save_document(path, &summary.tables) {
                Ok(()) => info!(path = %path.display(), "season document saved"),
                Err(err) => warn!(%err, "failed to save season document, keeping data in memory"),
            }
        }
        Self {
            tables: summary.tables,
            fetch_errors: summary.errors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Seasons most recent first.
    pub fn seasons(&self) -> Vec<&Season> {
        self.tables.keys().rev().collect()
    }

    pub fn latest(&self) -> Option<(&Season, &SeasonTable)> {
        self.tables.iter().next_back()
    }

    pub fn get(&self, season: &Season) -> Option<&SeasonTable> {
        self.tables.get(season)
    }

    pub fn tables(&self) -> &BTreeMap<Season, SeasonTable> {
        &self.tables
    }

    pub fn fetch_errors(&self) -> &[String] {
        &self.fetch_errors
    }
}
