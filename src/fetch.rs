use std::collections::BTreeMap;

use rayon::prelude::*;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::FetchError;
use crate::model::{RankConflict, SeasonTable};
use crate::normalize::normalize_record;
use crate::seasons::Season;

/// Anything that can hand back the raw club records for one season.
pub trait StandingsSource: Sync {
    fn fetch_season(&self, league_id: u32, season: &Season) -> Result<Vec<Value>, FetchError>;
}

/// TheSportsDB `lookuptable` endpoint.
pub struct SportsDbSource {
    client: &'static Client,
    api_base: String,
}

impl SportsDbSource {
    pub fn new(client: &'static Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    pub fn standings_url(&self, league_id: u32, season: &Season) -> String {
        format!("{}/lookuptable.php?l={league_id}&s={season}", self.api_base)
    }
}

impl StandingsSource for SportsDbSource {
    fn fetch_season(&self, league_id: u32, season: &Season) -> Result<Vec<Value>, FetchError> {
        let url = self.standings_url(league_id, season);
        info!(%season, %url, "fetching standings");
        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = resp.text()?;
        parse_table_json(&body)
    }
}

/// Extracts the `table` array from a standings response body.
///
/// A `null` body, a missing `table` or `"table": null` all mean no rows.
pub fn parse_table_json(raw: &str) -> Result<Vec<Value>, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let v: Value = serde_json::from_str(trimmed)?;
    Ok(v.get("table")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default())
}

#[derive(Debug, Default)]
pub struct FetchSummary {
    pub seasons_total: usize,
    pub tables: BTreeMap<Season, SeasonTable>,
    pub errors: Vec<String>,
}

impl FetchSummary {
    pub fn seasons_succeeded(&self) -> usize {
        self.tables.len()
    }
}

/// Fetches and normalizes every season independently.
///
/// A season that fails for any reason is logged and left out; the others
/// are unaffected. With `parallelism > 1` seasons are fetched on a rayon
/// pool of that size.
pub fn fetch_seasons(
    source: &dyn StandingsSource,
    league_id: u32,
    seasons: &[Season],
    policy: RankConflict,
    parallelism: usize,
) -> FetchSummary {
    let fetch_one = |season: &Season| {
        let result = fetch_season_table(source, league_id, season, policy);
        (season.clone(), result)
    };

    let results: Vec<(Season, Result<SeasonTable, FetchError>)> = if parallelism > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(parallelism).build() {
            Ok(pool) => pool.install(|| seasons.par_iter().map(fetch_one).collect()),
            Err(err) => {
                warn!(%err, "fetch pool unavailable, fetching sequentially");
                seasons.iter().map(fetch_one).collect()
            }
        }
    } else {
        seasons.iter().map(fetch_one).collect()
    };

    let mut summary = FetchSummary {
        seasons_total: seasons.len(),
        ..FetchSummary::default()
    };
    for (season, result) in results {
        match result {
            Ok(table) => {
                info!(%season, clubs = table.len(), "season standings ready");
                summary.tables.insert(season, table);
            }
            Err(FetchError::Empty) => {
                warn!(%season, "no standings found for season");
                summary.errors.push(format!("season {season}: {}", FetchError::Empty));
            }
            Err(err) => {
                error!(%season, %err, "failed to fetch season standings");
                summary.errors.push(format!("season {season}: {err}"));
            }
        }
    }
    summary
}

fn fetch_season_table(
    source: &dyn StandingsSource,
    league_id: u32,
    season: &Season,
    policy: RankConflict,
) -> Result<SeasonTable, FetchError> {
    let records = source.fetch_season(league_id, season)?;
    if records.is_empty() {
        return Err(FetchError::Empty);
    }
    let standings = records.iter().map(normalize_record);
    SeasonTable::from_standings(standings, policy)
}
