use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::model::RankConflict;

pub const PREMIER_LEAGUE_ID: u32 = 4328;
pub const DEFAULT_API_BASE: &str = "https://www.thesportsdb.com/api/v1/json/3";

const APP_DIR: &str = "pl_standings";
const DATA_FILE: &str = "data.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub league_id: u32,
    pub season_count: usize,
    pub api_base: String,
    pub data_path: PathBuf,
    pub rank_conflict: RankConflict,
    pub fetch_parallelism: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            league_id: PREMIER_LEAGUE_ID,
            season_count: 10,
            api_base: DEFAULT_API_BASE.to_string(),
            data_path: default_data_path(),
            rank_conflict: RankConflict::default(),
            fetch_parallelism: 4,
        }
    }
}

impl Config {
    /// Reads `STANDINGS_*` and `FETCH_PARALLELISM`, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] over an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rank_conflict = match non_empty("STANDINGS_RANK_CONFLICT") {
            Some(raw) => raw.parse::<RankConflict>().unwrap_or_else(|err| {
                warn!(%err, "ignoring STANDINGS_RANK_CONFLICT");
                defaults.rank_conflict
            }),
            None => defaults.rank_conflict,
        };
        Self {
            league_id: parse_value(non_empty("STANDINGS_LEAGUE_ID"))
                .unwrap_or(defaults.league_id),
            season_count: parse_value::<usize>(non_empty("STANDINGS_SEASON_COUNT"))
                .unwrap_or(defaults.season_count)
                .clamp(1, 50),
            api_base: non_empty("STANDINGS_API_BASE")
                .map(|base| base.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            data_path: non_empty("STANDINGS_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            rank_conflict,
            fetch_parallelism: parse_value::<usize>(non_empty("FETCH_PARALLELISM"))
                .unwrap_or(defaults.fetch_parallelism)
                .clamp(1, 16),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_value<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|v| v.trim().parse::<T>().ok())
}

fn default_data_path() -> PathBuf {
    app_cache_dir()
        .map(|dir| dir.join(DATA_FILE))
        .unwrap_or_else(|| PathBuf::from(DATA_FILE))
}

pub fn app_cache_dir() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Some(base) = env_non_empty("XDG_CACHE_HOME") {
        return Some(PathBuf::from(base).join(APP_DIR));
    }
    let home = env_non_empty("HOME")?;
    Some(PathBuf::from(home).join(".cache").join(APP_DIR))
}
