use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use movies_core::Rules;

pub const DEFAULT_DATASET_URL: &str =
    "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/arrangemovies-9U0YLeWUMSIOOnmXSP8KzDMmoOVeHv.csv";

#[derive(Clone, Debug)]
pub struct Config {
    pub dataset_url: String,
    /// Local CSV file, used instead of `dataset_url` when set.
    pub dataset_path: Option<PathBuf>,
    /// Where the round cursor is persisted between runs.
    pub state_path: PathBuf,
    pub round_seconds: u32,
    pub starting_score: u32,
    pub penalty_per_second: u32,
    pub feedback_seconds: u32,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let rules = Rules::default();
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            dataset_path: None,
            state_path: PathBuf::from("data/order_of_movies.bin"),
            round_seconds: rules.round_seconds,
            starting_score: rules.starting_score,
            penalty_per_second: rules.penalty_per_second,
            feedback_seconds: rules.feedback_seconds,
            http_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dataset_url: env::var("MOVIES_DATASET_URL").unwrap_or(defaults.dataset_url),
            dataset_path: env::var("MOVIES_DATASET_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            state_path: env::var("MOVIES_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_path),
            round_seconds: var_or("ROUND_SECONDS", defaults.round_seconds),
            starting_score: var_or("STARTING_SCORE", defaults.starting_score),
            penalty_per_second: var_or("PENALTY_PER_SECOND", defaults.penalty_per_second),
            feedback_seconds: var_or("FEEDBACK_SECONDS", defaults.feedback_seconds),
            http_timeout_secs: var_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
        }
    }

    pub fn rules(&self) -> Rules {
        Rules {
            round_seconds: self.round_seconds,
            starting_score: self.starting_score,
            penalty_per_second: self.penalty_per_second,
            feedback_seconds: self.feedback_seconds,
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when
/// it is unset or unparseable.
fn var_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
