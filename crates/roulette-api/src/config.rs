//! Server configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use roulette_game::config::GameConfig;

use crate::error::AppError;

/// Everything the server needs at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// PostgreSQL URL. Without one, games and catalogs live in memory.
    pub database_url: Option<String>,
    /// YAML file replacing the built-in catalog defaults.
    pub catalog_seed_path: Option<PathBuf>,
    /// Game tunables.
    pub game: GameConfig,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but unparsable.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but unparsable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = GameConfig::default();
        let game = GameConfig {
            max_attempts: parse(&lookup, "ROULETTE_MAX_ATTEMPTS")?
                .unwrap_or(defaults.max_attempts),
            advancement_threshold: parse(&lookup, "ROULETTE_ADVANCEMENT_THRESHOLD")?
                .unwrap_or(defaults.advancement_threshold),
            joker_probability: parse(&lookup, "ROULETTE_JOKER_PROBABILITY")?
                .unwrap_or(defaults.joker_probability),
            ..defaults
        };
        if !(0.0..=1.0).contains(&game.joker_probability) {
            return Err(AppError::Config(format!(
                "ROULETTE_JOKER_PROBABILITY must be between 0 and 1, got {}",
                game.joker_probability
            )));
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse(&lookup, "PORT")?.unwrap_or(3000),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            catalog_seed_path: lookup("CATALOG_SEED_PATH").map(PathBuf::from),
            game,
        })
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{key} is invalid ({raw:?}): {e}")))
        })
        .transpose()
}
