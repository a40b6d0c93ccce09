use madcards_engine::game::GameConfig;
use madcards_engine::player::{MAX_PLAYERS, MIN_PLAYERS};
use madcards_engine::rules::ChaosCadence;
use madcards_server::{DEFAULT_HOST, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "MADCARDS_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub players: usize,
    pub seed: Option<u64>,
    pub chaos_cadence: ChaosCadence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub host: ValueSource,
    pub port: ValueSource,
    pub players: ValueSource,
    pub seed: ValueSource,
    pub chaos_cadence: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            host: ValueSource::Default,
            port: ValueSource::Default,
            players: ValueSource::Default,
            seed: ValueSource::Default,
            chaos_cadence: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            players: MAX_PLAYERS,
            seed: None,
            chaos_cadence: ChaosCadence::default(),
        }
    }
}

impl Config {
    /// Game settings for one session; everything not configurable here keeps
    /// its engine default.
    pub fn game(&self) -> GameConfig {
        GameConfig {
            seed: self.seed,
            chaos_cadence: self.chaos_cadence,
            ..GameConfig::with_players(self.players)
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `MADCARDS_CONFIG`, then
/// `MADCARDS_*` environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.host {
            cfg.host = v;
            sources.host = ValueSource::File;
        }
        if let Some(v) = f.port {
            cfg.port = v;
            sources.port = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.chaos_cadence {
            cfg.chaos_cadence = v;
            sources.chaos_cadence = ValueSource::File;
        }
    }

    if let Ok(host) = std::env::var("MADCARDS_HOST")
        && !host.is_empty()
    {
        cfg.host = host;
        sources.host = ValueSource::Env;
    }
    if let Ok(port) = std::env::var("MADCARDS_PORT")
        && !port.is_empty()
    {
        cfg.port = port
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid port".into()))?;
        sources.port = ValueSource::Env;
    }
    if let Ok(players) = std::env::var("MADCARDS_PLAYERS")
        && !players.is_empty()
    {
        cfg.players = players
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid players".into()))?;
        sources.players = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var("MADCARDS_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(cadence) = std::env::var("MADCARDS_CHAOS_CADENCE")
        && !cadence.is_empty()
    {
        cfg.chaos_cadence = cadence.parse().map_err(ConfigError::Invalid)?;
        sources.chaos_cadence = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    chaos_cadence: Option<ChaosCadence>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&cfg.players) {
        return Err(ConfigError::Invalid(format!(
            "players must be between {} and {}",
            MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    if cfg.host.trim().is_empty() {
        return Err(ConfigError::Invalid("host must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_game_matches_engine_defaults() {
        let game = Config::default().game();
        assert_eq!(game, GameConfig::default());
    }

    #[test]
    fn game_carries_players_seed_and_cadence() {
        let cfg = Config {
            players: 2,
            seed: Some(9),
            chaos_cadence: ChaosCadence::Once,
            ..Config::default()
        };
        let game = cfg.game();
        assert_eq!(game.players, 2);
        assert_eq!(game.seed, Some(9));
        assert_eq!(game.chaos_cadence, ChaosCadence::Once);
    }

    #[test]
    fn validate_rejects_player_count_out_of_range() {
        let cfg = Config {
            players: 5,
            ..Config::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(err.to_string(), "players must be between 2 and 4");
    }

    #[test]
    fn file_config_accepts_partial_tables() {
        let f: FileConfig = toml::from_str("players = 3\nchaos_cadence = \"once\"\n").unwrap();
        assert_eq!(f.players, Some(3));
        assert_eq!(f.chaos_cadence, Some(ChaosCadence::Once));
        assert!(f.host.is_none());
    }
}
