use blackjack_engine::game::{DEALER_STEP_MS, GameConfig, MAX_ROUNDS, NEXT_ROUND_MS};
use blackjack_engine::shoe::DEFAULT_DECKS;
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_SCORES_PATH: &str = "highscores.csv";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub decks: usize,
    pub rounds: u32,
    pub seed: Option<u64>,
    pub scores_path: String,
    pub dealer_step_ms: u64,
    pub next_round_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub decks: ValueSource,
    pub rounds: ValueSource,
    pub seed: ValueSource,
    pub scores_path: ValueSource,
    pub dealer_step_ms: ValueSource,
    pub next_round_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            decks: ValueSource::Default,
            rounds: ValueSource::Default,
            seed: ValueSource::Default,
            scores_path: ValueSource::Default,
            dealer_step_ms: ValueSource::Default,
            next_round_ms: ValueSource::Default,
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
            decks: DEFAULT_DECKS,
            rounds: MAX_ROUNDS,
            seed: None,
            scores_path: DEFAULT_SCORES_PATH.into(),
            dealer_step_ms: DEALER_STEP_MS,
            next_round_ms: NEXT_ROUND_MS,
        }
    }
}

impl Config {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            decks: self.decks,
            max_rounds: self.rounds,
            dealer_step_ms: self.dealer_step_ms,
            next_round_ms: self.next_round_ms,
            seed: self.seed,
            ..GameConfig::default()
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

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("BLACKJACK_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.decks {
            cfg.decks = v;
            sources.decks = ValueSource::File;
        }
        if let Some(v) = f.rounds {
            cfg.rounds = v;
            sources.rounds = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.scores_path {
            cfg.scores_path = v;
            sources.scores_path = ValueSource::File;
        }
        if let Some(v) = f.dealer_step_ms {
            cfg.dealer_step_ms = v;
            sources.dealer_step_ms = ValueSource::File;
        }
        if let Some(v) = f.next_round_ms {
            cfg.next_round_ms = v;
            sources.next_round_ms = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("BLACKJACK_SEED")
        && !seed.is_empty()
    {
        let seed = seed
            .parse()
            .map_err(|_| ConfigError::Invalid("seed must be an unsigned integer".into()))?;
        cfg.seed = Some(seed);
        sources.seed = ValueSource::Env;
    }
    if let Ok(decks) = std::env::var("BLACKJACK_DECKS")
        && !decks.is_empty()
    {
        cfg.decks = decks
            .parse()
            .map_err(|_| ConfigError::Invalid("decks must be an unsigned integer".into()))?;
        sources.decks = ValueSource::Env;
    }
    if let Ok(rounds) = std::env::var("BLACKJACK_ROUNDS")
        && !rounds.is_empty()
    {
        cfg.rounds = rounds
            .parse()
            .map_err(|_| ConfigError::Invalid("rounds must be an unsigned integer".into()))?;
        sources.rounds = ValueSource::Env;
    }
    if let Ok(path) = std::env::var("BLACKJACK_SCORES")
        && !path.is_empty()
    {
        cfg.scores_path = path;
        sources.scores_path = ValueSource::Env;
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
    decks: Option<usize>,
    #[serde(default)]
    rounds: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    scores_path: Option<String>,
    #[serde(default)]
    dealer_step_ms: Option<u64>,
    #[serde(default)]
    next_round_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.decks == 0 {
        return Err(ConfigError::Invalid("decks must be >= 1".into()));
    }
    if cfg.rounds == 0 {
        return Err(ConfigError::Invalid("rounds must be >= 1".into()));
    }
    if cfg.scores_path.trim().is_empty() {
        return Err(ConfigError::Invalid("scores_path cannot be empty".into()));
    }
    Ok(())
}
