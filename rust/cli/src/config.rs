use gamemory_engine::cards::default_symbols;
use gamemory_engine::config::{DEFAULT_MESSAGE_DELAY_MS, DEFAULT_RESOLVE_DELAY_MS, GameConfig};
use crate::validation::check_dimension;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub rows: usize,
    pub cols: usize,
    pub resolve_delay_ms: u64,
    pub message_delay_ms: u64,
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
    pub seed: ValueSource,
    pub rows: ValueSource,
    pub cols: ValueSource,
    pub resolve_delay_ms: ValueSource,
    pub message_delay_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            rows: ValueSource::Default,
            cols: ValueSource::Default,
            resolve_delay_ms: ValueSource::Default,
            message_delay_ms: ValueSource::Default,
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
            seed: None,
            rows: 4,
            cols: 4,
            resolve_delay_ms: DEFAULT_RESOLVE_DELAY_MS,
            message_delay_ms: DEFAULT_MESSAGE_DELAY_MS,
        }
    }
}

impl Config {
    /// Applies command-line flags on top of the resolved values.
    pub fn with_overrides(
        mut self,
        seed: Option<u64>,
        rows: Option<usize>,
        cols: Option<usize>,
    ) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(r) = rows {
            self.rows = r;
        }
        if let Some(c) = cols {
            self.cols = c;
        }
        self
    }

    /// Engine configuration for this grid. Grids with as many cells as the
    /// stock image set use those images; other sizes get generated keys.
    pub fn game_config(&self) -> GameConfig {
        let symbols = default_symbols();
        let mut game = if self.rows.saturating_mul(self.cols) == symbols.len() * 2 {
            GameConfig {
                rows: self.rows,
                cols: self.cols,
                symbols,
                ..GameConfig::default()
            }
        } else {
            GameConfig::with_grid(self.rows, self.cols)
        };
        game.resolve_delay_ms = self.resolve_delay_ms;
        game.message_delay_ms = self.message_delay_ms;
        game
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
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("GAMEMORY_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.rows {
            cfg.rows = dimension(v, "rows")?;
            sources.rows = ValueSource::File;
        }
        if let Some(v) = f.cols {
            cfg.cols = dimension(v, "cols")?;
            sources.cols = ValueSource::File;
        }
        if let Some(v) = f.resolve_delay_ms {
            cfg.resolve_delay_ms = v;
            sources.resolve_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.message_delay_ms {
            cfg.message_delay_ms = v;
            sources.message_delay_ms = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("GAMEMORY_SEED") {
        cfg.seed = Some(parse_env(&seed, "seed")?);
        sources.seed = ValueSource::Env;
    }
    if let Some(rows) = env_value("GAMEMORY_ROWS") {
        cfg.rows = dimension(parse_env(&rows, "rows")?, "rows")?;
        sources.rows = ValueSource::Env;
    }
    if let Some(cols) = env_value("GAMEMORY_COLS") {
        cfg.cols = dimension(parse_env(&cols, "cols")?, "cols")?;
        sources.cols = ValueSource::Env;
    }
    if let Some(ms) = env_value("GAMEMORY_RESOLVE_DELAY_MS") {
        cfg.resolve_delay_ms = parse_env(&ms, "resolve delay")?;
        sources.resolve_delay_ms = ValueSource::Env;
    }
    if let Some(ms) = env_value("GAMEMORY_MESSAGE_DELAY_MS") {
        cfg.message_delay_ms = parse_env(&ms, "message delay")?;
        sources.message_delay_ms = ValueSource::Env;
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
    seed: Option<u64>,
    #[serde(default)]
    rows: Option<usize>,
    #[serde(default)]
    cols: Option<usize>,
    #[serde(default)]
    resolve_delay_ms: Option<u64>,
    #[serde(default)]
    message_delay_ms: Option<u64>,
}

/// Rejects grids the engine cannot deal.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.game_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn dimension(n: usize, what: &str) -> Result<usize, ConfigError> {
    check_dimension(n).map_err(|e| ConfigError::Invalid(format!("Invalid {}: {}", what, e)))
}

fn parse_env<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const KEYS: [&str; 6] = [
        "GAMEMORY_CONFIG",
        "GAMEMORY_SEED",
        "GAMEMORY_ROWS",
        "GAMEMORY_COLS",
        "GAMEMORY_RESOLVE_DELAY_MS",
        "GAMEMORY_MESSAGE_DELAY_MS",
    ];

    fn clear_env() {
        for key in KEYS {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_when_nothing_is_set() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.rows, ValueSource::Default);
        assert_eq!(resolved.sources.seed, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 5\nrows = 2\ncols = 4\nresolve_delay_ms = 10").unwrap();
        unsafe {
            std::env::set_var("GAMEMORY_CONFIG", file.path());
            std::env::set_var("GAMEMORY_SEED", "9");
        }
        let resolved = load_with_sources().unwrap();
        clear_env();

        assert_eq!(resolved.config.seed, Some(9));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.config.rows, 2);
        assert_eq!(resolved.sources.rows, ValueSource::File);
        assert_eq!(resolved.config.resolve_delay_ms, 10);
        assert_eq!(resolved.sources.message_delay_ms, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn rejects_unparsable_env_value() {
        clear_env();
        unsafe {
            std::env::set_var("GAMEMORY_ROWS", "four");
        }
        let result = load_with_sources();
        clear_env();
        match result {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("rows")),
            other => panic!("expected invalid rows, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn rejects_odd_grid() {
        clear_env();
        unsafe {
            std::env::set_var("GAMEMORY_ROWS", "3");
            std::env::set_var("GAMEMORY_COLS", "3");
        }
        let result = load_with_sources();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn rejects_oversized_env_grid() {
        clear_env();
        unsafe {
            std::env::set_var("GAMEMORY_ROWS", "18446744073709551615");
            std::env::set_var("GAMEMORY_COLS", "2");
        }
        let result = load_with_sources();
        clear_env();
        match result {
            Err(ConfigError::Invalid(msg)) => {
                assert!(msg.starts_with("Invalid rows:"), "{}", msg);
                assert!(msg.contains("supported 64"));
            }
            other => panic!("expected invalid rows, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn rejects_oversized_file_grid() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = 2\ncols = 100000").unwrap();
        unsafe {
            std::env::set_var("GAMEMORY_CONFIG", file.path());
        }
        let result = load_with_sources();
        clear_env();
        match result {
            Err(ConfigError::Invalid(msg)) => assert!(msg.starts_with("Invalid cols:"), "{}", msg),
            other => panic!("expected invalid cols, got {:?}", other),
        }
    }

    #[test]
    fn oversized_grid_fails_validation() {
        let cfg = Config {
            rows: usize::MAX,
            cols: 2,
            ..Config::default()
        };
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn flags_override_resolved_values() {
        let cfg = Config::default().with_overrides(Some(3), Some(2), None);
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.rows, 2);
        assert_eq!(cfg.cols, 4);
        let unchanged = Config::default().with_overrides(None, None, None);
        assert_eq!(unchanged, Config::default());
    }

    #[test]
    fn stock_grid_uses_image_symbols() {
        let game = Config::default().game_config();
        assert_eq!(game.symbols, default_symbols());

        let small = Config {
            rows: 2,
            cols: 3,
            ..Config::default()
        }
        .game_config();
        assert_eq!(small.symbols.len(), 3);
        assert!(small.validate().is_ok());
    }
}
