//! Configuration loading and parsing.
//!
//! Parses `quill.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [history]
//! max_depth = 50
//!
//! [suggest]
//! max_results = 10
//! min_learn_len = 3
//!
//! [spell]
//! min_word_len = 3
//!
//! [dictionary]
//! seed_words = ["the", "editor"]
//! seed_file = "words.txt"
//! ```
//!
//! Every field is optional. A missing file yields defaults; a file that fails
//! to parse is reported under the `config` target and defaults are used.
//! Zero values are raised to 1 by [`Config::effective`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_max_depth")]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::default_max_depth(),
        }
    }
}

impl HistoryConfig {
    const fn default_max_depth() -> usize {
        50
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SuggestConfig {
    #[serde(default = "SuggestConfig::default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_min_word_len")]
    pub min_learn_len: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            max_results: Self::default_max_results(),
            min_learn_len: default_min_word_len(),
        }
    }
}

impl SuggestConfig {
    const fn default_max_results() -> usize {
        10
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SpellConfig {
    #[serde(default = "default_min_word_len")]
    pub min_word_len: usize,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            min_word_len: default_min_word_len(),
        }
    }
}

const fn default_min_word_len() -> usize {
    3
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct DictionaryConfig {
    #[serde(default)]
    pub seed_words: Vec<String>,
    /// Newline separated word list; relative paths resolve against the
    /// directory of the config file.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub spell: SpellConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,      // original file string (optional)
    pub file: ConfigFile,         // parsed (or default) data
    pub source: Option<PathBuf>,  // path the file was read from
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("quill.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join("quill.toml");
    }
    PathBuf::from("quill.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Copy of the parsed values with every size clamped to at least 1.
    pub fn effective(&self) -> ConfigFile {
        let mut file = self.file.clone();
        let clamps = [
            ("history.max_depth", &mut file.history.max_depth),
            ("suggest.max_results", &mut file.suggest.max_results),
            ("suggest.min_learn_len", &mut file.suggest.min_learn_len),
            ("spell.min_word_len", &mut file.spell.min_word_len),
        ];
        for (field, value) in clamps {
            if *value == 0 {
                info!(target: "config", field, raw = 0, clamped = 1, "config_value_clamped");
                *value = 1;
            }
        }
        file
    }

    /// Inline seed words followed by the contents of `seed_file`, if any.
    pub fn seed_words(&self) -> Result<Vec<String>> {
        let dict = &self.file.dictionary;
        let mut words = dict.seed_words.clone();
        if let Some(seed) = &dict.seed_file {
            let resolved = self.resolve(seed);
            let content = fs::read_to_string(&resolved)
                .with_context(|| format!("reading seed file {}", resolved.display()))?;
            words.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#'))
                    .map(str::to_string),
            );
        }
        Ok(words)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.source.as_deref().and_then(Path::parent) {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }
}
