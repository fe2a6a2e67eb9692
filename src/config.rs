use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::dotenv::{self, Line};
use crate::env::EnvStore;
use crate::error::ConfigError;

/// What to do when the env file sets a key the environment already has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverridePolicy {
    /// Values already present win, and the first occurrence in the file wins.
    #[default]
    Preserve,
    /// File values replace existing ones, and the last occurrence in the file wins.
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub env_file: PathBuf,
    pub key_name: String,
    pub policy: OverridePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(".env"),
            key_name: "OPEN_AI_KEY".to_string(),
            policy: OverridePolicy::Preserve,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Loaded,
    #[default]
    Missing,
    /// The file exists but could not be opened or read to the end.
    Unreadable,
}

/// Outcome of a single [`load_environment`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub path: PathBuf,
    pub policy: OverridePolicy,
    pub file: FileStatus,
    /// Keys written into the store.
    pub applied: BTreeSet<String>,
    /// Keys found in the file but left alone because the store already had them.
    pub preserved: BTreeSet<String>,
    /// Number of lines that could not be parsed.
    pub skipped: usize,
}

/// A validated, non-empty API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First four characters followed by a mask, safe to print.
    pub fn preview(&self) -> String {
        if self.0.chars().count() <= 4 {
            return "****".to_string();
        }
        let head: String = self.0.chars().take(4).collect();
        format!("{head}****")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.preview())
    }
}

/// Reads `path` as a dotenv file and merges its pairs into `store`.
///
/// Never fails: a missing file, an unreadable file and malformed lines are
/// all recorded in the returned summary and logged, and the store keeps
/// whatever it already had. Pairs read before a mid-file I/O error stay
/// applied.
pub fn load_environment(store: &mut EnvStore, path: &Path, policy: OverridePolicy) -> LoadSummary {
    let mut summary = LoadSummary {
        path: path.to_path_buf(),
        policy,
        ..Default::default()
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("No env file at {}", path.display());
            summary.file = FileStatus::Missing;
            return summary;
        }
        Err(err) => {
            log::warn!("Could not open env file {}: {}", path.display(), err);
            summary.file = FileStatus::Unreadable;
            return summary;
        }
    };

    summary.file = FileStatus::Loaded;
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::warn!("Stopped reading env file {}: {}", path.display(), err);
                summary.file = FileStatus::Unreadable;
                break;
            }
        };

        let (key, value) = match dotenv::parse_line(&line) {
            Line::Ignored => continue,
            // line contents may hold secrets, only the position is logged
            Line::Malformed => {
                log::debug!("Skipping malformed line {} in {}", number + 1, path.display());
                summary.skipped += 1;
                continue;
            }
            Line::Pair { key, value } => (key, value),
        };

        if policy == OverridePolicy::Preserve && store.contains(key) {
            if !summary.applied.contains(key) {
                summary.preserved.insert(key.to_string());
            }
            continue;
        }
        let value = value.resolve(store);
        store.set(key, value);
        summary.applied.insert(key.to_string());
    }

    log::debug!(
        "Loaded {} ({} applied, {} preserved, {} skipped)",
        path.display(),
        summary.applied.len(),
        summary.preserved.len(),
        summary.skipped
    );
    summary
}

/// Returns the value of `name`, failing if it is absent or blank.
pub fn require_key(store: &EnvStore, name: &str) -> Result<ApiKey, ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::InvalidKeyName);
    }

    match store.get(name) {
        None => Err(ConfigError::MissingKey {
            name: name.to_string(),
        }),
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyKey {
            name: name.to_string(),
        }),
        Some(value) => Ok(ApiKey(value.to_string())),
    }
}

pub struct Bootstrap<C> {
    pub client: C,
    pub summary: LoadSummary,
    pub key_preview: String,
}

/// Load, validate, then hand the key to `configure`.
///
/// `configure` runs exactly once, and only after the key has been validated.
pub fn bootstrap<C, F>(
    settings: &Settings,
    store: &mut EnvStore,
    configure: F,
) -> Result<Bootstrap<C>, ConfigError>
where
    F: FnOnce(ApiKey) -> C,
{
    let summary = load_environment(store, &settings.env_file, settings.policy);
    let key = require_key(store, &settings.key_name)?;
    log::info!("Found {} ({})", settings.key_name, key.preview());

    let key_preview = key.preview();
    let client = configure(key);

    Ok(Bootstrap {
        client,
        summary,
        key_preview,
    })
}
