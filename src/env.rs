use std::collections::HashMap;

/// Key/value view of the environment used during startup.
///
/// Seeded once from the process environment and then extended by
/// [`crate::config::load_environment`]. Entries are only ever added or
/// overwritten, never removed, and nothing here writes back into the real
/// process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvStore {
    kv: HashMap<String, String>,
}

impl EnvStore {
    /// Snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are left out.
    pub fn from_process() -> Self {
        Self {
            kv: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.kv.get(key).map(|s| s.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.kv.contains_key(key)
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.kv.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.kv.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            kv: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
