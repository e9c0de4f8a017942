//! Environment snapshot and merge rules

use crate::error::{AnalysisError, Result};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A single configuration key/value pair. The key is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    key: String,
    value: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(AnalysisError::InvalidKey(key));
        }
        Ok(ConfigEntry {
            key,
            value: value.into(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Which side wins when a source file entry collides with an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Entries from the source file overwrite existing values
    #[default]
    FileWins,
    /// Existing values are kept; the file only fills in missing keys
    AmbientWins,
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "file-wins" => Ok(MergePolicy::FileWins),
            "ambient" | "ambient-wins" | "env" => Ok(MergePolicy::AmbientWins),
            _ => Err(format!(
                "Invalid precedence: {}. Valid values are: file, ambient",
                s
            )),
        }
    }
}

/// Every configuration entry currently visible to the process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    entries: BTreeMap<String, String>,
}

impl EnvSnapshot {
    pub fn new() -> Self {
        EnvSnapshot::default()
    }

    /// Capture the process environment. Variables whose name or value is
    /// not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge one entry under the given policy.
    /// Returns true when the snapshot changed.
    pub fn merge(&mut self, entry: ConfigEntry, policy: MergePolicy) -> bool {
        match policy {
            MergePolicy::AmbientWins if self.entries.contains_key(&entry.key) => false,
            _ => {
                let previous = self.entries.insert(entry.key, entry.value.clone());
                previous.as_deref() != Some(entry.value.as_str())
            }
        }
    }

    /// Copy of every entry
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        EnvSnapshot { entries }
    }
}
