//! Config inspection use cases

use crate::domain::display_value;
use crate::error::Result;
use crate::infrastructure::ConfigStore;

/// One line of `env` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLine {
    pub key: String,
    pub value: String,
}

/// Service for reading configuration values
pub struct ConfigService {
    store: ConfigStore,
}

impl ConfigService {
    pub fn new(store: ConfigStore) -> Self {
        ConfigService { store }
    }

    /// Get a single value, falling back to `default`
    pub fn get(&mut self, key: &str, default: Option<&str>) -> Result<String> {
        self.store.get(key, default)
    }

    /// Every known entry sorted by key. Secret-looking values are masked
    /// unless `reveal` is set.
    pub fn list(&mut self, reveal: bool) -> Result<Vec<EnvLine>> {
        let all = self.store.load_all(None)?;

        Ok(all
            .into_iter()
            .map(|(key, value)| {
                let value = if reveal {
                    value
                } else {
                    display_value(&key, &value)
                };
                EnvLine { key, value }
            })
            .collect())
    }
}
