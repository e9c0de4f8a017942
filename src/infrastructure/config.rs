//! Configuration loading from `.env.local` style files

use crate::domain::{expand_references, mark_references, ConfigEntry, EnvSnapshot, MergePolicy};
use crate::error::{AnalysisError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File name looked up when no explicit source file is given
pub const DEFAULT_ENV_FILE: &str = ".env.local";

/// Overrides the source file path
pub const ENV_FILE_VAR: &str = "VOX_ENV_FILE";

/// Overrides the directory holding `.env.local`
pub const PROJECT_ROOT_VAR: &str = "VOX_PROJECT_ROOT";

/// Holds the environment snapshot and loads source files into it.
///
/// The store is seeded once (usually from the process environment) and then
/// passed to whoever needs configuration. Loading never touches the real
/// process environment.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    env_file: PathBuf,
    policy: MergePolicy,
    snapshot: EnvSnapshot,
}

impl ConfigStore {
    /// Create a store over an explicit ambient snapshot
    pub fn new(env_file: PathBuf, ambient: EnvSnapshot) -> Self {
        ConfigStore {
            env_file,
            policy: MergePolicy::default(),
            snapshot: ambient,
        }
    }

    /// Create a store seeded from the process environment.
    /// Without an explicit file, the default is resolved with
    /// [`ConfigStore::resolve_env_file`] from the current directory.
    pub fn from_process_env(env_file: Option<PathBuf>) -> Result<Self> {
        let ambient = EnvSnapshot::from_process();
        let env_file = match env_file {
            Some(path) => path,
            None => Self::resolve_env_file(&ambient, &std::env::current_dir()?),
        };
        Ok(ConfigStore::new(env_file, ambient))
    }

    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve the default source file:
    /// 1. `VOX_ENV_FILE`
    /// 2. `VOX_PROJECT_ROOT/.env.local`
    /// 3. nearest ancestor of `start` containing `.env.local`
    /// 4. `start/.env.local`
    pub fn resolve_env_file(ambient: &EnvSnapshot, start: &Path) -> PathBuf {
        if let Some(file) = ambient.get(ENV_FILE_VAR).filter(|v| !v.is_empty()) {
            return PathBuf::from(file);
        }

        if let Some(root) = ambient.get(PROJECT_ROOT_VAR).filter(|v| !v.is_empty()) {
            return Path::new(root).join(DEFAULT_ENV_FILE);
        }

        Self::discover_from(start).unwrap_or_else(|| start.join(DEFAULT_ENV_FILE))
    }

    /// Walk up from `start` looking for a `.env.local` file
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(DEFAULT_ENV_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// The source file used when `load_all` gets no explicit path
    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    /// Directory holding the source file
    pub fn project_root(&self) -> &Path {
        self.env_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    pub fn snapshot(&self) -> &EnvSnapshot {
        &self.snapshot
    }

    /// Load the source file (if it exists) into the snapshot and return a
    /// copy of every entry now known. A missing file is not an error.
    ///
    /// `$VAR` and `${VAR}` references resolve against the snapshot as it
    /// stands after the earlier lines of the same file were merged, so a
    /// reference always sees the value `get` would return. Entries are
    /// staged and committed only when the whole file parses; a parse
    /// error leaves the snapshot untouched.
    pub fn load_all(&mut self, path: Option<&Path>) -> Result<BTreeMap<String, String>> {
        let path = path.unwrap_or(self.env_file.as_path()).to_path_buf();

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %path.display(), "no env file, keeping current snapshot");
                return Ok(self.snapshot.to_map());
            }
            Err(e) => {
                return Err(AnalysisError::EnvFile {
                    path,
                    source: dotenvy::Error::Io(e),
                })
            }
        };

        let marked = mark_references(&raw);
        let mut staged = self.snapshot.clone();
        let mut changed = 0usize;
        for item in dotenvy::from_read_iter(marked.as_bytes()) {
            let (key, value) = item.map_err(|source| AnalysisError::EnvFile {
                path: path.clone(),
                source,
            })?;
            let value = expand_references(&value, &staged);
            if staged.merge(ConfigEntry::new(key, value)?, self.policy) {
                changed += 1;
            }
        }
        self.snapshot = staged;

        debug!(
            path = %path.display(),
            changed,
            policy = ?self.policy,
            "loaded env file"
        );
        Ok(self.snapshot.to_map())
    }

    /// Look up `name` after loading the default source file.
    /// Falls back to `default`; fails with `ConfigurationMissing` when
    /// neither is available.
    pub fn get(&mut self, name: &str, default: Option<&str>) -> Result<String> {
        self.load_all(None)?;

        match (self.snapshot.get(name), default) {
            (Some(value), _) => Ok(value.to_string()),
            (None, Some(default)) => {
                trace!(key = name, "using default value");
                Ok(default.to_string())
            }
            (None, None) => Err(AnalysisError::ConfigurationMissing(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(temp: &TempDir, ambient: &[(&str, &str)]) -> ConfigStore {
        ConfigStore::new(
            temp.path().join(DEFAULT_ENV_FILE),
            ambient.iter().copied().collect(),
        )
    }

    fn write_env(temp: &TempDir, contents: &str) {
        fs::write(temp.path().join(DEFAULT_ENV_FILE), contents).unwrap();
    }

    #[test]
    fn test_get_value_from_file() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "SUPABASE_URL=https://abc.supabase.co\n");
        let mut store = store_with(&temp, &[]);

        assert_eq!(
            store.get("SUPABASE_URL", None).unwrap(),
            "https://abc.supabase.co"
        );
    }

    #[test]
    fn test_get_ambient_without_file() {
        let temp = TempDir::new().unwrap();
        let mut store = store_with(&temp, &[("FOO", "bar")]);

        assert_eq!(store.get("FOO", None).unwrap(), "bar");
        assert_eq!(store.get("MISSING", Some("d")).unwrap(), "d");

        match store.get("MISSING", None).unwrap_err() {
            AnalysisError::ConfigurationMissing(key) => assert_eq!(key, "MISSING"),
            e => panic!("Expected ConfigurationMissing, got {:?}", e),
        }
    }

    #[test]
    fn test_default_ignored_when_present() {
        let temp = TempDir::new().unwrap();
        let mut store = store_with(&temp, &[("FOO", "bar")]);
        assert_eq!(store.get("FOO", Some("other")).unwrap(), "bar");
    }

    #[test]
    fn test_empty_value_is_present() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "EMPTY=\n");
        let mut store = store_with(&temp, &[]);
        assert_eq!(store.get("EMPTY", Some("fallback")).unwrap(), "");
    }

    #[test]
    fn test_load_all_missing_file_returns_ambient() {
        let temp = TempDir::new().unwrap();
        let mut store = store_with(&temp, &[("FOO", "bar"), ("BAZ", "qux")]);

        let all = store.load_all(None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["FOO"], "bar");
    }

    #[test]
    fn test_load_all_returns_full_snapshot() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "A=1\n");
        let mut store = store_with(&temp, &[("FOO", "bar")]);

        let all = store.load_all(None).unwrap();
        assert_eq!(all["A"], "1");
        assert_eq!(all["FOO"], "bar");
    }

    #[test]
    fn test_load_all_is_idempotent() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "A=1\n");
        let mut store = store_with(&temp, &[("FOO", "bar")]);

        let first = store.load_all(None).unwrap();
        let second = store.load_all(None).unwrap();
        assert_eq!(first, second);
        assert_eq!(second["FOO"], "bar");
    }

    #[test]
    fn test_file_wins_by_default() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "A=1\n");
        let mut store = store_with(&temp, &[("A", "2")]);

        assert_eq!(store.policy(), MergePolicy::FileWins);
        assert_eq!(store.get("A", None).unwrap(), "1");
    }

    #[test]
    fn test_ambient_wins_policy() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "A=1\nB=3\n");
        let mut store = store_with(&temp, &[("A", "2")]).with_policy(MergePolicy::AmbientWins);

        assert_eq!(store.get("A", None).unwrap(), "2");
        assert_eq!(store.get("B", None).unwrap(), "3");
    }

    #[test]
    fn test_load_all_explicit_path() {
        let temp = TempDir::new().unwrap();
        let other = temp.path().join("other.env");
        fs::write(&other, "OTHER=yes\n").unwrap();
        let mut store = store_with(&temp, &[]);

        let all = store.load_all(Some(&other)).unwrap();
        assert_eq!(all["OTHER"], "yes");
        // Explicit loads are kept in the snapshot
        assert_eq!(store.get("OTHER", None).unwrap(), "yes");
    }

    #[test]
    fn test_quoted_values_and_comments() {
        let temp = TempDir::new().unwrap();
        write_env(
            &temp,
            "# comment\nQUOTED=\"hello world\"\nSINGLE='x=y'\n\nexport EXPORTED=1\n",
        );
        let mut store = store_with(&temp, &[]);

        assert_eq!(store.get("QUOTED", None).unwrap(), "hello world");
        assert_eq!(store.get("SINGLE", None).unwrap(), "x=y");
        assert_eq!(store.get("EXPORTED", None).unwrap(), "1");
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "NOT A VALID LINE\n");
        let mut store = store_with(&temp, &[]);

        match store.load_all(None).unwrap_err() {
            AnalysisError::EnvFile { path, .. } => {
                assert_eq!(path, temp.path().join(DEFAULT_ENV_FILE))
            }
            e => panic!("Expected EnvFile error, got {:?}", e),
        }
    }

    #[test]
    fn test_reference_follows_file_wins() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "A=1\nB=${A}\n");
        let mut store = store_with(&temp, &[("A", "2")]);

        assert_eq!(store.get("A", None).unwrap(), "1");
        assert_eq!(store.get("B", None).unwrap(), "1");
    }

    #[test]
    fn test_reference_follows_ambient_wins() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "A=1\nB=${A}\n");
        let mut store = store_with(&temp, &[("A", "2")]).with_policy(MergePolicy::AmbientWins);

        assert_eq!(store.get("A", None).unwrap(), "2");
        assert_eq!(store.get("B", None).unwrap(), "2");
    }

    #[test]
    fn test_reference_uses_injected_ambient() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "URL=http://${VOX_TEST_HOST}/x\nBARE=$VOX_TEST_HOST\n");
        let mut store = store_with(&temp, &[("VOX_TEST_HOST", "db.local")]);

        assert_eq!(store.get("URL", None).unwrap(), "http://db.local/x");
        assert_eq!(store.get("BARE", None).unwrap(), "db.local");
    }

    #[test]
    fn test_reference_ignores_process_env() {
        let temp = TempDir::new().unwrap();
        // PATH is set for the test process but absent from this store
        write_env(&temp, "P=[${PATH}]\n");
        let mut store = store_with(&temp, &[]);

        assert_eq!(store.get("P", None).unwrap(), "[]");
    }

    #[test]
    fn test_single_quoted_reference_is_literal() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "RAW='${A}'\nA=1\n");
        let mut store = store_with(&temp, &[]);

        assert_eq!(store.get("RAW", None).unwrap(), "${A}");
    }

    #[test]
    fn test_parse_error_leaves_snapshot_untouched() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "GOOD=1\nFOO=changed\nNOT A VALID LINE\n");
        let mut store = store_with(&temp, &[("FOO", "bar")]);
        let before = store.snapshot().clone();

        assert!(store.load_all(None).is_err());
        assert_eq!(store.snapshot(), &before);
        assert!(!store.snapshot().contains_key("GOOD"));
        assert_eq!(store.snapshot().get("FOO"), Some("bar"));
    }

    #[test]
    fn test_resolve_prefers_env_file_var() {
        let temp = TempDir::new().unwrap();
        let ambient: EnvSnapshot = [(ENV_FILE_VAR, "/custom/.env"), (PROJECT_ROOT_VAR, "/root")]
            .into_iter()
            .collect();

        let path = ConfigStore::resolve_env_file(&ambient, temp.path());
        assert_eq!(path, PathBuf::from("/custom/.env"));
    }

    #[test]
    fn test_resolve_project_root_var() {
        let temp = TempDir::new().unwrap();
        let ambient: EnvSnapshot = [(PROJECT_ROOT_VAR, "/srv/voice")].into_iter().collect();

        let path = ConfigStore::resolve_env_file(&ambient, temp.path());
        assert_eq!(path, Path::new("/srv/voice").join(DEFAULT_ENV_FILE));
    }

    #[test]
    fn test_resolve_discovers_from_nested_dir() {
        let temp = TempDir::new().unwrap();
        write_env(&temp, "A=1\n");
        let nested = temp.path().join("analysis").join("notebooks");
        fs::create_dir_all(&nested).unwrap();

        let path = ConfigStore::resolve_env_file(&EnvSnapshot::new(), &nested);
        assert_eq!(path, temp.path().join(DEFAULT_ENV_FILE));
    }

    #[test]
    fn test_resolve_falls_back_to_start_dir() {
        let temp = TempDir::new().unwrap();
        let path = ConfigStore::resolve_env_file(&EnvSnapshot::new(), temp.path());
        assert_eq!(path, temp.path().join(DEFAULT_ENV_FILE));
    }

    #[test]
    fn test_project_root_is_file_parent() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, &[]);
        assert_eq!(store.project_root(), temp.path());

        let relative = ConfigStore::new(PathBuf::from(".env.local"), EnvSnapshot::new());
        assert_eq!(relative.project_root(), Path::new("."));
    }
}
