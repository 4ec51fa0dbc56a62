use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::debug;

use super::{Cookie, CookieJar, CookieOptions, MemoryJar};

/// Jar file name in the jar directory
const JAR_FILE: &str = "cookies.json";

/// Cookie jar that keeps persistent cookies in `<dir>/cookies.json`.
///
/// Session cookies live only in memory, so a new process starts without them.
pub struct FileJar {
    dir: PathBuf,
    inner: MemoryJar,
}

impl FileJar {
    /// Open the jar in `dir`, dropping any cookies that expired while it was closed
    pub fn open(dir: PathBuf) -> Result<Self> {
        let path = dir.join(JAR_FILE);
        let cookies = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read cookie jar file")?;
            let stored: HashMap<String, Cookie> = serde_json::from_str(&contents)
                .context("Failed to parse cookie jar file")?;
            stored
                .into_iter()
                .filter(|(_, c)| !c.options.is_session() && !c.is_expired())
                .collect()
        } else {
            HashMap::new()
        };

        debug!(path = %path.display(), count = cookies.len(), "Opened cookie jar");
        Ok(Self {
            dir,
            inner: MemoryJar::with_cookies(cookies),
        })
    }

    fn jar_path(&self) -> PathBuf {
        self.dir.join(JAR_FILE)
    }

    /// Write via a temp file and rename so readers never see a half-written jar
    fn persist(&self, cookies: &HashMap<String, Cookie>) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create jar directory: {}", self.dir.display()))?;
        let path = self.jar_path();
        let tmp = path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(cookies)?;
        std::fs::write(&tmp, contents).context("Failed to write cookie jar file")?;
        std::fs::rename(&tmp, &path).context("Failed to replace cookie jar file")?;
        Ok(())
    }
}

impl CookieJar for FileJar {
    fn get(&self, name: &str) -> Option<String> {
        self.inner.get(name)
    }

    fn set(&self, name: &str, value: &str, options: CookieOptions) -> Result<()> {
        let mut on_disk = self.inner.persistent_cookies();
        let was_on_disk = on_disk.remove(name).is_some();
        if !options.is_session() {
            on_disk.insert(name.to_string(), Cookie::new(value, options.clone()));
        }
        if was_on_disk || !options.is_session() {
            self.persist(&on_disk)?;
        }
        self.inner.set(name, value, options)
    }

    fn remove(&self, name: &str) -> Result<()> {
        let mut on_disk = self.inner.persistent_cookies();
        if on_disk.remove(name).is_some() {
            self.persist(&on_disk)?;
        }
        self.inner.remove(name)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.subscribe()
    }

    fn revision(&self) -> u64 {
        self.inner.revision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_persistent_cookie_survives_reopen() {
        let dir = TempDir::new().unwrap();

        let jar = FileJar::open(dir.path().to_path_buf()).unwrap();
        jar.set("access_token", "abc", CookieOptions::persistent()).unwrap();
        drop(jar);

        let jar = FileJar::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(jar.get("access_token").as_deref(), Some("abc"));
    }

    #[test]
    fn test_session_cookie_does_not_survive_reopen() {
        let dir = TempDir::new().unwrap();

        let jar = FileJar::open(dir.path().to_path_buf()).unwrap();
        jar.set("user", r#"{"id":1}"#, CookieOptions::session()).unwrap();
        assert!(jar.get("user").is_some());
        drop(jar);

        let jar = FileJar::open(dir.path().to_path_buf()).unwrap();
        assert!(jar.get("user").is_none());
    }

    #[test]
    fn test_downgrade_to_session_removes_from_disk() {
        let dir = TempDir::new().unwrap();

        let jar = FileJar::open(dir.path().to_path_buf()).unwrap();
        jar.set("a", "1", CookieOptions::persistent()).unwrap();
        jar.set("a", "2", CookieOptions::session()).unwrap();
        assert_eq!(jar.get("a").as_deref(), Some("2"));
        drop(jar);

        let jar = FileJar::open(dir.path().to_path_buf()).unwrap();
        assert!(jar.get("a").is_none());
    }

    #[test]
    fn test_remove_persists() {
        let dir = TempDir::new().unwrap();

        let jar = FileJar::open(dir.path().to_path_buf()).unwrap();
        jar.set("access_token", "abc", CookieOptions::persistent()).unwrap();
        jar.remove("access_token").unwrap();
        drop(jar);

        let jar = FileJar::open(dir.path().to_path_buf()).unwrap();
        assert!(jar.get("access_token").is_none());
        assert!(!dir.path().join("cookies.json.tmp").exists());
    }

    #[test]
    fn test_open_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let jar = FileJar::open(dir.path().join("nested")).unwrap();
        assert!(jar.get("access_token").is_none());
        assert_eq!(jar.revision(), 0);
    }

    #[test]
    fn test_open_corrupt_file_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(JAR_FILE), "not json").unwrap();
        assert!(FileJar::open(dir.path().to_path_buf()).is_err());
    }
}
