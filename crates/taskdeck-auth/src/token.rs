use std::collections::HashMap;
use std::path::{Path, PathBuf};

use taskdeck_core::DeckResult;

/// Fixed key the token lives under in the session file.
pub const TOKEN_KEY: &str = "token";

/// Durable client-side key-value storage for the session token: a small
/// JSON object on disk. A missing or unreadable file reads as "no token",
/// so a corrupted store degrades to an unauthenticated session.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> DeckResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let entries: HashMap<String, String> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(_) => return Ok(None),
        };
        Ok(entries.get(TOKEN_KEY).cloned())
    }

    pub fn save(&self, token: &str) -> DeckResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let entries = HashMap::from([(TOKEN_KEY.to_string(), token.to_string())]);
        let content = serde_json::to_string_pretty(&entries)
            .map_err(|e| taskdeck_core::DeckError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn clear(&self) -> DeckResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));
        store.save("tok-1").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-1"));
        store.save("tok-2").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-2"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested/deeper/session.json"));
        store.save("tok").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));
        store.save("tok").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupted_file_reads_as_no_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();
        let store = TokenStore::new(path);
        assert_eq!(store.load().unwrap(), None);
    }
}
