// File: hostvoucher-core/src/repositories/file/state.rs

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tracing::{debug, info};
use hostvoucher_common::models::Snapshot;
use hostvoucher_common::traits::repository_traits::StateRepository;
use crate::Error;

/// Stores the snapshot as pretty JSON on disk. Writes go to a sibling temp
/// file first and are renamed into place, so a crash never leaves a torn file.
#[derive(Debug, Clone)]
pub struct JsonFileStateRepository {
    path: PathBuf,
}

impl JsonFileStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "gamification.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StateRepository for JsonFileStateRepository {
    async fn load(&self) -> Result<Option<Snapshot>, Error> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No gamification state at {:?}; starting empty.", self.path);
                return Ok(None);
            }
            Err(e) => return Err(Error::Io(e)),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        debug!("Loaded gamification state from {:?}", self.path);
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(snapshot)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostvoucher_common::models::{ActionKind, GamificationState};

    #[tokio::test]
    async fn test_missing_file_loads_none() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let repo = JsonFileStateRepository::new(dir.path().join("state.json"));
        assert!(repo.load().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let repo = JsonFileStateRepository::new(dir.path().join("nested").join("state.json"));

        let mut snap = Snapshot::default();
        let mut st = GamificationState::new(1_000);
        st.is_activated = true;
        st.points = 42;
        st.badges_owned.insert("Daily Bronze".into());
        snap.state = Some(st);
        snap.cooldowns.record(ActionKind::Visit, "nordvpn", 5_000);

        repo.save(&snap).await?;
        let loaded = repo.load().await?.expect("snapshot should exist");
        assert_eq!(loaded, snap);
        assert!(!repo.temp_path().exists(), "temp file must be renamed away");
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, "{ not json").await?;
        let repo = JsonFileStateRepository::new(path);
        assert!(matches!(repo.load().await, Err(Error::Json(_))));
        Ok(())
    }
}
