//! JSON file repository
//!
//! Layout:
//!
//! ```text
//! <root>/<avatar id>/avatar.json
//! <root>/<avatar id>/state.json
//! <root>/<avatar id>/memory.json
//! ```
//!
//! Every write goes to a temporary file in the same directory and is then
//! renamed over the target, so readers never observe a half-written record.

use async_trait::async_trait;
use lyo_companion_core::{
    Avatar, AvatarMemory, AvatarRepository, CompanionConfig, CompanionError, CompanionState,
    Result,
};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const AVATAR_FILE: &str = "avatar.json";
const STATE_FILE: &str = "state.json";
const MEMORY_FILE: &str = "memory.json";

/// Repository writing one directory of JSON files per avatar
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    root: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a repository at the configured storage directory
    pub fn from_config(config: &CompanionConfig) -> Self {
        Self::new(config.storage_dir.clone())
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ids of every avatar with a stored avatar record
    pub async fn list_avatars(&self) -> Result<Vec<Uuid>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| Uuid::parse_str(name).ok())
            else {
                continue;
            };
            if tokio::fs::try_exists(entry.path().join(AVATAR_FILE)).await? {
                ids.push(id);
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn record_path(&self, id: Uuid, file: &str) -> PathBuf {
        self.root.join(id.to_string()).join(file)
    }

    async fn read_record<T: DeserializeOwned>(&self, id: Uuid, file: &str) -> Result<Option<T>> {
        let path = self.record_path(id, file);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CompanionError::storage(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let record = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %path.display(), "Loaded record");
        Ok(Some(record))
    }

    async fn write_record<T: Serialize + Sync>(&self, id: Uuid, file: &str, record: &T) -> Result<()> {
        let path = self.record_path(id, file);
        let dir = self.root.join(id.to_string());
        let bytes = serde_json::to_vec_pretty(record)?;

        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            CompanionError::storage(format!("failed to create {}: {}", dir.display(), e))
        })?;

        let tmp = dir.join(format!("{}.{}.tmp", file, Uuid::new_v4()));
        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            return Err(CompanionError::storage(format!(
                "failed to write {}: {}",
                tmp.display(),
                e
            )));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(CompanionError::storage(format!(
                "failed to replace {}: {}",
                path.display(),
                e
            )));
        }

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Saved record");
        Ok(())
    }
}

#[async_trait]
impl AvatarRepository for JsonFileRepository {
    async fn load_avatar(&self, id: Uuid) -> Result<Option<Avatar>> {
        self.read_record(id, AVATAR_FILE).await
    }

    async fn save_avatar(&self, avatar: &Avatar) -> Result<()> {
        self.write_record(avatar.id, AVATAR_FILE, avatar).await
    }

    async fn load_state(&self, id: Uuid) -> Result<Option<CompanionState>> {
        self.read_record(id, STATE_FILE).await
    }

    async fn save_state(&self, id: Uuid, state: &CompanionState) -> Result<()> {
        self.write_record(id, STATE_FILE, state).await
    }

    async fn load_memory(&self, id: Uuid) -> Result<Option<AvatarMemory>> {
        self.read_record(id, MEMORY_FILE).await
    }

    async fn save_memory(&self, id: Uuid, memory: &AvatarMemory) -> Result<()> {
        self.write_record(id, MEMORY_FILE, memory).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyo_companion_core::{Personality, UserAction};

    #[tokio::test]
    async fn test_missing_root_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nope"));

        assert!(repo.load_avatar(Uuid::new_v4()).await.unwrap().is_none());
        assert!(repo.list_avatars().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());

        let avatar = Avatar::new(Personality::CalmReflective).with_voice("en-GB");
        let mut state = CompanionState::new();
        state.update_mood(UserAction::AnsweredIncorrect);
        let mut memory = AvatarMemory::new();
        memory.record_topic("Photosynthesis");
        memory.record_struggle("Photosynthesis");

        repo.save_avatar(&avatar).await.unwrap();
        repo.save_state(avatar.id, &state).await.unwrap();
        repo.save_memory(avatar.id, &memory).await.unwrap();

        let base = dir.path().join(avatar.id.to_string());
        assert!(base.join("avatar.json").exists());
        assert!(base.join("state.json").exists());
        assert!(base.join("memory.json").exists());

        let loaded = repo.load_avatar(avatar.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Luna");
        assert_eq!(loaded.voice_identifier.as_deref(), Some("en-GB"));
        assert_eq!(loaded.profile.base_personality, Personality::CalmReflective);

        let loaded_state = repo.load_state(avatar.id).await.unwrap().unwrap();
        assert_eq!(loaded_state.mood, state.mood);

        let loaded_memory = repo.load_memory(avatar.id).await.unwrap().unwrap();
        assert_eq!(loaded_memory.struggle_count("Photosynthesis"), 1);
        assert_eq!(loaded_memory.topics_discussed(), memory.topics_discussed());
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        let avatar = Avatar::new(Personality::WisePatient);

        repo.save_avatar(&avatar).await.unwrap();
        repo.save_avatar(&avatar.clone().with_name("Mentor")).await.unwrap();

        let loaded = repo.load_avatar(avatar.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Mentor");

        let files: Vec<_> = std::fs::read_dir(dir.path().join(avatar.id.to_string()))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(files, vec!["avatar.json".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        let id = Uuid::new_v4();

        let record_dir = dir.path().join(id.to_string());
        std::fs::create_dir_all(&record_dir).unwrap();
        std::fs::write(record_dir.join("memory.json"), b"{ not json").unwrap();

        let err = repo.load_memory(id).await.unwrap_err();
        assert!(matches!(err, CompanionError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_list_avatars() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());

        let a = Avatar::new(Personality::FriendlyCurious);
        let b = Avatar::new(Personality::EnergeticCoach);
        repo.save_avatar(&a).await.unwrap();
        repo.save_avatar(&b).await.unwrap();
        // state without an avatar record is not listed
        repo.save_state(Uuid::new_v4(), &CompanionState::new()).await.unwrap();
        std::fs::create_dir_all(dir.path().join("not-a-uuid")).unwrap();

        let mut expected = vec![a.id, b.id];
        expected.sort();
        assert_eq!(repo.list_avatars().await.unwrap(), expected);
    }
}
