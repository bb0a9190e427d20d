//! Persistence seam
//!
//! Avatar, state and memory are stored as three independent records keyed
//! by the avatar id. Loading a record that was never saved yields `None`.

use crate::types::{Avatar, AvatarMemory, CompanionState};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage for the long-lived companion records
#[async_trait]
pub trait AvatarRepository: Send + Sync {
    /// Load an avatar
    async fn load_avatar(&self, id: Uuid) -> Result<Option<Avatar>>;

    /// Save an avatar, replacing any previous record
    async fn save_avatar(&self, avatar: &Avatar) -> Result<()>;

    /// Load the companion state of an avatar
    async fn load_state(&self, id: Uuid) -> Result<Option<CompanionState>>;

    /// Save the companion state of an avatar
    async fn save_state(&self, id: Uuid, state: &CompanionState) -> Result<()>;

    /// Load the memory of an avatar
    async fn load_memory(&self, id: Uuid) -> Result<Option<AvatarMemory>>;

    /// Save the memory of an avatar
    async fn save_memory(&self, id: Uuid, memory: &AvatarMemory) -> Result<()>;
}

/// Process-local repository, used in tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct InMemoryAvatarRepository {
    avatars: RwLock<HashMap<Uuid, Avatar>>,
    states: RwLock<HashMap<Uuid, CompanionState>>,
    memories: RwLock<HashMap<Uuid, AvatarMemory>>,
}

impl InMemoryAvatarRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored avatars
    pub async fn avatar_count(&self) -> usize {
        self.avatars.read().await.len()
    }
}

#[async_trait]
impl AvatarRepository for InMemoryAvatarRepository {
    async fn load_avatar(&self, id: Uuid) -> Result<Option<Avatar>> {
        Ok(self.avatars.read().await.get(&id).cloned())
    }

    async fn save_avatar(&self, avatar: &Avatar) -> Result<()> {
        self.avatars.write().await.insert(avatar.id, avatar.clone());
        Ok(())
    }

    async fn load_state(&self, id: Uuid) -> Result<Option<CompanionState>> {
        Ok(self.states.read().await.get(&id).cloned())
    }

    async fn save_state(&self, id: Uuid, state: &CompanionState) -> Result<()> {
        self.states.write().await.insert(id, state.clone());
        Ok(())
    }

    async fn load_memory(&self, id: Uuid) -> Result<Option<AvatarMemory>> {
        Ok(self.memories.read().await.get(&id).cloned())
    }

    async fn save_memory(&self, id: Uuid, memory: &AvatarMemory) -> Result<()> {
        self.memories.write().await.insert(id, memory.clone());
        Ok(())
    }
}
