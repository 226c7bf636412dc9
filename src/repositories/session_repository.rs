use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{errors::AppResult, models::domain::SessionState};

/// A session guarded by its own lock. Holding the lock for a whole action
/// serialises actions within one session.
pub type SharedSession = Arc<Mutex<SessionState>>;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: SessionState) -> AppResult<SessionState>;
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<SharedSession>>;
    async fn delete(&self, id: &Uuid) -> AppResult<bool>;
    /// Drop sessions idle since before `cutoff`. Sessions busy with an action are kept.
    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> AppResult<usize>;
    async fn count(&self) -> AppResult<usize>;
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: SessionState) -> AppResult<SessionState> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, Arc::new(Mutex::new(session.clone())));
        log::info!("Created session {} ({} active)", session.id, sessions.len());
        Ok(session)
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<SharedSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(id).is_some();
        if removed {
            log::info!("Ended session {}", id);
        }
        Ok(removed)
    }

    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> AppResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, session| match session.try_lock() {
            Ok(state) => state.last_active_at >= cutoff,
            Err(_) => true,
        });

        let purged = before - sessions.len();
        if purged > 0 {
            log::info!("Purged {} idle sessions", purged);
        }
        Ok(purged)
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.sessions.read().await.len())
    }
}
