use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower_sessions::{
    session::{Id, Record},
    session_store, ExpiredDeletion, SessionStore,
};

/// An in-memory session store whose expired records are evicted.
///
/// Sessions are lost on restart. Run [`MemorySessionStore::evict_expired_every`]
/// alongside the server so that abandoned sessions do not pile up.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    records: Arc<Mutex<HashMap<Id, Record>>>,
}

impl MemorySessionStore {
    /// Deletes expired sessions once per `period`. Runs until the store fails.
    pub async fn evict_expired_every(self, period: Duration) -> session_store::Result<()> {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            self.delete_expired().await?;
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

fn is_active(record: &Record, now: OffsetDateTime) -> bool {
    record.expiry_date > now
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .records
            .lock()
            .await
            .get(session_id)
            .filter(|record| is_active(record, now))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for MemorySessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc();
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| is_active(record, now));
        tracing::debug!(evicted = before - records.len(), "evicted expired sessions");
        Ok(())
    }
}
