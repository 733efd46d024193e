use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{SessionError, SessionStore, slot_key};

/// 内存会话存储，用于本地开发和测试
///
/// 过期条目在读取时惰性清除。
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str, slot: &str) -> Result<Option<String>, SessionError> {
        let mut entries = self.entries.lock().await;
        let key = slot_key(session_id, slot);
        match entries.get(&key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        session_id: &str,
        slot: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            slot_key(session_id, slot),
            (value.to_string(), Instant::now() + ttl),
        );
        Ok(())
    }

    async fn delete(&self, session_id: &str, slot: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().await;
        entries.remove(&slot_key(session_id, slot));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SLOT_CAPTCHA, SLOT_CURRENT_USER};

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemorySessionStore::new();
        store
            .set("s1", SLOT_CAPTCHA, "123456", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            store.get("s1", SLOT_CAPTCHA).await.unwrap().as_deref(),
            Some("123456")
        );
    }

    #[tokio::test]
    async fn slots_are_independent_per_session() {
        let store = MemorySessionStore::new();
        store
            .set("s1", SLOT_CAPTCHA, "111111", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .set("s2", SLOT_CAPTCHA, "222222", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            store.get("s1", SLOT_CAPTCHA).await.unwrap().as_deref(),
            Some("111111")
        );
        assert_eq!(
            store.get("s1", SLOT_CURRENT_USER).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn set_overwrites_pending_value() {
        let store = MemorySessionStore::new();
        store
            .set("s1", SLOT_CAPTCHA, "111111", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .set("s1", SLOT_CAPTCHA, "222222", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            store.get("s1", SLOT_CAPTCHA).await.unwrap().as_deref(),
            Some("222222")
        );
    }

    #[tokio::test]
    async fn expired_entry_reads_as_absent() {
        let store = MemorySessionStore::new();
        store
            .set("s1", SLOT_CAPTCHA, "123456", Duration::from_secs(0))
            .await
            .unwrap();
        assert_eq!(store.get("s1", SLOT_CAPTCHA).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let store = MemorySessionStore::new();
        store
            .set("s1", SLOT_CURRENT_USER, "{}", Duration::from_secs(60))
            .await
            .unwrap();
        store.delete("s1", SLOT_CURRENT_USER).await.unwrap();
        assert_eq!(store.get("s1", SLOT_CURRENT_USER).await.unwrap(), None);
    }
}
