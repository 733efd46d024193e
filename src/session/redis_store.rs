use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use super::{SessionError, SessionStore, slot_key};

/// Redis会话存储
pub struct RedisSessionStore {
    redis: Arc<RedisClient>,
}

impl RedisSessionStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, session_id: &str, slot: &str) -> Result<Option<String>, SessionError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(slot_key(session_id, slot)).await?;
        Ok(value)
    }

    async fn set(
        &self,
        session_id: &str,
        slot: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), SessionError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn
            .set_ex(slot_key(session_id, slot), value, ttl.as_secs())
            .await?;
        Ok(())
    }

    async fn delete(&self, session_id: &str, slot: &str) -> Result<(), SessionError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.del(slot_key(session_id, slot)).await?;
        Ok(())
    }
}
