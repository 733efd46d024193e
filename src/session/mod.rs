// 会话模块
// 会话以cookie携带的会话ID为键，按槽位存取字符串值

use std::time::Duration;

use async_trait::async_trait;

mod memory;
mod redis_store;

pub use memory::MemorySessionStore;
pub use redis_store::RedisSessionStore;

/// 待验证的验证码槽位
pub const SLOT_CAPTCHA: &str = "captcha";

/// 当前登录用户槽位
pub const SLOT_CURRENT_USER: &str = "current_user";

/// 会话ID，由中间件生成并通过cookie下发
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// 会话中保存的已登录用户快照
///
/// 登录时写入 current_user 槽位，后续请求由登录校验中间件还原。
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub phone: String,
}

#[derive(Debug)]
pub struct SessionError(pub String);

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session store error: {}", self.0)
    }
}

impl std::error::Error for SessionError {}

impl From<redis::RedisError> for SessionError {
    fn from(e: redis::RedisError) -> Self {
        SessionError(e.to_string())
    }
}

/// 会话存储抽象
///
/// 每个会话下有若干命名槽位，槽位各自带过期时间。
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str, slot: &str) -> Result<Option<String>, SessionError>;

    async fn set(
        &self,
        session_id: &str,
        slot: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), SessionError>;

    async fn delete(&self, session_id: &str, slot: &str) -> Result<(), SessionError>;
}

/// 生成会话槽位的存储键
pub(crate) fn slot_key(session_id: &str, slot: &str) -> String {
    format!("session:{}:{}", session_id, slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_key_joins_session_and_slot() {
        assert_eq!(slot_key("abc", SLOT_CAPTCHA), "session:abc:captcha");
        assert_eq!(
            slot_key("abc", SLOT_CURRENT_USER),
            "session:abc:current_user"
        );
    }
}
