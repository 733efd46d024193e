use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub session_ttl_secs: u64,
    pub captcha_ttl_secs: u64,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        // 会话有效期，默认24小时；验证码有效期，默认5分钟
        let session_ttl = env::var("SESSION_TTL")
            .unwrap_or_default()
            .trim_end_matches('h')
            .parse::<u64>()
            .unwrap_or(24);
        let captcha_ttl = env::var("CAPTCHA_TTL")
            .unwrap_or_default()
            .trim_end_matches('m')
            .parse::<u64>()
            .unwrap_or(5);
        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            redis_url: env::var("REDIS_URL")?,
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")?.parse().unwrap_or(3000),
            session_ttl_secs: session_ttl * 3600,
            captcha_ttl_secs: captcha_ttl * 60,
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn captcha_ttl(&self) -> Duration {
        Duration::from_secs(self.captcha_ttl_secs)
    }
}
