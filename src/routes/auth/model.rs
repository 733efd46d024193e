use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::utils::random_username;

/// 新用户的默认密码
pub const PLACEHOLDER_PASSWORD: &str = "11111";

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<sqlx::types::Decimal>,
    pub gender: Option<i16>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    #[allow(dead_code)]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CaptchaResponse {
    pub code: String,
}

impl User {
    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, phone, password, height_cm, weight_kg, gender, created_at
            FROM users
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// 按手机号隐式注册
    ///
    /// phone 上有唯一约束，并发的首次登录只会插入一行；
    /// 冲突方（插入不返回行）回退到按手机号查询拿到已存在的用户。
    pub async fn provision(pool: &PgPool, phone: &str) -> Result<Self, sqlx::Error> {
        let username = random_username();

        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, phone, password)
            VALUES ($1, $2, $3)
            ON CONFLICT (phone) DO NOTHING
            RETURNING id, username, phone, password, height_cm, weight_kg, gender, created_at
            "#,
        )
        .bind(&username)
        .bind(phone)
        .bind(PLACEHOLDER_PASSWORD)
        .fetch_optional(pool)
        .await?;

        match inserted {
            Some(user) => {
                tracing::info!("Provisioned user {} for phone {}", user.id, phone);
                Ok(user)
            }
            None => Self::find_by_phone(pool, phone)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }
}
