use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ShoppingList {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ShoppingListItem {
    pub id: i64,
    pub shopping_list_id: i64,
    pub ingredient_name: String,
    pub amount: Option<String>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShoppingListRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShoppingListItemRequest {
    pub ingredient_name: String,
    pub amount: Option<String>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub note: Option<String>,
}

impl ShoppingList {
    pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingList>(
            r#"
            SELECT id, user_id, name, created_at, updated_at
            FROM shopping_lists
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        name: Option<String>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ShoppingList>(
            r#"
            INSERT INTO shopping_lists (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name.as_deref().unwrap_or("我的购物清单"))
        .fetch_one(pool)
        .await
    }
}

impl ShoppingListItem {
    /// 清单归属校验放在同一条语句里，避免跨清单读取
    pub async fn list_for_list(
        pool: &PgPool,
        user_id: i64,
        shopping_list_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingListItem>(
            r#"
            SELECT i.id, i.shopping_list_id, i.ingredient_name, i.amount, i.unit, i.category, i.note
            FROM shopping_list_items i
            JOIN shopping_lists l ON l.id = i.shopping_list_id
            WHERE i.shopping_list_id = $1 AND l.user_id = $2
            ORDER BY i.id
            "#,
        )
        .bind(shopping_list_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        shopping_list_id: i64,
        req: CreateShoppingListItemRequest,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingListItem>(
            r#"
            INSERT INTO shopping_list_items (shopping_list_id, ingredient_name, amount, unit, category, note)
            SELECT l.id, $3, $4, $5, $6, $7
            FROM shopping_lists l
            WHERE l.id = $1 AND l.user_id = $2
            RETURNING id, shopping_list_id, ingredient_name, amount, unit, category, note
            "#,
        )
        .bind(shopping_list_id)
        .bind(user_id)
        .bind(&req.ingredient_name)
        .bind(&req.amount)
        .bind(&req.unit)
        .bind(&req.category)
        .bind(&req.note)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(
        pool: &PgPool,
        user_id: i64,
        shopping_list_id: i64,
        item_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM shopping_list_items i
            USING shopping_lists l
            WHERE i.id = $1 AND i.shopping_list_id = $2
              AND l.id = i.shopping_list_id AND l.user_id = $3
            "#,
        )
        .bind(item_id)
        .bind(shopping_list_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
