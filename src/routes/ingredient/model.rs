use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use sqlx::types::Decimal;

/// 食材
///
/// category: 1=蔬菜,2=肉类,3=海鲜,4=主食,5=调味料
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub category: i16,
    pub unit: String,
    pub calories_per_100g: Option<Decimal>,
    pub protein_per_100g: Option<Decimal>,
    pub carbs_per_100g: Option<Decimal>,
    pub fat_per_100g: Option<Decimal>,
    pub allergens: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 用户名下的食材，status: 1=已有,2=缺少
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct UserIngredient {
    pub id: i64,
    pub user_id: i64,
    pub ingredient_id: i64,
    pub amount: Decimal,
    pub unit: String,
    pub status: i16,
}

#[derive(Debug, Deserialize)]
pub struct ListIngredientsQuery {
    pub category: Option<i16>,
}

#[derive(Debug, Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub category: i16,
    pub unit: Option<String>,
    pub calories_per_100g: Option<Decimal>,
    pub protein_per_100g: Option<Decimal>,
    pub carbs_per_100g: Option<Decimal>,
    pub fat_per_100g: Option<Decimal>,
    pub allergens: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PutUserIngredientRequest {
    pub ingredient_id: i64,
    pub amount: Decimal,
    pub unit: String,
    pub status: i16,
}

impl Ingredient {
    pub async fn list(pool: &PgPool, category: Option<i16>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, category, unit, calories_per_100g, protein_per_100g,
                   carbs_per_100g, fat_per_100g, allergens, image_url, created_at
            FROM ingredients
            WHERE $1::smallint IS NULL OR category = $1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, category, unit, calories_per_100g, protein_per_100g,
                   carbs_per_100g, fat_per_100g, allergens, image_url, created_at
            FROM ingredients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        req: CreateIngredientRequest,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(
            r#"
            INSERT INTO ingredients (name, category, unit, calories_per_100g, protein_per_100g,
                                     carbs_per_100g, fat_per_100g, allergens, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, category, unit, calories_per_100g, protein_per_100g,
                      carbs_per_100g, fat_per_100g, allergens, image_url, created_at
            "#,
        )
        .bind(&req.name)
        .bind(req.category)
        .bind(req.unit.as_deref().unwrap_or("份"))
        .bind(req.calories_per_100g)
        .bind(req.protein_per_100g)
        .bind(req.carbs_per_100g)
        .bind(req.fat_per_100g)
        .bind(&req.allergens)
        .bind(&req.image_url)
        .fetch_one(pool)
        .await
    }
}

impl UserIngredient {
    pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserIngredient>(
            r#"
            SELECT id, user_id, ingredient_id, amount, unit, status
            FROM user_ingredients
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// 同一用户同一食材只保留一行，重复提交按更新处理
    pub async fn upsert(
        pool: &PgPool,
        user_id: i64,
        req: PutUserIngredientRequest,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, UserIngredient>(
            r#"
            INSERT INTO user_ingredients (user_id, ingredient_id, amount, unit, status)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, ingredient_id)
            DO UPDATE SET amount = EXCLUDED.amount, unit = EXCLUDED.unit, status = EXCLUDED.status
            RETURNING id, user_id, ingredient_id, amount, unit, status
            "#,
        )
        .bind(user_id)
        .bind(req.ingredient_id)
        .bind(req.amount)
        .bind(&req.unit)
        .bind(req.status)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, user_id: i64, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_ingredients
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
