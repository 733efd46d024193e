use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use sqlx::types::Decimal;

/// 食谱
///
/// cuisine: 1=中餐,2=西餐,3=日韩,4=东南亚
/// taste_base: 1=酸,2=甜,3=苦,4=辣,5=咸,6=复合
/// spice_level: 0=不辣 .. 4=爆辣
/// difficulty: 1=简单,2=中等,3=复杂
/// source_type: 1=AI生成,2=用户上传
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub cuisine: i16,
    pub taste_base: i16,
    pub spice_level: i16,
    pub cooking_time_minutes: i32,
    pub difficulty: i16,
    pub ingredients_json: String,
    pub steps_text: String,
    pub nutrition_analysis: Option<String>,
    pub estimated_cost_cny: Option<Decimal>,
    pub cover_image_url: Option<String>,
    pub source_type: i16,
    pub author_user_id: Option<i64>,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

/// 用户收藏的食谱记录
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct UserFavoriteRecipe {
    pub id: i64,
    pub user_id: i64,
    pub recipe_id: i64,
    pub created_at: DateTime<Utc>,
}

/// 用户做过的食谱及评分
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct RecipeTried {
    pub id: i64,
    pub user_id: i64,
    pub recipe_id: i64,
    pub rating: i16,
    pub comment: Option<String>,
    pub tried_at: DateTime<Utc>,
}

/// 推荐记录，meal_time: 1=早餐,2=午餐,3=晚餐,4=夜宵
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct RecipeRecommendation {
    pub id: i64,
    pub user_id: i64,
    pub recommended_recipe_id: i64,
    pub meal_time: i16,
    pub budget_limit: Option<Decimal>,
    pub is_healthy_for_user: Option<bool>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ListRecipesQuery {
    pub cuisine: Option<i16>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub cuisine: i16,
    pub taste_base: i16,
    pub spice_level: i16,
    pub cooking_time_minutes: i32,
    pub difficulty: i16,
    pub ingredients_json: String,
    pub steps_text: String,
    pub nutrition_analysis: Option<String>,
    pub estimated_cost_cny: Option<Decimal>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub recipe_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateTriedRequest {
    pub recipe_id: i64,
    pub rating: i16,
    pub comment: Option<String>,
}

const RECIPE_COLUMNS: &str = r#"id, name, cuisine, taste_base, spice_level, cooking_time_minutes,
difficulty, ingredients_json, steps_text, nutrition_analysis, estimated_cost_cny,
cover_image_url, source_type, author_user_id, ai_generated, created_at"#;

impl Recipe {
    pub async fn list(pool: &PgPool, cuisine: Option<i16>) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes \
             WHERE $1::smallint IS NULL OR cuisine = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, Recipe>(&sql)
            .bind(cuisine)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// 用户上传的食谱，作者为当前登录用户
    pub async fn create(
        pool: &PgPool,
        author_user_id: i64,
        req: CreateRecipeRequest,
    ) -> Result<Self, sqlx::Error> {
        let sql = format!(
            "INSERT INTO recipes (name, cuisine, taste_base, spice_level, cooking_time_minutes, \
                                  difficulty, ingredients_json, steps_text, nutrition_analysis, \
                                  estimated_cost_cny, cover_image_url, source_type, author_user_id, \
                                  ai_generated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 2, $12, false) \
             RETURNING {RECIPE_COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&sql)
            .bind(&req.name)
            .bind(req.cuisine)
            .bind(req.taste_base)
            .bind(req.spice_level)
            .bind(req.cooking_time_minutes)
            .bind(req.difficulty)
            .bind(&req.ingredients_json)
            .bind(&req.steps_text)
            .bind(&req.nutrition_analysis)
            .bind(req.estimated_cost_cny)
            .bind(&req.cover_image_url)
            .bind(author_user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn list_favorites(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT r.id, r.name, r.cuisine, r.taste_base, r.spice_level, r.cooking_time_minutes,
                   r.difficulty, r.ingredients_json, r.steps_text, r.nutrition_analysis,
                   r.estimated_cost_cny, r.cover_image_url, r.source_type, r.author_user_id,
                   r.ai_generated, r.created_at
            FROM user_favorite_recipes f
            JOIN recipes r ON r.id = f.recipe_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}

impl UserFavoriteRecipe {
    /// 重复收藏不报错也不产生重复行
    pub async fn insert(
        pool: &PgPool,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserFavoriteRecipe>(
            r#"
            INSERT INTO user_favorite_recipes (user_id, recipe_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, recipe_id) DO NOTHING
            RETURNING id, user_id, recipe_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(
        pool: &PgPool,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_favorite_recipes
            WHERE user_id = $1 AND recipe_id = $2
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

impl RecipeTried {
    pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, RecipeTried>(
            r#"
            SELECT id, user_id, recipe_id, rating, comment, tried_at
            FROM recipe_tried
            WHERE user_id = $1
            ORDER BY tried_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        req: CreateTriedRequest,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, RecipeTried>(
            r#"
            INSERT INTO recipe_tried (user_id, recipe_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, recipe_id, rating, comment, tried_at
            "#,
        )
        .bind(user_id)
        .bind(req.recipe_id)
        .bind(req.rating)
        .bind(&req.comment)
        .fetch_one(pool)
        .await
    }
}

impl RecipeRecommendation {
    pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, RecipeRecommendation>(
            r#"
            SELECT id, user_id, recommended_recipe_id, meal_time, budget_limit,
                   is_healthy_for_user, reason, created_at
            FROM recipe_recommendations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
