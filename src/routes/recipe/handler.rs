use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    session::CurrentUser,
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

use super::model::{
    CreateRecipeRequest, CreateTriedRequest, FavoriteRequest, ListRecipesQuery, Recipe,
    RecipeRecommendation, RecipeTried, UserFavoriteRecipe,
};

#[axum::debug_handler]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<ListRecipesQuery>,
) -> impl IntoResponse {
    match Recipe::list(&state.pool, query.cuisine).await {
        Ok(recipes) => (StatusCode::OK, success_to_api_response(recipes)),
        Err(e) => {
            tracing::error!("Failed to list recipes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取食谱列表失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_recipe(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match Recipe::find_by_id(&state.pool, id).await {
        Ok(Some(recipe)) => (StatusCode::OK, success_to_api_response(recipe)),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "食谱不存在".to_string()),
        ),
        Err(e) => {
            tracing::error!("Failed to get recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取食谱失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if req.name.is_empty() {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::VALIDATION_ERROR, "食谱名称不能为空".to_string()),
        );
    }

    match Recipe::create(&state.pool, user.id, req).await {
        Ok(recipe) => (StatusCode::CREATED, success_to_api_response(recipe)),
        Err(e) => {
            tracing::error!("Failed to create recipe for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "创建食谱失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match Recipe::list_favorites(&state.pool, user.id).await {
        Ok(recipes) => (StatusCode::OK, success_to_api_response(recipes)),
        Err(e) => {
            tracing::error!("Failed to list favorites for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取收藏列表失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<FavoriteRequest>,
) -> impl IntoResponse {
    match UserFavoriteRecipe::insert(&state.pool, user.id, req.recipe_id).await {
        // 已收藏过时幂等返回成功
        Ok(_) => (
            StatusCode::OK,
            success_to_api_response(serde_json::json!({})),
        ),
        Err(e) => {
            tracing::error!(
                "Failed to favorite recipe {} for user {}: {}",
                req.recipe_id,
                user.id,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "收藏失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(recipe_id): Path<i64>,
) -> impl IntoResponse {
    match UserFavoriteRecipe::delete(&state.pool, user.id, recipe_id).await {
        Ok(0) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "收藏记录不存在".to_string()),
        ),
        Ok(_) => (
            StatusCode::OK,
            success_to_api_response(serde_json::json!({})),
        ),
        Err(e) => {
            tracing::error!(
                "Failed to unfavorite recipe {} for user {}: {}",
                recipe_id,
                user.id,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "取消收藏失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn list_tried(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match RecipeTried::list_for_user(&state.pool, user.id).await {
        Ok(rows) => (StatusCode::OK, success_to_api_response(rows)),
        Err(e) => {
            tracing::error!("Failed to list tried recipes for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取尝试记录失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn create_tried(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateTriedRequest>,
) -> impl IntoResponse {
    if !(0..=5).contains(&req.rating) {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::VALIDATION_ERROR, "评分必须在0到5之间".to_string()),
        );
    }

    match RecipeTried::create(&state.pool, user.id, req).await {
        Ok(row) => (StatusCode::CREATED, success_to_api_response(row)),
        Err(e) => {
            tracing::error!("Failed to record tried recipe for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "保存尝试记录失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn list_recommendations(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match RecipeRecommendation::list_for_user(&state.pool, user.id).await {
        Ok(rows) => (StatusCode::OK, success_to_api_response(rows)),
        Err(e) => {
            tracing::error!("Failed to list recommendations for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取推荐列表失败".to_string()),
            )
        }
    }
}
