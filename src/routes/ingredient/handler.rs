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
    CreateIngredientRequest, Ingredient, ListIngredientsQuery, PutUserIngredientRequest,
    UserIngredient,
};

#[axum::debug_handler]
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<ListIngredientsQuery>,
) -> impl IntoResponse {
    match Ingredient::list(&state.pool, query.category).await {
        Ok(ingredients) => (StatusCode::OK, success_to_api_response(ingredients)),
        Err(e) => {
            tracing::error!("Failed to list ingredients: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取食材列表失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match Ingredient::find_by_id(&state.pool, id).await {
        Ok(Some(ingredient)) => (StatusCode::OK, success_to_api_response(ingredient)),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "食材不存在".to_string()),
        ),
        Err(e) => {
            tracing::error!("Failed to get ingredient {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取食材失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(req): Json<CreateIngredientRequest>,
) -> impl IntoResponse {
    if req.name.is_empty() {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::VALIDATION_ERROR, "食材名称不能为空".to_string()),
        );
    }

    match Ingredient::create(&state.pool, req).await {
        Ok(ingredient) => (StatusCode::CREATED, success_to_api_response(ingredient)),
        Err(e) => {
            tracing::error!("Failed to create ingredient: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "创建食材失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn list_my_ingredients(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match UserIngredient::list_for_user(&state.pool, user.id).await {
        Ok(rows) => (StatusCode::OK, success_to_api_response(rows)),
        Err(e) => {
            tracing::error!("Failed to list pantry for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取用户食材失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn put_my_ingredient(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<PutUserIngredientRequest>,
) -> impl IntoResponse {
    match UserIngredient::upsert(&state.pool, user.id, req).await {
        Ok(row) => (StatusCode::OK, success_to_api_response(row)),
        Err(e) => {
            tracing::error!("Failed to upsert pantry row for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "保存用户食材失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn delete_my_ingredient(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match UserIngredient::delete(&state.pool, user.id, id).await {
        Ok(0) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "记录不存在".to_string()),
        ),
        Ok(_) => (
            StatusCode::OK,
            success_to_api_response(serde_json::json!({})),
        ),
        Err(e) => {
            tracing::error!("Failed to delete pantry row {} for user {}: {}", id, user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "删除用户食材失败".to_string()),
            )
        }
    }
}
