use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    session::CurrentUser,
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

use super::model::{
    CreateShoppingListItemRequest, CreateShoppingListRequest, ShoppingList, ShoppingListItem,
};

#[axum::debug_handler]
pub async fn list_shopping_lists(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    match ShoppingList::list_for_user(&state.pool, user.id).await {
        Ok(lists) => (StatusCode::OK, success_to_api_response(lists)),
        Err(e) => {
            tracing::error!("Failed to list shopping lists for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取购物清单失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn create_shopping_list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateShoppingListRequest>,
) -> impl IntoResponse {
    match ShoppingList::create(&state.pool, user.id, req.name).await {
        Ok(list) => (StatusCode::CREATED, success_to_api_response(list)),
        Err(e) => {
            tracing::error!("Failed to create shopping list for user {}: {}", user.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "创建购物清单失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn list_items(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(list_id): Path<i64>,
) -> impl IntoResponse {
    match ShoppingListItem::list_for_list(&state.pool, user.id, list_id).await {
        Ok(items) => (StatusCode::OK, success_to_api_response(items)),
        Err(e) => {
            tracing::error!(
                "Failed to list items of shopping list {} for user {}: {}",
                list_id,
                user.id,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "获取清单明细失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn create_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(list_id): Path<i64>,
    Json(req): Json<CreateShoppingListItemRequest>,
) -> impl IntoResponse {
    if req.ingredient_name.is_empty() {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::VALIDATION_ERROR, "商品名称不能为空".to_string()),
        );
    }

    match ShoppingListItem::create(&state.pool, user.id, list_id, req).await {
        Ok(Some(item)) => (StatusCode::CREATED, success_to_api_response(item)),
        // 清单不存在或不属于当前用户
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "购物清单不存在".to_string()),
        ),
        Err(e) => {
            tracing::error!(
                "Failed to add item to shopping list {} for user {}: {}",
                list_id,
                user.id,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "添加清单明细失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((list_id, item_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    match ShoppingListItem::delete(&state.pool, user.id, list_id, item_id).await {
        Ok(0) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "清单明细不存在".to_string()),
        ),
        Ok(_) => (
            StatusCode::OK,
            success_to_api_response(serde_json::json!({})),
        ),
        Err(e) => {
            tracing::error!(
                "Failed to delete item {} of shopping list {} for user {}: {}",
                item_id,
                list_id,
                user.id,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "删除清单明细失败".to_string()),
            )
        }
    }
}
