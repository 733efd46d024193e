use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    middleware::{log_errors, require_login, session_cookie},
};

pub mod auth;
pub mod ingredient;
pub mod recipe;
pub mod shopping;

/// 组装路由
///
/// 认证三个接口为公开路由；其余CRUD路由经过登录校验中间件。
/// 会话中间件包在最外层，保证每个请求都有会话ID。
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/captcha", post(auth::send_captcha))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_me));

    let protected_routes = Router::new()
        // 食材
        .route(
            "/ingredients",
            get(ingredient::list_ingredients).post(ingredient::create_ingredient),
        )
        .route("/ingredients/{id}", get(ingredient::get_ingredient))
        .route(
            "/users/me/ingredients",
            get(ingredient::list_my_ingredients).post(ingredient::put_my_ingredient),
        )
        .route(
            "/users/me/ingredients/{id}",
            delete(ingredient::delete_my_ingredient),
        )
        // 食谱
        .route(
            "/recipes",
            get(recipe::list_recipes).post(recipe::create_recipe),
        )
        .route("/recipes/{id}", get(recipe::get_recipe))
        .route(
            "/users/me/favorites",
            get(recipe::list_favorites).post(recipe::add_favorite),
        )
        .route(
            "/users/me/favorites/{recipe_id}",
            delete(recipe::remove_favorite),
        )
        .route(
            "/users/me/tried",
            get(recipe::list_tried).post(recipe::create_tried),
        )
        .route(
            "/users/me/recommendations",
            get(recipe::list_recommendations),
        )
        // 购物清单
        .route(
            "/shopping-lists",
            get(shopping::list_shopping_lists).post(shopping::create_shopping_list),
        )
        .route(
            "/shopping-lists/{id}/items",
            get(shopping::list_items).post(shopping::create_item),
        )
        .route(
            "/shopping-lists/{id}/items/{item_id}",
            delete(shopping::delete_item),
        )
        // 登录校验中间件
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_login,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(session_cookie))
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}
