use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    session::{CurrentUser, SLOT_CURRENT_USER, SessionId},
    utils::{error_codes, error_to_api_response},
};

/// 登录校验中间件
///
/// 从会话的 current_user 槽位加载已登录用户，注入 `CurrentUser` 扩展；
/// 未登录则直接拒绝。
pub async fn require_login(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(SessionId(session_id)) = req.extensions().get::<SessionId>().cloned() else {
        return not_logged_in();
    };

    let snapshot = match state.sessions.get(&session_id, SLOT_CURRENT_USER).await {
        Ok(Some(json)) => json,
        Ok(None) => return not_logged_in(),
        Err(e) => {
            tracing::error!("Failed to load session user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response::<()>(error_codes::INTERNAL_ERROR, "会话读取失败".to_string()),
            )
                .into_response();
        }
    };

    let user: CurrentUser = match serde_json::from_str(&snapshot) {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Corrupt session user snapshot: {}", e);
            return not_logged_in();
        }
    };

    req.extensions_mut().insert(user);
    next.run(req).await
}

fn not_logged_in() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        error_to_api_response::<()>(error_codes::NOT_LOGGED_IN, "未登录".to_string()),
    )
        .into_response()
}
