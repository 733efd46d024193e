use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    session::{CurrentUser, SLOT_CAPTCHA, SLOT_CURRENT_USER, SessionId},
    utils::{
        error_codes, error_to_api_response, message_to_api_response, random_numeric_code,
        success_to_api_response,
    },
};

use super::model::{CaptchaResponse, LoginRequest, User};

/// 发送验证码
///
/// 验证码写入会话的 captcha 槽位，覆盖上一次未使用的验证码。
/// 短信通道未接入，验证码直接放在响应体里返回给客户端。
#[axum::debug_handler]
pub async fn send_captcha(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> impl IntoResponse {
    let code = random_numeric_code();

    match state
        .sessions
        .set(&session_id, SLOT_CAPTCHA, &code, state.config.captcha_ttl())
        .await
    {
        Ok(()) => (StatusCode::OK, success_to_api_response(CaptchaResponse { code })),
        Err(e) => {
            tracing::error!("Failed to store captcha: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "验证码生成失败".to_string()),
            )
        }
    }
}

/// 手机号登录
///
/// 手机号未注册时按手机号隐式建号，然后把用户快照绑定进会话。
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if req.phone.is_empty() {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::VALIDATION_ERROR, "手机号不能为空".to_string()),
        );
    }

    // TODO: 接入短信服务后，在这里校验 req.code 与会话中的验证码
    let user = match User::find_by_phone(&state.pool, &req.phone).await {
        Ok(Some(user)) => user,
        Ok(None) => match User::provision(&state.pool, &req.phone).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to provision user for phone {}: {}", req.phone, e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_to_api_response(error_codes::INTERNAL_ERROR, "创建用户失败".to_string()),
                );
            }
        },
        Err(e) => {
            tracing::error!("Failed to look up phone {}: {}", req.phone, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            );
        }
    };

    let snapshot = CurrentUser {
        id: user.id,
        username: user.username.clone(),
        phone: user.phone.clone(),
    };
    let json = match serde_json::to_string(&snapshot) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize session user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "会话写入失败".to_string()),
            );
        }
    };

    match state
        .sessions
        .set(
            &session_id,
            SLOT_CURRENT_USER,
            &json,
            state.config.session_ttl(),
        )
        .await
    {
        Ok(()) => (StatusCode::OK, message_to_api_response("登录成功".to_string())),
        Err(e) => {
            tracing::error!("Failed to bind session user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "会话写入失败".to_string()),
            )
        }
    }
}

/// 获取当前登录用户
#[axum::debug_handler]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> impl IntoResponse {
    match state.sessions.get(&session_id, SLOT_CURRENT_USER).await {
        Ok(Some(json)) => match serde_json::from_str::<CurrentUser>(&json) {
            Ok(user) => (StatusCode::OK, success_to_api_response(user)),
            Err(e) => {
                tracing::error!("Corrupt session user snapshot: {}", e);
                (
                    StatusCode::OK,
                    error_to_api_response(error_codes::NOT_LOGGED_IN, "未登录".to_string()),
                )
            }
        },
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_LOGGED_IN, "未登录".to_string()),
        ),
        Err(e) => {
            tracing::error!("Failed to read session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "会话读取失败".to_string()),
            )
        }
    }
}
