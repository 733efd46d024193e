use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::session::SessionId;

/// 会话cookie名称
pub const SESSION_COOKIE: &str = "fridge_session";

/// 会话中间件
///
/// 读取cookie中的会话ID，不存在则生成新ID并通过Set-Cookie下发。
/// 会话ID以 `SessionId` 扩展注入请求，供后续handler使用。
pub async fn session_cookie(jar: CookieJar, mut req: Request<Body>, next: Next) -> Response {
    let (session_id, jar) = match jar.get(SESSION_COOKIE) {
        Some(cookie) => (cookie.value().to_string(), jar),
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            tracing::debug!("issuing new session id: {}", id);
            let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
                .path("/")
                .http_only(true);
            (id, jar.add(cookie))
        }
    };

    req.extensions_mut().insert(SessionId(session_id));

    (jar, next.run(req).await).into_response()
}
