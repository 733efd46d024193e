use axum::Json;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Serialize;

/// 统一的API响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resp_data: Option<T>,
}

// 所有 handler 返回类型为 Json<ApiResponse<T>>
pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: 0,
        msg: "success".into(),
        resp_data: Some(data),
    })
}

// 只带提示消息、无数据体的成功响应
pub fn message_to_api_response(msg: String) -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        code: 0,
        msg,
        resp_data: None,
    })
}

pub fn error_to_api_response<T>(code: i32, msg: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code,
        msg,
        resp_data: None,
    })
}

pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const NOT_LOGGED_IN: i32 = 1002;
    pub const NOT_FOUND: i32 = 1004;
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// 生成6位数字验证码
pub fn random_numeric_code() -> String {
    let mut rng = rand::thread_rng();
    (0..6).map(|_| rng.gen_range(0..=9).to_string()).collect()
}

/// 生成默认用户名: "user" + 10位随机字母数字
pub fn random_username() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();
    format!("user{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captcha_code_is_six_digits() {
        for _ in 0..100 {
            let code = random_numeric_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn generated_username_has_fixed_prefix_and_length() {
        for _ in 0..100 {
            let name = random_username();
            assert!(name.starts_with("user"));
            assert_eq!(name.len(), 4 + 10);
            assert!(name[4..].chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn error_envelope_omits_data_field() {
        let Json(resp) = error_to_api_response::<()>(error_codes::NOT_LOGGED_IN, "未登录".into());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 1002);
        assert_eq!(json["msg"], "未登录");
        assert!(json.get("resp_data").is_none());
    }

    #[test]
    fn success_envelope_carries_data() {
        let Json(resp) = success_to_api_response(serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["resp_data"]["id"], 1);
    }
}
