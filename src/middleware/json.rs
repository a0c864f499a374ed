//! # JSON 요청 본문 추출자
//!
//! axum 기본 `Json`은 타입이 맞지 않는 본문(`"amount": 1.5`, `"cooking_time": "abc"`)을
//! 422 + 평문으로 거절합니다. `JsonBody`는 같은 파싱을 거치되 거절을 `AppError`로 바꿔
//! 다른 검증 실패와 똑같이 400 + `{"error": {...}}` 형태로 응답합니다.
//!
//! ```rust,ignore
//! pub async fn create_recipe(JsonBody(payload): JsonBody<RecipePayload>) { ... }
//! ```

use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::AppError;

/// 요청 본문을 `T`로 역직렬화합니다. 실패하면 `AppError` (400).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// 필드를 특정할 수 없는 본문 에러를 담는 키
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let text = err.body_text();
                let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(&text);
                AppError::field(&field_of(detail), detail)
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

/// 역직렬화 에러 메시지에서 최상위 필드 이름을 꺼냅니다.
///
/// - `ingredients[0].amount: invalid type: ...` → `ingredients`
/// - ``missing field `name` at line 1 column 2`` → `name`
/// - 그 밖에는 `non_field_errors`
fn field_of(detail: &str) -> String {
    if let Some(rest) = detail.strip_prefix("missing field `") {
        if let Some((name, _)) = rest.split_once('`') {
            return name.to_string();
        }
    }

    match detail.split_once(": ") {
        Some((path, _)) if !path.is_empty() && !path.contains(char::is_whitespace) => path
            .split(['.', '['])
            .next()
            .filter(|field| !field.is_empty())
            .unwrap_or(NON_FIELD_ERRORS)
            .to_string(),
        _ => NON_FIELD_ERRORS.to_string(),
    }
}
