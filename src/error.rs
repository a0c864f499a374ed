//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `FieldErrors`: 필드별 검증 실패 메시지를 모아 한 번에 보고
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 응답 본문 형태:
//! ```json
//! { "error": { "code": "validation_error", "message": "...", "fields": { "tags": ["..."] } } }
//! ```

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 필드 단위 검증 에러 모음
///
/// 검증 규칙을 정해진 순서대로 돌면서 실패한 규칙을 모두 쌓아둡니다.
/// 첫 번째로 쌓인 메시지가 응답의 대표 메시지(`message`)가 됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 특정 필드에 쌓인 메시지들
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    /// 에러가 쌓인 필드 이름들 (규칙 순서, 중복 제거)
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for (field, _) in &self.entries {
            if !fields.contains(&field.as_str()) {
                fields.push(field);
            }
        }
        fields
    }

    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, m)| m.as_str())
    }

    /// 비어 있으면 `Ok(())`, 아니면 `AppError::Validation`
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }

    fn to_map(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (field, message) in &self.entries {
            map.entry(field.as_str()).or_default().push(message.as_str());
        }
        map
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self
            .entries
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 필드 단위 검증 실패 (HTTP 400)
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 이미 존재하는 관계나 자기 자신 구독 등 상태 충돌 (HTTP 400)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 인증 필요 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 권한 없음: 작성자가 아닌 사용자의 수정/삭제 시도 (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error → AppError::Database 자동 변환
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// 필드 하나짜리 검증 에러를 간편하게 만듭니다.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(field, message);
        AppError::Validation(errors)
    }

    /// UNIQUE 제약 위반이면 주어진 메시지의 `Conflict`로, 아니면 `Database`로 변환합니다.
    ///
    /// 동시에 같은 관계를 두 번 INSERT하는 경쟁 상황은
    /// 애플리케이션의 사전 확인이 아니라 DB 제약이 최종적으로 막습니다.
    pub fn from_unique_violation(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(message.to_string())
            }
            _ => AppError::Database(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::NotFound(_) => ("not_found", self.to_string()),
            AppError::Validation(ref errors) => {
                let body = Json(json!({
                    "error": {
                        "code": "validation_error",
                        "message": errors.first().unwrap_or("Invalid input"),
                        "fields": errors.to_map(),
                    }
                }));
                return (status, body).into_response();
            }
            AppError::BadRequest(ref msg) => ("bad_request", msg.clone()),
            AppError::Conflict(ref msg) => ("conflict", msg.clone()),
            AppError::Unauthorized(ref msg) => ("unauthorized", msg.clone()),
            AppError::Forbidden(ref msg) => ("forbidden", msg.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ("internal_error", "An internal error occurred".to_string())
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                ("database_error", "A database error occurred".to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
