//! # 사용자 / 구독 API 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 권한 |
//! |--------|------|--------|------|
//! | POST | /api/users | `register` | 누구나 |
//! | GET | /api/users | `list_users` | 누구나 |
//! | GET | /api/users/me | `me` | 로그인 |
//! | GET | /api/users/{id} | `get_user` | 누구나 |
//! | POST | /api/users/set_password | `set_password` | 로그인 |
//! | GET | /api/users/subscriptions | `list_subscriptions` | 로그인 |
//! | POST | /api/users/{id}/subscribe | `subscribe` | 로그인 |
//! | DELETE | /api/users/{id}/subscribe | `unsubscribe` | 로그인 |
//!
//! `/users/me`, `/users/subscriptions`처럼 고정된 경로는 `/users/{id}`보다 우선 매칭됩니다.
//! 그래서 `me`는 사용자 이름으로 쓸 수 없게 막아 둡니다.

use crate::{
    db,
    error::AppError,
    middleware::{auth::Viewer, json::JsonBody},
    models::*,
    permissions::{authorize, authorize_current_user, Action},
    routes::recipes::AppState,
    services::users as user_service,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// 회원가입
///
/// `POST /api/users` → `201 Created` + 사용자 정보 (비밀번호 제외)
pub async fn register(
    State(state): State<AppState>,
    viewer: Viewer,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUser>), AppError> {
    authorize(Action::RegisterUser, &viewer, None)?;

    let user = user_service::register(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(RegisteredUser::from(user))))
}

/// `GET /api/users` → `{ "users": [...] }` (username 순)
pub async fn list_users(
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Json<Value>, AppError> {
    authorize(Action::ListUsers, &viewer, None)?;

    let users = db::users::list_users(&state.pool).await?;
    let mut responses = Vec::with_capacity(users.len());
    for user in users {
        responses.push(user_service::build_response(&state.pool, user, &viewer).await?);
    }

    Ok(Json(json!({ "users": responses })))
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    authorize(Action::RetrieveUser, &viewer, None)?;

    let user = find_user(&state.pool, &id).await?;
    Ok(Json(
        user_service::build_response(&state.pool, user, &viewer).await?,
    ))
}

/// 내 정보
///
/// `GET /api/users/me`
///
/// 토큰은 유효하지만 사용자가 사라진 경우도 401로 처리합니다.
pub async fn me(
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Json<UserResponse>, AppError> {
    let user = authorize_current_user(&state.pool, Action::Me, &viewer).await?;
    Ok(Json(
        user_service::build_response(&state.pool, user, &viewer).await?,
    ))
}

/// 비밀번호 변경
///
/// `POST /api/users/set_password` + `{ "current_password", "new_password" }` → `204`
pub async fn set_password(
    State(state): State<AppState>,
    viewer: Viewer,
    JsonBody(req): JsonBody<SetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    let user = authorize_current_user(&state.pool, Action::SetPassword, &viewer).await?;
    user_service::set_password(&state.pool, &user, &req).await?;

    tracing::info!(user_id = %user.id, "password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// 내가 구독한 작성자 목록
///
/// `GET /api/users/subscriptions?recipes_limit=3` → `{ "subscriptions": [...] }`
///
/// `recipes_limit`은 각 작성자의 레시피 미리보기 개수만 줄이고, `recipes_count`는 그대로입니다.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<SubscriptionQuery>,
) -> Result<Json<Value>, AppError> {
    let user = authorize_current_user(&state.pool, Action::ListSubscriptions, &viewer).await?;

    let authors = db::follows::list_following(&state.pool, &user.id).await?;
    let mut subscriptions = Vec::with_capacity(authors.len());
    for author in authors {
        subscriptions.push(
            user_service::build_subscription(&state.pool, author, &viewer, query.limit()).await?,
        );
    }

    Ok(Json(json!({ "subscriptions": subscriptions })))
}

/// 작성자 구독
///
/// `POST /api/users/{id}/subscribe` → `201 Created` + 구독 정보
///
/// - 작성자 없음 → 404
/// - 자기 자신 / 이미 구독 중 → 400
pub async fn subscribe(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(author_id): Path<String>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let user = authorize_current_user(&state.pool, Action::Subscribe, &viewer).await?;

    let author = find_user(&state.pool, &author_id).await?;
    db::follows::follow(&state.pool, &user.id, &author.id).await?;

    tracing::debug!(user_id = %user.id, author_id = %author.id, "subscribed");
    let subscription =
        user_service::build_subscription(&state.pool, author, &viewer, query.limit()).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// 구독 취소
///
/// `DELETE /api/users/{id}/subscribe` → `204`
pub async fn unsubscribe(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(author_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user = authorize_current_user(&state.pool, Action::Unsubscribe, &viewer).await?;

    let author = find_user(&state.pool, &author_id).await?;
    if !db::follows::unfollow(&state.pool, &user.id, &author.id).await? {
        return Err(AppError::BadRequest(
            "You are not subscribed to this author".to_string(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn find_user(pool: &SqlitePool, id: &str) -> Result<User, AppError> {
    db::users::find_by_id(pool, id)
        .await?
        .ok_or(AppError::NotFound("User"))
}
