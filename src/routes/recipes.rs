//! # 레시피 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 권한 |
//! |--------|------|--------|------|
//! | GET | /api/recipes | `list_recipes` | 누구나 |
//! | POST | /api/recipes | `create_recipe` | 로그인 |
//! | GET | /api/recipes/{id} | `get_recipe` | 누구나 |
//! | PATCH | /api/recipes/{id} | `update_recipe` | 작성자 |
//! | DELETE | /api/recipes/{id} | `delete_recipe` | 작성자 |
//! | GET | /api/recipes/{id}/get-link | `get_short_link` | 누구나 |
//!
//! ## Axum 핸들러 패턴
//! - `State(state)`: 애플리케이션 공유 상태 (DB 풀, 설정값)
//! - `viewer: Viewer`: 요청자 (Authorization 헤더가 없으면 익명)
//! - `Path(id)`: URL 경로의 `{id}` 부분
//! - `JsonBody(payload)`: 요청 본문. 본문을 소비하므로 항상 마지막 인자입니다.
//!   타입이 맞지 않는 본문도 400 에러 본문으로 응답합니다.

use crate::{
    config::Config,
    db,
    error::AppError,
    middleware::{auth::Viewer, json::JsonBody},
    models::*,
    permissions::{authorize, authorize_current_user, require_user, Action},
    services::{recipes as recipe_service, short_link},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `SqlitePool`은 내부적으로 Arc이므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// JWT 토큰 검증용 비밀키
    pub jwt_secret: String,
    /// 짧은 링크 주소의 앞부분
    pub public_url: String,
    /// 재료 양과 조리 시간의 최솟값
    pub min_value: i64,
    /// 새로 발급하는 짧은 링크 코드의 길이
    pub short_code_length: usize,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            public_url: config.public_url.clone(),
            min_value: config.min_value,
            short_code_length: config.short_code_length,
        }
    }
}

/// 레시피 목록을 최신순으로 조회합니다.
///
/// `GET /api/recipes?tags=breakfast&tags=lunch&author=<id>&is_favorited=1`
///
/// `tags`처럼 같은 키가 반복되는 쿼리는 axum 기본 `Query`로 Vec에 담을 수 없어서
/// axum-extra의 `Query`를 씁니다.
pub async fn list_recipes(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<Value>, AppError> {
    authorize(Action::ListRecipes, &viewer, None)?;

    let filter = recipe_service::filter_from_query(query, &viewer);
    let recipes = db::recipes::list_recipes(&state.pool, &filter).await?;

    let mut responses = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        responses.push(recipe_service::build_response(&state.pool, recipe, &viewer).await?);
    }

    Ok(Json(json!({ "recipes": responses })))
}

/// `GET /api/recipes/{id}`
pub async fn get_recipe(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, AppError> {
    authorize(Action::RetrieveRecipe, &viewer, None)?;

    let recipe = find_recipe(&state.pool, &id).await?;
    Ok(Json(
        recipe_service::build_response(&state.pool, recipe, &viewer).await?,
    ))
}

/// 새 레시피를 만듭니다.
///
/// `POST /api/recipes` → `201 Created` + 레시피 전체
///
/// 검증 실패 시 400과 필드별 에러를 돌려주며, 이 경우 DB에는 아무것도 남지 않습니다.
pub async fn create_recipe(
    State(state): State<AppState>,
    viewer: Viewer,
    JsonBody(payload): JsonBody<RecipePayload>,
) -> Result<(StatusCode, Json<RecipeResponse>), AppError> {
    let author = authorize_current_user(&state.pool, Action::CreateRecipe, &viewer).await?;

    let recipe = recipe_service::create(
        &state.pool,
        &author.id,
        payload,
        state.min_value,
        state.short_code_length,
        &viewer,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// 레시피를 수정합니다 (작성자만).
///
/// `PATCH /api/recipes/{id}`
///
/// 스칼라 필드는 생략하면 유지되고, `ingredients`/`tags`는 보낸 목록으로 통째로 바뀝니다.
/// 순서: 로그인 확인(401) → 레시피 존재 확인(404) → 작성자 확인(403) → 검증(400)
pub async fn update_recipe(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<RecipePayload>,
) -> Result<Json<RecipeResponse>, AppError> {
    require_user(&viewer)?;
    let existing = find_recipe(&state.pool, &id).await?;
    authorize(Action::UpdateRecipe, &viewer, Some(&existing.author_id))?;

    let recipe =
        recipe_service::update(&state.pool, &existing, payload, state.min_value, &viewer).await?;
    Ok(Json(recipe))
}

/// 레시피를 삭제합니다 (작성자만).
///
/// `DELETE /api/recipes/{id}` → `204 No Content`
pub async fn delete_recipe(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    require_user(&viewer)?;
    let existing = find_recipe(&state.pool, &id).await?;
    authorize(Action::DeleteRecipe, &viewer, Some(&existing.author_id))?;

    if !db::recipes::delete_recipe(&state.pool, &id).await? {
        return Err(AppError::NotFound("Recipe"));
    }

    tracing::info!(recipe_id = %id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// 레시피의 짧은 링크를 돌려줍니다.
///
/// `GET /api/recipes/{id}/get-link` → `{ "short-link": "https://.../s/aB3xY9" }`
pub async fn get_short_link(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    authorize(Action::GetShortLink, &viewer, None)?;

    let recipe = find_recipe(&state.pool, &id).await?;
    Ok(Json(ShortLinkResponse {
        short_link: short_link::short_link_url(&state.public_url, &recipe.short_code),
    }))
}

/// 레시피를 찾고, 없으면 404
pub(crate) async fn find_recipe(pool: &SqlitePool, id: &str) -> Result<Recipe, AppError> {
    db::recipes::get_recipe(pool, id)
        .await?
        .ok_or(AppError::NotFound("Recipe"))
}
