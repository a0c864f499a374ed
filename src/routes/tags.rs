//! # 태그 / 재료 카탈로그 핸들러
//!
//! 카탈로그는 읽기 전용입니다. 생성은 `load-catalog` 도구가 맡습니다.
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/tags | `list_tags` | 전체 태그 (이름순) |
//! | GET | /api/tags/{id} | `get_tag` | 태그 하나 |
//! | GET | /api/ingredients?name= | `list_ingredients` | 이름 앞부분으로 검색 |
//! | GET | /api/ingredients/{id} | `get_ingredient` | 재료 하나 |

use crate::{
    db,
    error::AppError,
    middleware::auth::Viewer,
    models::*,
    permissions::{authorize, Action},
    routes::recipes::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

/// `GET /api/tags` → `{ "tags": [...] }`
pub async fn list_tags(
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Json<Value>, AppError> {
    authorize(Action::ListTags, &viewer, None)?;

    let tags = db::tags::list_tags(&state.pool).await?;
    Ok(Json(json!({ "tags": tags })))
}

/// `GET /api/tags/{id}`
pub async fn get_tag(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Json<Tag>, AppError> {
    authorize(Action::ListTags, &viewer, None)?;

    let tag = db::tags::get_tag(&state.pool, &id)
        .await?
        // None(태그 없음)이면 404
        .ok_or(AppError::NotFound("Tag"))?;
    Ok(Json(tag))
}

/// `GET /api/ingredients?name=sa` → `{ "ingredients": [...] }`
///
/// `name`은 대소문자를 구분하지 않는 앞부분 일치입니다 (ASCII 기준).
pub async fn list_ingredients(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(search): Query<IngredientSearch>,
) -> Result<Json<Value>, AppError> {
    authorize(Action::ListIngredients, &viewer, None)?;

    let ingredients =
        db::ingredients::list_ingredients(&state.pool, search.name.as_deref()).await?;
    Ok(Json(json!({ "ingredients": ingredients })))
}

/// `GET /api/ingredients/{id}`
pub async fn get_ingredient(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Json<Ingredient>, AppError> {
    authorize(Action::ListIngredients, &viewer, None)?;

    let ingredient = db::ingredients::get_ingredient(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound("Ingredient"))?;
    Ok(Json(ingredient))
}
