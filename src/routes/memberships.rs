//! # 즐겨찾기 / 장바구니 핸들러
//!
//! | 메서드 | 경로 | 성공 응답 |
//! |--------|------|-----------|
//! | POST | /api/recipes/{id}/favorite | 201 + 레시피 축약 |
//! | DELETE | /api/recipes/{id}/favorite | 204 |
//! | POST | /api/recipes/{id}/shopping_cart | 201 + 레시피 축약 |
//! | DELETE | /api/recipes/{id}/shopping_cart | 204 |
//!
//! 네 핸들러 모두 `MembershipKind`만 바꿔 같은 함수(`add`/`remove`)를 호출합니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::Viewer,
    models::*,
    permissions::{authorize_current_user, Action},
    routes::recipes::{find_recipe, AppState},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn add_favorite(
    state: State<AppState>,
    viewer: Viewer,
    path: Path<String>,
) -> Result<(StatusCode, Json<RecipeMinimal>), AppError> {
    add(state, viewer, path, MembershipKind::Favorite).await
}

pub async fn remove_favorite(
    state: State<AppState>,
    viewer: Viewer,
    path: Path<String>,
) -> Result<StatusCode, AppError> {
    remove(state, viewer, path, MembershipKind::Favorite).await
}

pub async fn add_to_shopping_cart(
    state: State<AppState>,
    viewer: Viewer,
    path: Path<String>,
) -> Result<(StatusCode, Json<RecipeMinimal>), AppError> {
    add(state, viewer, path, MembershipKind::ShoppingCart).await
}

pub async fn remove_from_shopping_cart(
    state: State<AppState>,
    viewer: Viewer,
    path: Path<String>,
) -> Result<StatusCode, AppError> {
    remove(state, viewer, path, MembershipKind::ShoppingCart).await
}

/// 레시피가 없으면 404, 이미 담겨 있으면 400
async fn add(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(recipe_id): Path<String>,
    kind: MembershipKind,
) -> Result<(StatusCode, Json<RecipeMinimal>), AppError> {
    let user = authorize_current_user(&state.pool, Action::AddMembership, &viewer).await?;

    let recipe = find_recipe(&state.pool, &recipe_id).await?;
    db::memberships::add(&state.pool, kind, &user.id, &recipe.id).await?;

    tracing::debug!(?kind, user_id = %user.id, recipe_id = %recipe.id, "membership added");
    Ok((StatusCode::CREATED, Json(RecipeMinimal::from(recipe))))
}

/// 레시피가 없으면 404, 담겨 있지 않았으면 400
async fn remove(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(recipe_id): Path<String>,
    kind: MembershipKind,
) -> Result<StatusCode, AppError> {
    let user = authorize_current_user(&state.pool, Action::RemoveMembership, &viewer).await?;

    let recipe = find_recipe(&state.pool, &recipe_id).await?;
    if !db::memberships::remove(&state.pool, kind, &user.id, &recipe.id).await? {
        return Err(AppError::BadRequest(kind.not_a_member_message().to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
