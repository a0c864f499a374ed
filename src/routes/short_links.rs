use crate::{
    db,
    error::AppError,
    middleware::auth::Viewer,
    permissions::{authorize, Action},
    routes::recipes::AppState,
    services::short_link,
};
use axum::{
    extract::{Path, State},
    response::Redirect,
};

/// `GET /s/{code}`: 짧은 링크를 레시피 페이지로 영구 리다이렉트합니다.
///
/// 모르는 코드는 404 대신 프론트엔드의 `/not_found` 페이지로 보냅니다.
pub async fn resolve_short_link(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(code): Path<String>,
) -> Result<Redirect, AppError> {
    authorize(Action::ResolveShortLink, &viewer, None)?;

    let target = match db::recipes::find_by_short_code(&state.pool, &code).await? {
        Some(recipe) => short_link::recipe_page_path(&recipe.id),
        None => {
            tracing::debug!(%code, "unknown short code");
            short_link::NOT_FOUND_PATH.to_string()
        }
    };

    Ok(Redirect::permanent(&target))
}
