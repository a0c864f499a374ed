use crate::{
    db,
    error::AppError,
    middleware::auth::Viewer,
    permissions::{authorize_current_user, Action},
    routes::recipes::AppState,
    services::shopping_list,
};
use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};

/// 장바구니 재료 합계를 텍스트 파일로 내려받습니다.
///
/// `GET /api/recipes/download_shopping_cart` → `text/plain` 첨부 파일
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<impl IntoResponse, AppError> {
    let user = authorize_current_user(&state.pool, Action::DownloadShoppingList, &viewer).await?;

    let items = db::shopping_list::shopping_list(&state.pool, &user.id).await?;
    let body = shopping_list::render(&items);

    let headers = [
        (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            CONTENT_DISPOSITION,
            shopping_list::content_disposition(&user.username),
        ),
    ];

    Ok((headers, body))
}
