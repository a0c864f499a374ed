//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과, 이들을 URL에 연결하는 `router()`입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `memberships`: 즐겨찾기/장바구니 추가·제거
//! - `recipes`: 레시피 CRUD, 짧은 링크 조회, 공유 상태(`AppState`)
//! - `shopping_list`: 장바구니 목록 파일 다운로드
//! - `short_links`: `/s/{code}` 리다이렉트
//! - `tags`: 태그/재료 카탈로그 조회
//! - `users`: 회원가입, 사용자 조회, 비밀번호 변경, 구독

pub mod health;
pub mod memberships;
pub mod recipes;
pub mod shopping_list;
pub mod short_links;
pub mod tags;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

pub use recipes::AppState;

/// 전체 라우터를 만듭니다.
///
/// - `/api/...`: JSON API
/// - `/s/{code}`: 짧은 링크 (API 밖, 브라우저가 직접 여는 주소)
///
/// CORS, 요청 로깅, 프론트엔드 정적 파일은 `main.rs`에서 이 위에 얹습니다.
/// 테스트는 이 함수가 만든 라우터를 그대로 씁니다.
pub fn router(state: AppState) -> Router {
    // 고정 경로(`download_shopping_cart`, `me`, `subscriptions`, `set_password`)는
    // 같은 위치의 `{id}`보다 먼저 매칭됩니다.
    let recipe_routes = Router::new()
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(shopping_list::download_shopping_cart),
        )
        .route(
            "/recipes/{id}",
            get(recipes::get_recipe)
                .patch(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/recipes/{id}/get-link", get(recipes::get_short_link))
        .route(
            "/recipes/{id}/favorite",
            post(memberships::add_favorite).delete(memberships::remove_favorite),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(memberships::add_to_shopping_cart).delete(memberships::remove_from_shopping_cart),
        );

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::register))
        .route("/users/me", get(users::me))
        .route("/users/set_password", post(users::set_password))
        .route("/users/subscriptions", get(users::list_subscriptions))
        .route("/users/{id}", get(users::get_user))
        .route(
            "/users/{id}/subscribe",
            post(users::subscribe).delete(users::unsubscribe),
        );

    let catalog_routes = Router::new()
        .route("/tags", get(tags::list_tags))
        .route("/tags/{id}", get(tags::get_tag))
        .route("/ingredients", get(tags::list_ingredients))
        .route("/ingredients/{id}", get(tags::get_ingredient));

    let api_routes = Router::new()
        .merge(recipe_routes)
        .merge(user_routes)
        .merge(catalog_routes)
        .route("/health", get(health::health_check));

    Router::new()
        .nest("/api", api_routes)
        .route("/s/{code}", get(short_links::resolve_short_link))
        .with_state(state)
}
