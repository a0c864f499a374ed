//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 서비스(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `users`: 사용자 조회/가입/비밀번호 변경
//! - `tags`, `ingredients`: 카탈로그 조회와 적재
//! - `recipes`: 레시피 조회, 필터, 트랜잭션 기반 집합체 쓰기
//! - `memberships`: 즐겨찾기/장바구니 (user, recipe) 관계
//! - `follows`: 구독(팔로우) 관계
//! - `shopping_list`: 장바구니 재료 집계 쿼리

pub mod follows;
pub mod ingredients;
pub mod memberships;
pub mod recipes;
pub mod shopping_list;
pub mod tags;
pub mod users;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// SQLite 연결 풀을 만듭니다.
///
/// 외래키 제약(ON DELETE CASCADE 등)이 동작하도록 `foreign_keys`를 켭니다.
/// 인메모리 DB(`sqlite::memory:`)는 연결마다 별도의 DB가 생기므로
/// 연결을 1개로 고정하고 유휴 연결이 닫히지 않게 합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = database_url.contains(":memory:");
    let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory {
        1
    } else {
        max_connections
    });
    if in_memory {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    pool_options.connect_with(options).await
}

/// 아직 적용되지 않은 마이그레이션(./migrations)을 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// 테스트용: 스키마가 적용된 빈 인메모리 DB
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create test pool");
    migrate(&pool).await.expect("Failed to run migrations");
    pool
}
