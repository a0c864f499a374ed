//! # 즐겨찾기 / 장바구니 관계 쿼리
//!
//! 두 관계는 테이블 이름만 다르므로 모든 함수가 `MembershipKind`를 받아
//! `kind.table()`로 대상 테이블을 고릅니다.
//! 테이블 이름은 고정된 `&'static str`이라 SQL에 직접 넣어도 안전합니다.

use crate::error::AppError;
use crate::models::MembershipKind;
use sqlx::SqlitePool;

/// (user, recipe) 관계를 추가합니다.
///
/// 이미 있으면 PRIMARY KEY 위반 → `Conflict` (종류별 메시지).
pub async fn add(
    pool: &SqlitePool,
    kind: MembershipKind,
    user_id: &str,
    recipe_id: &str,
) -> Result<(), AppError> {
    sqlx::query(&format!(
        "INSERT INTO {} (user_id, recipe_id) VALUES (?, ?)",
        kind.table()
    ))
    .bind(user_id)
    .bind(recipe_id)
    .execute(pool)
    .await
    .map_err(|e| AppError::from_unique_violation(e, kind.already_exists_message()))?;

    Ok(())
}

/// 관계를 제거합니다. 원래 없었으면 `false`.
pub async fn remove(
    pool: &SqlitePool,
    kind: MembershipKind,
    user_id: &str,
    recipe_id: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(&format!(
        "DELETE FROM {} WHERE user_id = ? AND recipe_id = ?",
        kind.table()
    ))
    .bind(user_id)
    .bind(recipe_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn contains(
    pool: &SqlitePool,
    kind: MembershipKind,
    user_id: &str,
    recipe_id: &str,
) -> Result<bool, AppError> {
    let found: Option<i64> = sqlx::query_scalar(&format!(
        "SELECT 1 FROM {} WHERE user_id = ? AND recipe_id = ?",
        kind.table()
    ))
    .bind(user_id)
    .bind(recipe_id)
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}
