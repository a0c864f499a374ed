use crate::error::AppError;
use crate::models::User;
use sqlx::SqlitePool;

/// `user_id`가 `author_id`를 구독합니다.
///
/// 자기 자신 구독은 테이블의 CHECK 제약도 막지만, 여기서 먼저 거절해
/// 일관된 `Conflict` 메시지를 돌려줍니다.
pub async fn follow(pool: &SqlitePool, user_id: &str, author_id: &str) -> Result<(), AppError> {
    if user_id == author_id {
        return Err(AppError::Conflict("You cannot subscribe to yourself".to_string()));
    }

    sqlx::query("INSERT INTO follows (user_id, author_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "You are already subscribed to this author"))?;

    Ok(())
}

/// 구독을 취소합니다. 구독 중이 아니었으면 `false`.
pub async fn unfollow(pool: &SqlitePool, user_id: &str, author_id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM follows WHERE user_id = ? AND author_id = ?")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn is_following(pool: &SqlitePool, user_id: &str, author_id: &str) -> Result<bool, AppError> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM follows WHERE user_id = ? AND author_id = ?")
            .bind(user_id)
            .bind(author_id)
            .fetch_optional(pool)
            .await?;

    Ok(found.is_some())
}

/// 사용자가 구독 중인 작성자 목록 (username 순)
pub async fn list_following(pool: &SqlitePool, user_id: &str) -> Result<Vec<User>, AppError> {
    let authors = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.password_hash, u.created_at
        FROM users u
        JOIN follows f ON f.author_id = u.id
        WHERE f.user_id = ?
        ORDER BY u.username
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(authors)
}
