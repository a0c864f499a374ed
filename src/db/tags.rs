//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 조회, 카탈로그 적재, 레시피-태그 관계 조회 함수들입니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name, color, slug)
//! - `recipe_tags`: 레시피와 태그의 다대다(N:M) 관계 테이블

use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// 모든 태그를 이름순으로 조회합니다.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>("SELECT id, name, color, slug FROM tags ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(tags)
}

/// ID로 태그 하나를 조회합니다.
pub async fn get_tag(pool: &SqlitePool, id: &str) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>("SELECT id, name, color, slug FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(tag)
}

/// 주어진 ID 중 실제로 존재하는 태그 ID만 돌려줍니다.
///
/// `QueryBuilder`로 `IN (?, ?, ...)` 자리표시자를 값 개수만큼 만듭니다.
pub async fn existing_tag_ids(pool: &SqlitePool, ids: &[String]) -> Result<Vec<String>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id FROM tags WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let rows: Vec<(String,)> = builder.build_query_as().fetch_all(pool).await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// 카탈로그 태그를 추가합니다. slug나 색상이 이미 있으면 건너뜁니다.
///
/// ## 반환값
/// - `true`: 새로 추가됨
/// - `false`: 같은 slug/색상의 태그가 이미 있어 무시됨
pub async fn insert_tag(pool: &SqlitePool, tag: &NewTag) -> Result<bool, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let slug = tag
        .slug
        .clone()
        .unwrap_or_else(|| slug::slugify(&tag.name));

    let result = sqlx::query(
        "INSERT INTO tags (id, name, color, slug) VALUES (?, ?, ?, ?) ON CONFLICT DO NOTHING",
    )
    .bind(&id)
    .bind(&tag.name)
    .bind(&tag.color)
    .bind(&slug)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 특정 레시피에 연결된 모든 태그를 이름순으로 조회합니다.
///
/// ```sql
/// tags ←── recipe_tags ──→ recipes
/// ```
pub async fn get_recipe_tags(pool: &SqlitePool, recipe_id: &str) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.color, t.slug
        FROM tags t
        JOIN recipe_tags rt ON rt.tag_id = t.id
        WHERE rt.recipe_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}
