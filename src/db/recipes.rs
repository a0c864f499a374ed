//! # 레시피 데이터베이스 쿼리 모듈
//!
//! `recipes` 테이블 조회와, 레시피 집합체(레시피 행 + 재료 관계 + 태그 관계)의
//! 생성/수정/삭제를 담당합니다.
//!
//! ## 집합체 쓰기와 트랜잭션
//! 생성과 수정은 `pool.begin()`으로 연 트랜잭션 하나 안에서 실행됩니다.
//! - `tx.commit()`까지 가면 레시피 행, 재료 관계, 태그 관계가 한꺼번에 반영됩니다.
//! - 중간에 `?`로 빠져나가면 `Transaction`이 drop되면서 자동으로 롤백됩니다.
//!
//! 따라서 다른 요청이 "새 재료 + 옛 태그" 같은 중간 상태를 볼 수 없습니다.

use crate::error::AppError;
use crate::models::*;
use crate::services::short_link;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const RECIPE_COLUMNS: &str =
    "r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.short_code, r.pub_date";

/// 짧은 코드 충돌 시 다시 뽑는 최대 횟수
const MAX_SHORT_CODE_ATTEMPTS: usize = 10;

pub async fn get_recipe(pool: &SqlitePool, id: &str) -> Result<Option<Recipe>, AppError> {
    let recipe = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {} FROM recipes r WHERE r.id = ?",
        RECIPE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(recipe)
}

pub async fn find_by_short_code(pool: &SqlitePool, code: &str) -> Result<Option<Recipe>, AppError> {
    let recipe = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {} FROM recipes r WHERE r.short_code = ?",
        RECIPE_COLUMNS
    ))
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(recipe)
}

/// 필터 조건에 맞는 레시피를 최신순으로 조회합니다.
///
/// 조건은 요청마다 달라지므로 `QueryBuilder`로 WHERE 절을 조립합니다.
/// 태그 조건은 "주어진 slug 중 하나라도 붙어 있으면" (OR) 입니다.
/// EXISTS 서브쿼리를 쓰므로 태그가 여러 개 맞아도 레시피가 중복되지 않습니다.
pub async fn list_recipes(pool: &SqlitePool, filter: &RecipeFilter) -> Result<Vec<Recipe>, AppError> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {} FROM recipes r WHERE 1 = 1",
        RECIPE_COLUMNS
    ));

    if !filter.tag_slugs.is_empty() {
        builder.push(
            " AND EXISTS (SELECT 1 FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id \
             WHERE rt.recipe_id = r.id AND t.slug IN (",
        );
        let mut separated = builder.separated(", ");
        for slug in &filter.tag_slugs {
            separated.push_bind(slug);
        }
        separated.push_unseparated("))");
    }

    if let Some(author_id) = &filter.author_id {
        builder.push(" AND r.author_id = ").push_bind(author_id);
    }

    let memberships = [
        (MembershipKind::Favorite, &filter.favorited_by),
        (MembershipKind::ShoppingCart, &filter.in_cart_of),
    ];
    for (kind, user_id) in memberships {
        if let Some(user_id) = user_id {
            builder
                .push(format!(
                    " AND EXISTS (SELECT 1 FROM {} m WHERE m.recipe_id = r.id AND m.user_id = ",
                    kind.table()
                ))
                .push_bind(user_id)
                .push(")");
        }
    }

    builder.push(" ORDER BY r.pub_date DESC, r.id DESC");

    let recipes = builder.build_query_as::<Recipe>().fetch_all(pool).await?;
    Ok(recipes)
}

/// 작성자의 레시피를 최신순으로 조회합니다. `limit`이 None이면 전부.
///
/// SQLite에서 `LIMIT -1`은 "제한 없음"을 뜻합니다.
pub async fn list_author_recipes(
    pool: &SqlitePool,
    author_id: &str,
    limit: Option<i64>,
) -> Result<Vec<Recipe>, AppError> {
    let recipes = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {} FROM recipes r WHERE r.author_id = ? ORDER BY r.pub_date DESC, r.id DESC LIMIT ?",
        RECIPE_COLUMNS
    ))
    .bind(author_id)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

pub async fn count_author_recipes(pool: &SqlitePool, author_id: &str) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// 레시피 집합체를 새로 만듭니다 (하나의 트랜잭션).
///
/// ## 처리 흐름
/// 1. 짧은 링크 코드를 발급 기록(`short_codes`)에 예약
/// 2. `recipes` 행 INSERT
/// 3. `recipe_ingredients`, `recipe_tags` 행을 한 번에 INSERT
/// 4. 커밋 후 저장된 레시피를 다시 조회하여 반환
pub async fn create_recipe(
    pool: &SqlitePool,
    author_id: &str,
    draft: &RecipeDraft,
    short_code_length: usize,
) -> Result<Recipe, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    let mut tx = pool.begin().await?;

    let short_code = reserve_short_code(&mut tx, short_code_length).await?;

    sqlx::query(
        r#"
        INSERT INTO recipes (id, author_id, name, image, text, cooking_time, short_code)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(author_id)
    .bind(&draft.name)
    .bind(&draft.image)
    .bind(&draft.text)
    .bind(draft.cooking_time)
    .bind(&short_code)
    .execute(&mut *tx)
    .await?;

    insert_associations(&mut tx, &id, draft).await?;

    tx.commit().await?;

    get_recipe(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created recipe".to_string()))
}

/// 레시피 집합체를 수정합니다 (하나의 트랜잭션).
///
/// 태그와 재료 관계는 병합하지 않고 통째로 교체합니다 (전부 지운 뒤 다시 INSERT).
///
/// ## 반환값
/// - `Ok(Some(Recipe))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 레시피가 없음 (아무것도 바뀌지 않음)
pub async fn update_recipe(
    pool: &SqlitePool,
    id: &str,
    draft: &RecipeDraft,
) -> Result<Option<Recipe>, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE recipes SET name = ?, image = ?, text = ?, cooking_time = ? WHERE id = ?",
    )
    .bind(&draft.name)
    .bind(&draft.image)
    .bind(&draft.text)
    .bind(draft.cooking_time)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        // 커밋하지 않고 반환하면 tx가 drop되며 롤백됩니다.
        return Ok(None);
    }

    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    insert_associations(&mut tx, id, draft).await?;

    tx.commit().await?;

    get_recipe(pool, id).await
}

/// 레시피를 삭제합니다.
///
/// 재료/태그 관계와 즐겨찾기/장바구니 행은 `ON DELETE CASCADE`로 함께 지워집니다.
/// 짧은 링크 코드의 발급 기록은 남겨 두어 같은 코드가 다시 발급되지 않습니다.
pub async fn delete_recipe(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 재료/태그 관계 행을 `INSERT ... VALUES (...), (...)` 한 문장씩으로 넣습니다.
async fn insert_associations(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    draft: &RecipeDraft,
) -> Result<(), AppError> {
    if !draft.ingredients.is_empty() {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) ");
        builder.push_values(&draft.ingredients, |mut row, (ingredient_id, amount)| {
            row.push_bind(recipe_id)
                .push_bind(ingredient_id)
                .push_bind(*amount);
        });
        builder.build().execute(&mut *conn).await?;
    }

    if !draft.tags.is_empty() {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO recipe_tags (recipe_id, tag_id) ");
        builder.push_values(&draft.tags, |mut row, tag_id| {
            row.push_bind(recipe_id).push_bind(tag_id);
        });
        builder.build().execute(&mut *conn).await?;
    }

    Ok(())
}

/// 새 짧은 코드를 뽑아 발급 기록에 넣습니다. 이미 발급된 코드면 다시 뽑습니다.
///
/// `short_codes.code`의 PRIMARY KEY가 충돌을 최종 판정하므로
/// 동시에 같은 코드를 뽑은 두 요청 중 하나만 성공합니다.
async fn reserve_short_code(conn: &mut SqliteConnection, length: usize) -> Result<String, AppError> {
    for _ in 0..MAX_SHORT_CODE_ATTEMPTS {
        let code = short_link::generate_code(length);
        let inserted = sqlx::query("INSERT INTO short_codes (code) VALUES (?)")
            .bind(&code)
            .execute(&mut *conn)
            .await;

        match inserted {
            Ok(_) => return Ok(code),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::debug!(%code, "short code collision, drawing another");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::Internal(
        "Could not allocate a unique short code".to_string(),
    ))
}
