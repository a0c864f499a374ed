//! # 재료 카탈로그 쿼리
//!
//! 재료는 (이름, 단위) 조합이 유일한 참조 데이터입니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// 재료 목록을 이름순으로 조회합니다. `name_prefix`가 있으면 이름이 그 값으로 시작하는 것만.
///
/// 대소문자는 구분하지 않습니다. 키릴 문자도 접어야 하므로 SQL의 `lower()` 대신
/// Rust에서 소문자로 바꾼 `search_name` 컬럼과 비교합니다.
/// LIKE의 와일드카드(`%`, `_`)는 이스케이프해서 사용자가 입력한 글자 그대로 비교합니다.
pub async fn list_ingredients(
    pool: &SqlitePool,
    name_prefix: Option<&str>,
) -> Result<Vec<Ingredient>, AppError> {
    let ingredients = match name_prefix.map(str::trim).filter(|p| !p.is_empty()) {
        Some(prefix) => {
            sqlx::query_as::<_, Ingredient>(
                r#"
                SELECT id, name, measurement_unit
                FROM ingredients
                WHERE search_name LIKE ? ESCAPE '\'
                ORDER BY name, measurement_unit
                "#,
            )
            .bind(format!("{}%", escape_like(&prefix.to_lowercase())))
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Ingredient>(
                "SELECT id, name, measurement_unit FROM ingredients ORDER BY name, measurement_unit",
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(ingredients)
}

pub async fn get_ingredient(pool: &SqlitePool, id: &str) -> Result<Option<Ingredient>, AppError> {
    let ingredient = sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, measurement_unit FROM ingredients WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(ingredient)
}

/// 주어진 ID 중 실제로 존재하는 재료 ID만 돌려줍니다.
pub async fn existing_ingredient_ids(
    pool: &SqlitePool,
    ids: &[String],
) -> Result<Vec<String>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id FROM ingredients WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let rows: Vec<(String,)> = builder.build_query_as().fetch_all(pool).await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// 카탈로그 재료를 추가합니다. 같은 (이름, 단위)가 있으면 건너뜁니다.
pub async fn insert_ingredient(pool: &SqlitePool, ingredient: &NewIngredient) -> Result<bool, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let name = ingredient.name.trim();

    let result = sqlx::query(
        r#"
        INSERT INTO ingredients (id, name, measurement_unit, search_name) VALUES (?, ?, ?, ?)
        ON CONFLICT (name, measurement_unit) DO NOTHING
        "#,
    )
    .bind(&id)
    .bind(name)
    .bind(ingredient.measurement_unit.trim())
    .bind(name.to_lowercase())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 특정 레시피의 재료와 양을 재료 이름순으로 조회합니다.
pub async fn get_recipe_ingredients(
    pool: &SqlitePool,
    recipe_id: &str,
) -> Result<Vec<RecipeIngredientAmount>, AppError> {
    let rows = sqlx::query_as::<_, RecipeIngredientAmount>(
        r#"
        SELECT i.id, i.name, i.measurement_unit, ri.amount
        FROM recipe_ingredients ri
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = ?
        ORDER BY i.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
