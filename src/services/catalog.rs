//! # 카탈로그 적재
//!
//! `load-catalog` 도구가 JSON 파일의 태그/재료를 DB에 넣을 때 씁니다.
//! 이미 있는 항목은 건너뛰므로 같은 파일을 여러 번 적재해도 결과가 같습니다.
//!
//! ```json
//! {
//!   "tags": [{ "name": "Завтрак", "color": "#E26C2D", "slug": "breakfast" }],
//!   "ingredients": [{ "name": "соль", "measurement_unit": "г" }]
//! }
//! ```

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{NewIngredient, NewTag};

#[derive(Debug, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub tags: Vec<NewTag>,
    #[serde(default)]
    pub ingredients: Vec<NewIngredient>,
}

/// 적재 결과: 새로 들어간 개수와 이미 있어서 건너뛴 개수
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub tags_inserted: usize,
    pub tags_skipped: usize,
    pub ingredients_inserted: usize,
    pub ingredients_skipped: usize,
}

pub async fn load(pool: &SqlitePool, catalog: &Catalog) -> Result<LoadReport, AppError> {
    let mut report = LoadReport::default();

    for tag in &catalog.tags {
        if db::tags::insert_tag(pool, tag).await? {
            report.tags_inserted += 1;
        } else {
            report.tags_skipped += 1;
        }
    }

    for ingredient in &catalog.ingredients {
        if db::ingredients::insert_ingredient(pool, ingredient).await? {
            report.ingredients_inserted += 1;
        } else {
            report.ingredients_skipped += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    const CATALOG: &str = r##"{
        "tags": [
            { "name": "Завтрак", "color": "#E26C2D", "slug": "breakfast" },
            { "name": "Lunch", "color": "#49B64E" }
        ],
        "ingredients": [
            { "name": "соль", "measurement_unit": "г" },
            { "name": "молоко", "measurement_unit": "мл" }
        ]
    }"##;

    #[tokio::test]
    async fn loading_twice_is_idempotent() {
        let pool = test_pool().await;
        let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();

        let first = load(&pool, &catalog).await.unwrap();
        assert_eq!(first.tags_inserted, 2);
        assert_eq!(first.ingredients_inserted, 2);

        let second = load(&pool, &catalog).await.unwrap();
        assert_eq!(second.tags_skipped, 2);
        assert_eq!(second.ingredients_skipped, 2);

        let slugs: Vec<String> = db::tags::list_tags(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.slug)
            .collect();
        assert!(slugs.contains(&"lunch".to_string()));
        assert!(slugs.contains(&"breakfast".to_string()));
    }
}
