//! # 장바구니 재료 집계
//!
//! 장바구니에 담긴 모든 레시피의 재료를 (이름, 단위)별로 합산합니다.
//! 레시피를 하나씩 불러와 애플리케이션에서 더하지 않고, `GROUP BY` 쿼리 한 번으로 끝냅니다.
//!
//! ```sql
//! shopping_carts ──→ recipe_ingredients ──→ ingredients
//!   (user_id)           (amount)              (name, unit)
//! ```

use crate::error::AppError;
use crate::models::ShoppingListItem;
use sqlx::SqlitePool;

/// 사용자의 장바구니 재료 합계를 이름순(같으면 단위순)으로 돌려줍니다.
/// 장바구니가 비어 있으면 빈 Vec.
pub async fn shopping_list(pool: &SqlitePool, user_id: &str) -> Result<Vec<ShoppingListItem>, AppError> {
    let items = sqlx::query_as::<_, ShoppingListItem>(
        r#"
        SELECT i.name AS name,
               i.measurement_unit AS measurement_unit,
               SUM(ri.amount) AS amount
        FROM shopping_carts sc
        JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE sc.user_id = ?
        GROUP BY i.name, i.measurement_unit
        ORDER BY i.name, i.measurement_unit
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}
