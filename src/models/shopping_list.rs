use serde::Serialize;

/// 장바구니 집계 결과 한 줄: (재료 이름, 단위)별 양의 합계
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}
