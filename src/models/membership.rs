//! # 멤버십(즐겨찾기 / 장바구니) 모델
//!
//! 즐겨찾기와 장바구니는 모양이 똑같은 (user, recipe) 관계입니다.
//! 상속 대신 `MembershipKind` 하나로 어느 테이블을 건드릴지만 바꿉니다.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipKind {
    Favorite,
    ShoppingCart,
}

impl MembershipKind {
    /// 이 종류의 관계가 저장되는 테이블 이름.
    /// SQL 문자열에 직접 들어가므로 고정된 `&'static str`만 돌려줍니다.
    pub const fn table(self) -> &'static str {
        match self {
            MembershipKind::Favorite => "favorite_recipes",
            MembershipKind::ShoppingCart => "shopping_carts",
        }
    }

    pub const fn already_exists_message(self) -> &'static str {
        match self {
            MembershipKind::Favorite => "Recipe is already in favorites",
            MembershipKind::ShoppingCart => "Recipe is already in the shopping cart",
        }
    }

    pub const fn not_a_member_message(self) -> &'static str {
        match self {
            MembershipKind::Favorite => "Recipe is not in favorites",
            MembershipKind::ShoppingCart => "Recipe is not in the shopping cart",
        }
    }
}
