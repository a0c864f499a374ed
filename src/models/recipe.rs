//! # 레시피 모델 정의
//!
//! 레시피 집합체(aggregate)를 이루는 구조체들입니다.
//!
//! ## 구조체 역할
//! - `Recipe`: `recipes` 테이블 한 행
//! - `RecipeIngredientAmount`: 레시피에 포함된 재료와 양 (조인 결과)
//! - `RecipeResponse`: 조회 응답 (태그, 작성자, 재료, 요청자 기준 플래그 포함)
//! - `RecipeMinimal`: 즐겨찾기/장바구니/구독 목록에 쓰는 축약 표현
//! - `RecipePayload`: 생성(POST)/수정(PATCH) 요청 본문
//! - `RecipeDraft`: 검증을 통과해 그대로 저장 가능한 상태

use serde::{Deserialize, Serialize};

use super::{Tag, UserResponse};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
    pub short_code: String,
    pub pub_date: String,
}

/// 레시피에 포함된 재료 한 줄. `id`는 재료(ingredient)의 ID입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecipeIngredientAmount {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// 레시피 조회 응답
///
/// `is_favorited`, `is_in_shopping_cart`, `author.is_subscribed`는
/// 익명 요청자에게 항상 `false`로 채워집니다 (생략되지 않습니다).
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: String,
    pub tags: Vec<Tag>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientAmount>,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeMinimal {
    pub id: String,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

impl From<Recipe> for RecipeMinimal {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// 요청 본문의 재료 항목: `{ "id": "<ingredient id>", "amount": 5 }`
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientAmountInput {
    pub id: String,
    pub amount: i64,
}

/// 레시피 생성/수정 요청 본문
///
/// 모든 필드가 Option인 이유: 누락된 필드를 첫 번째 하나에서 멈추는 serde 에러가 아니라
/// 필드 단위 검증 에러로 한꺼번에 보고하기 위해서입니다.
/// 수정(PATCH) 시 스칼라 필드는 생략하면 기존 값을 유지하지만,
/// `ingredients`와 `tags`는 항상 전체 목록을 보내야 합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipePayload {
    pub ingredients: Option<Vec<IngredientAmountInput>>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
}

/// 검증을 통과한 레시피: 이 값만 저장 계층으로 넘어갑니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
    /// (ingredient id, amount): 중복 없음
    pub ingredients: Vec<(String, i64)>,
    /// tag id: 중복 없음
    pub tags: Vec<String>,
}

/// `GET /api/recipes` 필터
///
/// `tags`는 반복 가능한 쿼리 키입니다: `?tags=breakfast&tags=lunch`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeQuery {
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

/// DB 계층으로 넘기는 정규화된 필터
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub tag_slugs: Vec<String>,
    pub author_id: Option<String>,
    /// 이 사용자의 즐겨찾기에 있는 레시피만
    pub favorited_by: Option<String>,
    /// 이 사용자의 장바구니에 있는 레시피만
    pub in_cart_of: Option<String>,
}

/// `GET /api/recipes/{id}/get-link` 응답
#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}
