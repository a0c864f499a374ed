//! # 레시피 검증과 응답 조립
//!
//! 핸들러는 이 모듈을 통해서만 레시피를 쓰고 읽습니다.
//!
//! ## 검증 순서
//! 실패한 규칙은 전부 `FieldErrors`에 모으고, 가장 먼저 실패한 규칙의 메시지가
//! 대표 메시지가 됩니다.
//! 1. 재료가 하나 이상
//! 2. 태그가 하나 이상
//! 3. 태그 중복 없음
//! 4. 재료 중복 없음
//! 5. 재료 양이 [최솟값, 32767]
//! 6. 조리 시간이 [최솟값, 32767]
//! 7. 생성 시 필수 필드(name, text, image, cooking_time), name 200자 이하
//! 8. (1~7 통과 시) 참조한 재료/태그 ID가 실제로 존재
//!
//! 어느 하나라도 실패하면 DB에는 아무것도 쓰지 않습니다.

use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::db;
use crate::error::{AppError, FieldErrors};
use crate::middleware::auth::Viewer;
use crate::models::*;
use crate::services::users;

/// 재료 양과 조리 시간의 상한 (SQLite SMALLINT 범위에 맞춘 값)
pub const MAX_VALUE: i64 = 32767;

pub const MAX_NAME_LENGTH: usize = 200;

/// 요청 본문을 규칙 1~7로 검증해 `RecipeDraft`로 만듭니다. DB는 건드리지 않습니다.
///
/// - `existing`: 수정(PATCH)일 때 기존 레시피. 빠진 스칼라 필드는 이 값으로 채웁니다.
/// - `None`이면 생성이므로 스칼라 필드가 모두 필요합니다.
pub fn validate_payload(
    payload: RecipePayload,
    existing: Option<&Recipe>,
    min_value: i64,
) -> Result<RecipeDraft, AppError> {
    let mut errors = FieldErrors::new();
    let ingredients = payload.ingredients.unwrap_or_default();
    let tags = payload.tags.unwrap_or_default();

    if ingredients.is_empty() {
        errors.push("ingredients", "At least one ingredient is required");
    }
    if tags.is_empty() {
        errors.push("tags", "At least one tag is required");
    }
    if has_duplicates(tags.iter()) {
        errors.push("tags", "Tags must not repeat");
    }
    if has_duplicates(ingredients.iter().map(|i| &i.id)) {
        errors.push("ingredients", "Ingredients must not repeat");
    }
    if ingredients
        .iter()
        .any(|i| !(min_value..=MAX_VALUE).contains(&i.amount))
    {
        errors.push(
            "ingredients",
            format!("Amount must be between {} and {}", min_value, MAX_VALUE),
        );
    }
    if let Some(cooking_time) = payload.cooking_time {
        if !(min_value..=MAX_VALUE).contains(&cooking_time) {
            errors.push(
                "cooking_time",
                format!("Cooking time must be between {} and {}", min_value, MAX_VALUE),
            );
        }
    }

    let name = required_text(&mut errors, "name", payload.name, existing.map(|r| &r.name));
    let text = required_text(&mut errors, "text", payload.text, existing.map(|r| &r.text));
    let image = required_text(&mut errors, "image", payload.image, existing.map(|r| &r.image));
    let cooking_time = payload.cooking_time.or(existing.map(|r| r.cooking_time));
    if cooking_time.is_none() {
        errors.push("cooking_time", "This field is required");
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        errors.push(
            "name",
            format!("Name must be at most {} characters", MAX_NAME_LENGTH),
        );
    }

    errors.into_result()?;
    let Some(cooking_time) = cooking_time else {
        return Err(AppError::field("cooking_time", "This field is required"));
    };

    Ok(RecipeDraft {
        name,
        image,
        text,
        cooking_time,
        ingredients: ingredients.into_iter().map(|i| (i.id, i.amount)).collect(),
        tags,
    })
}

/// 규칙 8: draft가 참조하는 재료/태그가 모두 존재하는지 확인합니다.
pub async fn check_references(pool: &SqlitePool, draft: &RecipeDraft) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();

    let ingredient_ids: Vec<String> = draft.ingredients.iter().map(|(id, _)| id.clone()).collect();
    let known: HashSet<String> = db::ingredients::existing_ingredient_ids(pool, &ingredient_ids)
        .await?
        .into_iter()
        .collect();
    for id in ingredient_ids.iter().filter(|id| !known.contains(*id)) {
        errors.push("ingredients", format!("Ingredient {} does not exist", id));
    }

    let known: HashSet<String> = db::tags::existing_tag_ids(pool, &draft.tags)
        .await?
        .into_iter()
        .collect();
    for id in draft.tags.iter().filter(|id| !known.contains(*id)) {
        errors.push("tags", format!("Tag {} does not exist", id));
    }

    errors.into_result()
}

/// 레시피 생성: 검증 → 참조 확인 → 트랜잭션 쓰기 → 조회 응답
pub async fn create(
    pool: &SqlitePool,
    author_id: &str,
    payload: RecipePayload,
    min_value: i64,
    short_code_length: usize,
    viewer: &Viewer,
) -> Result<RecipeResponse, AppError> {
    let draft = validate_payload(payload, None, min_value)?;
    check_references(pool, &draft).await?;

    let recipe = db::recipes::create_recipe(pool, author_id, &draft, short_code_length).await?;
    tracing::info!(
        recipe_id = %recipe.id,
        author_id,
        short_code = %recipe.short_code,
        "recipe created"
    );

    build_response(pool, recipe, viewer).await
}

/// 레시피 수정: 재료/태그는 통째로 교체됩니다.
pub async fn update(
    pool: &SqlitePool,
    existing: &Recipe,
    payload: RecipePayload,
    min_value: i64,
    viewer: &Viewer,
) -> Result<RecipeResponse, AppError> {
    let draft = validate_payload(payload, Some(existing), min_value)?;
    check_references(pool, &draft).await?;

    let recipe = db::recipes::update_recipe(pool, &existing.id, &draft)
        .await?
        .ok_or(AppError::NotFound("Recipe"))?;

    build_response(pool, recipe, viewer).await
}

/// 요청자 기준 플래그를 채운 조회 응답을 만듭니다. 익명이면 플래그는 모두 `false`.
pub async fn build_response(
    pool: &SqlitePool,
    recipe: Recipe,
    viewer: &Viewer,
) -> Result<RecipeResponse, AppError> {
    let tags = db::tags::get_recipe_tags(pool, &recipe.id).await?;
    let ingredients = db::ingredients::get_recipe_ingredients(pool, &recipe.id).await?;
    let author = db::users::find_by_id(pool, &recipe.author_id)
        .await?
        .ok_or(AppError::Internal(format!(
            "Author {} of recipe {} is missing",
            recipe.author_id, recipe.id
        )))?;
    let author = users::build_response(pool, author, viewer).await?;

    let (is_favorited, is_in_shopping_cart) = match viewer.user_id() {
        Some(user_id) => (
            db::memberships::contains(pool, MembershipKind::Favorite, user_id, &recipe.id).await?,
            db::memberships::contains(pool, MembershipKind::ShoppingCart, user_id, &recipe.id)
                .await?,
        ),
        None => (false, false),
    };

    Ok(RecipeResponse {
        id: recipe.id,
        tags,
        author,
        ingredients,
        name: recipe.name,
        image: recipe.image,
        text: recipe.text,
        cooking_time: recipe.cooking_time,
        is_favorited,
        is_in_shopping_cart,
    })
}

/// 쿼리 문자열을 DB 필터로 바꿉니다.
///
/// `is_favorited`, `is_in_shopping_cart`는 로그인한 요청자에게만 의미가 있어서
/// 익명 요청에서는 무시됩니다.
pub fn filter_from_query(query: RecipeQuery, viewer: &Viewer) -> RecipeFilter {
    let viewer_if = |flag: Option<&str>| {
        flag.filter(|raw| is_enabled(raw))
            .and(viewer.user_id())
            .map(str::to_string)
    };

    RecipeFilter {
        favorited_by: viewer_if(query.is_favorited.as_deref()),
        in_cart_of: viewer_if(query.is_in_shopping_cart.as_deref()),
        tag_slugs: query.tags,
        author_id: query.author.filter(|a| !a.is_empty()),
    }
}

fn is_enabled(raw: &str) -> bool {
    matches!(raw, "1" | "true" | "True")
}

fn has_duplicates<'a>(values: impl Iterator<Item = &'a String>) -> bool {
    let mut seen = HashSet::new();
    values.into_iter().any(|value| !seen.insert(value))
}

/// 주어진 값 → 기존 값 순으로 채우고, 둘 다 없거나 비어 있으면 필수 에러를 쌓습니다.
fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    given: Option<String>,
    existing: Option<&String>,
) -> String {
    match given.or_else(|| existing.cloned()) {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            errors.push(field, "This field is required");
            String::new()
        }
    }
}
