//! # 사용자 서비스
//!
//! 가입 검증, 비밀번호 해싱(Argon2id), 요청자 기준 사용자/구독 응답 조립을 담당합니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;

use crate::db;
use crate::error::{AppError, FieldErrors};
use crate::middleware::auth::Viewer;
use crate::models::*;

pub const MAX_NAME_LENGTH: usize = 150;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// `/users/me` 경로와 겹치므로 사용자 이름으로 쓸 수 없습니다.
pub const RESERVED_USERNAME: &str = "me";

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is a valid regex"));

/// 가입 요청의 필드를 검사합니다. 실패한 필드를 모두 모아 돌려줍니다.
pub fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();

    let email = req.email.trim();
    if email.is_empty() {
        errors.push("email", "This field is required");
    } else if !email.contains('@') || email.chars().count() > MAX_EMAIL_LENGTH {
        errors.push("email", "Enter a valid email address");
    }

    let username = req.username.trim();
    if username.is_empty() {
        errors.push("username", "This field is required");
    } else if username.chars().count() > MAX_NAME_LENGTH {
        errors.push(
            "username",
            format!("Username must be at most {} characters", MAX_NAME_LENGTH),
        );
    } else if !USERNAME_PATTERN.is_match(username) {
        errors.push(
            "username",
            "Username may contain only letters, digits and @/./+/-/_",
        );
    } else if username == RESERVED_USERNAME {
        errors.push("username", "This username is reserved");
    }

    for (field, value) in [("first_name", &req.first_name), ("last_name", &req.last_name)] {
        if value.trim().is_empty() {
            errors.push(field, "This field is required");
        } else if value.chars().count() > MAX_NAME_LENGTH {
            errors.push(field, format!("Must be at most {} characters", MAX_NAME_LENGTH));
        }
    }

    if req.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        );
    }

    errors.into_result()
}

/// 새 사용자를 가입시킵니다.
///
/// 중복 확인을 먼저 해서 친절한 메시지를 주고,
/// 동시 가입 경쟁은 `create_user`에서 UNIQUE 제약 위반 → `Conflict`로 처리됩니다.
pub async fn register(pool: &SqlitePool, req: &RegisterRequest) -> Result<User, AppError> {
    validate_registration(req)?;

    let email = req.email.trim();
    let username = req.username.trim();

    if db::users::find_by_email(pool, email).await?.is_some() {
        return Err(AppError::Conflict("A user with this email already exists".to_string()));
    }
    if db::users::find_by_username(pool, username).await?.is_some() {
        return Err(AppError::Conflict("A user with this username already exists".to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    let user = db::users::create_user(
        pool,
        &db::users::NewUser {
            email,
            username,
            first_name: req.first_name.trim(),
            last_name: req.last_name.trim(),
            password_hash: &password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// 현재 비밀번호를 확인한 뒤 새 비밀번호로 바꿉니다.
pub async fn set_password(
    pool: &SqlitePool,
    user: &User,
    req: &SetPasswordRequest,
) -> Result<(), AppError> {
    if !verify_password(&req.current_password, &user.password_hash)? {
        return Err(AppError::field("current_password", "Current password is incorrect"));
    }
    if req.new_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::field(
            "new_password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }

    let password_hash = hash_password(&req.new_password)?;
    db::users::update_password(pool, &user.id, &password_hash).await
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// 요청자가 이 사용자를 구독 중인지(`is_subscribed`)를 채운 응답
pub async fn build_response(
    pool: &SqlitePool,
    user: User,
    viewer: &Viewer,
) -> Result<UserResponse, AppError> {
    let is_subscribed = match viewer.user_id() {
        Some(viewer_id) => db::follows::is_following(pool, viewer_id, &user.id).await?,
        None => false,
    };

    Ok(UserResponse::new(user, is_subscribed))
}

/// 구독 목록의 작성자 한 명: 레시피 미리보기는 `limit`개까지, 개수는 전체
pub async fn build_subscription(
    pool: &SqlitePool,
    author: User,
    viewer: &Viewer,
    limit: Option<i64>,
) -> Result<SubscriptionResponse, AppError> {
    let recipes = db::recipes::list_author_recipes(pool, &author.id, limit)
        .await?
        .into_iter()
        .map(RecipeMinimal::from)
        .collect();
    let recipes_count = db::recipes::count_author_recipes(pool, &author.id).await?;

    Ok(SubscriptionResponse {
        author: build_response(pool, author, viewer).await?,
        recipes,
        recipes_count,
    })
}
