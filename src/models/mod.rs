//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `ingredient`: 재료 카탈로그
//! - `membership`: 즐겨찾기/장바구니 관계 종류
//! - `recipe`: 레시피 집합체와 요청/응답 구조체
//! - `shopping_list`: 장바구니 집계 결과
//! - `subscription`: 구독(팔로우) 목록 응답
//! - `tag`: 태그 카탈로그
//! - `user`: 사용자
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Recipe`처럼 짧게 접근합니다.

pub mod ingredient;
pub mod membership;
pub mod recipe;
pub mod shopping_list;
pub mod subscription;
pub mod tag;
pub mod user;

pub use ingredient::*;
pub use membership::*;
pub use recipe::*;
pub use shopping_list::*;
pub use subscription::*;
pub use tag::*;
pub use user::*;
