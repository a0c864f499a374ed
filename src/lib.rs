//! # Foodgram 백엔드
//!
//! 레시피 공유 서비스의 API 서버 라이브러리입니다.
//! 실행 파일(`main.rs`, `bin/load_catalog.rs`)과 통합 테스트(`tests/`)가 이 크레이트를 씁니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod permissions;
pub mod routes;
pub mod services;
