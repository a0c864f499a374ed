//! # 미들웨어 / 요청 추출자 모듈
//!
//! - `auth`: `Authorization: Bearer <JWT>` 헤더에서 요청자(`Viewer`)를 꺼냅니다.
//! - `json`: 요청 본문 추출자. 파싱 실패도 400 에러 본문으로 응답합니다.

pub mod auth;
pub mod json;
