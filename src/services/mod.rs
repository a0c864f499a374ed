//! # 비즈니스 로직 모듈
//!
//! 라우트 핸들러와 DB 계층 사이에서 검증과 응답 조립을 담당합니다.
//! - `catalog`: 태그/재료 카탈로그 JSON 적재
//! - `recipes`: 레시피 검증 규칙, 참조 확인, 요청자 기준 응답
//! - `shopping_list`: 장바구니 목록 텍스트 파일
//! - `short_link`: 짧은 링크 코드 생성과 주소
//! - `users`: 가입 검증, 비밀번호 해싱, 사용자/구독 응답

pub mod catalog;
pub mod recipes;
pub mod shopping_list;
pub mod short_link;
pub mod users;
