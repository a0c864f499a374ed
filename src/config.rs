//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: 외부 인증 서비스와 공유하는 JWT 서명 비밀키 (필수)
//! - `HOST`, `PORT`: 서버 바인딩 주소
//! - `PUBLIC_URL`: 짧은 링크를 만들 때 쓰는 외부 공개 주소
//! - `MIN_VALUE`: 재료 양과 조리 시간의 최솟값
//! - `SHORT_CODE_LENGTH`: 짧은 링크 코드 길이
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉토리

use std::env;

/// 조리 시간과 재료 양의 기본 최솟값
pub const DEFAULT_MIN_VALUE: i64 = 1;

/// 짧은 링크 코드의 기본 길이
pub const DEFAULT_SHORT_CODE_LENGTH: usize = 6;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/foodgram.db")
    pub database_url: String,
    /// JWT 토큰 검증에 사용하는 비밀키
    pub jwt_secret: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// 외부에서 보이는 서비스 주소 (끝의 `/` 제외)
    pub public_url: String,
    /// 재료 양과 조리 시간이 가질 수 있는 최솟값 (기본값: 1)
    pub min_value: i64,
    /// 짧은 링크 코드 길이 (기본값: 6)
    pub short_code_length: usize,
    /// 프론트엔드 빌드 결과물 경로
    pub frontend_dist: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            // 0 이하의 최솟값은 의미가 없으므로 1로 끌어올립니다.
            min_value: parse_or("MIN_VALUE", DEFAULT_MIN_VALUE).max(1),
            short_code_length: parse_or("SHORT_CODE_LENGTH", DEFAULT_SHORT_CODE_LENGTH).max(4),
            frontend_dist: env::var("FRONTEND_DIST")
                .unwrap_or_else(|_| "../frontend/dist".to_string()),
        })
    }
}

/// 환경변수를 읽어 파싱하고, 없거나 파싱에 실패하면 기본값을 돌려줍니다.
///
/// 제네릭 `T: FromStr`: `.parse()`가 가능한 모든 타입(u16, i64, usize 등)에 쓸 수 있습니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
