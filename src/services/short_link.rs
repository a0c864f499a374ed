//! # 짧은 링크 코드
//!
//! 레시피마다 영숫자 코드를 하나 발급하고 `/s/{code}`로 레시피 페이지에 연결합니다.
//! 코드의 유일성은 `short_codes` 테이블이 보장하고, 여기서는 후보 코드만 만듭니다.

use rand::Rng;

/// 코드에 쓰는 문자 집합 (대소문자 구분)
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// `length` 글자의 무작위 코드를 만듭니다.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// 외부에 공개할 짧은 링크 주소: `<public_url>/s/<code>`
pub fn short_link_url(public_url: &str, code: &str) -> String {
    format!("{}/s/{}", public_url.trim_end_matches('/'), code)
}

/// 코드가 가리키는 프론트엔드 레시피 페이지 경로
pub fn recipe_page_path(recipe_id: &str) -> String {
    format!("/recipes/{}", recipe_id)
}

/// 모르는 코드일 때 보내는 경로
pub const NOT_FOUND_PATH: &str = "/not_found";
