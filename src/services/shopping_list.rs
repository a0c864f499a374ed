//! # 장바구니 목록 파일 만들기
//!
//! 집계 결과(`ShoppingListItem`)를 내려받을 텍스트 파일로 바꿉니다.
//!
//! ```text
//! Список покупок
//!
//! Молоко (мл) - 500
//! Соль (г) - 8
//! ```

use crate::models::ShoppingListItem;

pub const HEADER: &str = "Список покупок";

/// 헤더, 빈 줄, 그리고 `이름 (단위) - 합계` 줄들. 목록이 비어 있으면 헤더와 빈 줄만.
pub fn render(items: &[ShoppingListItem]) -> String {
    let lines: Vec<String> = items
        .iter()
        .map(|item| format!("{} ({}) - {}", item.name, item.measurement_unit, item.amount))
        .collect();

    format!("{}\n\n{}", HEADER, lines.join("\n"))
}

/// `<username>_список_покупок.txt`
pub fn filename(username: &str) -> String {
    format!("{}_список_покупок.txt", username)
}

/// `Content-Disposition` 헤더 값
///
/// 비ASCII 파일 이름은 RFC 5987 `filename*`로 싣고,
/// 이를 모르는 클라이언트를 위해 ASCII 대체 이름도 함께 보냅니다.
pub fn content_disposition(username: &str) -> String {
    let fallback: String = username
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+' | '@'))
        .collect();

    format!(
        "attachment; filename=\"{}_shopping_list.txt\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(&filename(username))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, unit: &str, amount: i64) -> ShoppingListItem {
        ShoppingListItem {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    #[test]
    fn renders_one_line_per_item() {
        let text = render(&[item("Milk", "ml", 500), item("Salt", "g", 8)]);
        assert_eq!(text, "Список покупок\n\nMilk (ml) - 500\nSalt (g) - 8");
    }

    #[test]
    fn empty_cart_renders_header_only() {
        assert_eq!(render(&[]), "Список покупок\n\n");
    }

    #[test]
    fn disposition_carries_encoded_and_fallback_names() {
        let value = content_disposition("ivan");
        assert!(value.starts_with("attachment; filename=\"ivan_shopping_list.txt\""));
        assert!(value.contains(&format!(
            "filename*=UTF-8''{}",
            urlencoding::encode("ivan_список_покупок.txt")
        )));
        assert!(value.is_ascii());
    }
}
