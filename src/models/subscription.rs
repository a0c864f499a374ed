use serde::{Deserialize, Serialize};

use super::{RecipeMinimal, UserResponse};

/// 구독한 작성자 한 명: 사용자 정보 + 레시피 미리보기 + 전체 레시피 수
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub author: UserResponse,
    pub recipes: Vec<RecipeMinimal>,
    /// `recipes_limit`과 무관한 전체 레시피 수
    pub recipes_count: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionQuery {
    pub recipes_limit: Option<String>,
}

impl SubscriptionQuery {
    /// 숫자로만 이루어진 값일 때만 제한으로 인정합니다. 그 외에는 제한 없음.
    pub fn limit(&self) -> Option<i64> {
        self.recipes_limit
            .as_deref()
            .filter(|raw| !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|raw| raw.parse().ok())
    }
}
