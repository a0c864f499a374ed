//! # 태그 모델 정의
//!
//! 태그는 레시피를 분류하는 고정 참조 데이터입니다 (예: 아침, 점심, 저녁).
//! API로는 조회만 가능하고, 생성은 `load-catalog` 도구가 담당합니다.

use serde::{Deserialize, Serialize};

/// 태그 엔티티: DB의 `tags` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// `#RRGGBB` 형식의 색상. 태그끼리 겹치지 않습니다.
    pub color: Option<String>,
    /// URL 필터(`?tags=breakfast`)에 쓰이는 고유 slug
    pub slug: String,
}

/// 카탈로그 파일의 태그 항목
#[derive(Debug, Clone, Deserialize)]
pub struct NewTag {
    pub name: String,
    pub color: Option<String>,
    /// 없으면 이름으로부터 `slug::slugify`로 만듭니다.
    pub slug: Option<String>,
}
