//! # 권한 테이블
//!
//! 요청마다 메서드/액션을 보고 권한과 응답 형태를 동적으로 고르는 대신,
//! `(Action) → Rule { access, representation }`을 한 표에 모아 두고
//! 핸들러 진입 시 `authorize()`를 한 번 호출합니다.
//!
//! | 액션 | 접근 | 응답 형태 |
//! |------|------|-----------|
//! | 레시피 목록/상세, 태그, 재료, 사용자 목록/상세, 짧은 링크 | 누구나 | 각 조회 형태 |
//! | 레시피 생성 | 로그인 | 레시피 전체 |
//! | 레시피 수정/삭제 | 작성자 | 레시피 전체 / 없음 |
//! | 즐겨찾기·장바구니 추가 | 로그인 | 레시피 축약 |
//! | 구독 추가 / 구독 목록 | 로그인 | 구독 |

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::middleware::auth::Viewer;
use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListRecipes,
    RetrieveRecipe,
    CreateRecipe,
    UpdateRecipe,
    DeleteRecipe,
    GetShortLink,
    ResolveShortLink,
    AddMembership,
    RemoveMembership,
    DownloadShoppingList,
    ListTags,
    ListIngredients,
    RegisterUser,
    ListUsers,
    RetrieveUser,
    Me,
    SetPassword,
    Subscribe,
    Unsubscribe,
    ListSubscriptions,
}

/// 누가 이 액션을 수행할 수 있는가
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anyone,
    Authenticated,
    /// 로그인했고, 대상 리소스의 작성자여야 함
    Author,
}

/// 성공 시 돌려주는 표현
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    RecipeFull,
    RecipeMinimal,
    ShortLink,
    Redirect,
    ShoppingListFile,
    Tag,
    Ingredient,
    User,
    Subscription,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub access: Access,
    pub representation: Representation,
}

const fn rule(access: Access, representation: Representation) -> Rule {
    Rule {
        access,
        representation,
    }
}

/// 권한 테이블
pub const fn rule_for(action: Action) -> Rule {
    use Access::*;
    use Representation::*;

    match action {
        Action::ListRecipes | Action::RetrieveRecipe => rule(Anyone, RecipeFull),
        Action::CreateRecipe => rule(Authenticated, RecipeFull),
        Action::UpdateRecipe => rule(Author, RecipeFull),
        Action::DeleteRecipe => rule(Author, Empty),
        Action::GetShortLink => rule(Anyone, ShortLink),
        Action::ResolveShortLink => rule(Anyone, Redirect),
        Action::AddMembership => rule(Authenticated, RecipeMinimal),
        Action::RemoveMembership => rule(Authenticated, Empty),
        Action::DownloadShoppingList => rule(Authenticated, ShoppingListFile),
        Action::ListTags => rule(Anyone, Tag),
        Action::ListIngredients => rule(Anyone, Ingredient),
        Action::RegisterUser | Action::ListUsers | Action::RetrieveUser => rule(Anyone, User),
        Action::Me => rule(Authenticated, User),
        Action::SetPassword => rule(Authenticated, Empty),
        Action::Subscribe | Action::ListSubscriptions => rule(Authenticated, Subscription),
        Action::Unsubscribe => rule(Authenticated, Empty),
    }
}

/// 액션을 수행할 수 있는지 확인하고, 로그인이 필요한 액션이면 요청자 ID를 돌려줍니다.
///
/// - `owner`: `Access::Author` 규칙에서 비교할 리소스 작성자 ID
/// - 로그인 필요 + 익명 → 401, 작성자 아님 → 403
pub fn authorize<'a>(
    action: Action,
    viewer: &'a Viewer,
    owner: Option<&str>,
) -> Result<Option<&'a str>, AppError> {
    match rule_for(action).access {
        Access::Anyone => Ok(viewer.user_id()),
        Access::Authenticated => require_user(viewer).map(Some),
        Access::Author => {
            let user_id = require_user(viewer)?;
            if owner == Some(user_id) {
                Ok(Some(user_id))
            } else {
                Err(AppError::Forbidden(
                    "Only the author can change this recipe".to_string(),
                ))
            }
        }
    }
}

/// 로그인이 필요한 액션(`Access::Authenticated`)을 확인하고 요청자 ID를 돌려줍니다.
pub fn authorize_user<'a>(action: Action, viewer: &'a Viewer) -> Result<&'a str, AppError> {
    authorize(action, viewer, None)?;
    require_user(viewer)
}

/// `authorize_user`에 더해 요청자를 DB에서 찾아 돌려줍니다.
///
/// 서명과 만료는 유효하지만 그 사이 사용자가 사라진 토큰은 401입니다.
/// 요청자 행을 참조하는 쓰기(레시피, 즐겨찾기, 구독) 전에 부릅니다.
pub async fn authorize_current_user(
    pool: &SqlitePool,
    action: Action,
    viewer: &Viewer,
) -> Result<User, AppError> {
    let user_id = authorize_user(action, viewer)?;
    db::users::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
}

/// 로그인이 필요한 액션에서 요청자 ID를 꺼냅니다.
pub fn require_user(viewer: &Viewer) -> Result<&str, AppError> {
    viewer
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Authentication credentials were not provided".to_string()))
}
