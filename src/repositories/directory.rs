//! 사용자/소셜 연동 저장소 계약
//!
//! 인증 코어가 의존하는 유일한 영속성 인터페이스입니다.
//! 구현체는 다음 유일성 불변식을 저장소 수준의 유니크 제약으로 강제해야 합니다.
//!
//! - `users.email`
//! - `users.username`
//! - `social_logins.(provider, provider_user_id)`
//!
//! 제약 위반은 사전 조회 결과보다 우선하는 권위 있는 중복 신호이며,
//! 구현체는 이를 `DuplicateEmail` / `UsernameCollision` /
//! `DuplicateProviderLink`로 구분해 돌려줘야 합니다. 동시 요청 경합의
//! 패자는 이 에러를 보고 재시도 여부를 결정합니다.

use async_trait::async_trait;

use crate::config::{LoginType, SocialProvider, UserRole};
use crate::domain::entities::{SocialLogin, User};
use crate::errors::errors::AppError;

/// 생성할 사용자 레코드
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub login_type: LoginType,
    pub role: UserRole,
}

/// 생성할 소셜 연동 레코드
#[derive(Debug, Clone)]
pub struct NewSocialLink {
    pub user_id: i64,
    pub provider: SocialProvider,
    pub provider_user_id: String,
    pub email: String,
}

/// 사용자/소셜 연동 저장소 계약
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// ID로 사용자 조회
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// 이메일로 사용자 조회
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 사용자명으로 사용자 조회
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// 새 사용자 생성
    ///
    /// # Errors
    ///
    /// * `DuplicateEmail` - 이메일 유니크 제약 위반
    /// * `UsernameCollision` - 사용자명 유니크 제약 위반
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError>;

    /// 사용자의 로그인 유형 갱신 (멱등)
    async fn set_login_type(&self, user_id: i64, login_type: LoginType) -> Result<(), AppError>;

    /// `(provider, provider_user_id)` 쌍으로 연동 레코드 조회
    async fn find_link(
        &self,
        provider: SocialProvider,
        provider_user_id: &str,
    ) -> Result<Option<SocialLogin>, AppError>;

    /// 사용자 ID로 연동 레코드 조회
    async fn find_link_by_user(&self, user_id: i64) -> Result<Option<SocialLogin>, AppError>;

    /// 새 연동 레코드 생성
    ///
    /// # Errors
    ///
    /// * `DuplicateProviderLink` - `(provider, provider_user_id)` 유니크 제약 위반
    async fn create_link(&self, new_link: NewSocialLink) -> Result<SocialLogin, AppError>;
}
