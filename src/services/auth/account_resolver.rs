//! 소셜 프로필의 계정 귀속 판정과 가입 처리
//!
//! 제공자에게서 받은 프로필 하나를 로컬 계정으로 귀속시키는 3단계 판정입니다.
//!
//! ```text
//! 1. (provider, provider_user_id) 연동 레코드가 있으면        → 로그인
//! 2. 같은 이메일의 기존 사용자가 있으면 연동 레코드 생성 후   → 로그인 (계정 연동)
//! 3. 둘 다 없으면 아무것도 저장하지 않고                     → 가입 확인 필요
//! ```
//!
//! 호출 한 번에 일어나는 저장소 변경은 최대 한 건의 연동 생성
//! (+ 로그인 유형 갱신)뿐입니다. 3단계에서는 어떤 레코드도 만들지 않고
//! 프로필을 그대로 가입 확인 단계로 넘깁니다.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::{PasswordConfig, SocialProvider, UserRole};
use crate::core::ServiceLocator;
use crate::domain::entities::User;
use crate::domain::models::social::SocialProfile;
use crate::errors::errors::AppError;
use crate::repositories::{NewSocialLink, NewUser, UserDirectory};

/// 접미사 탐색 상한. 이 횟수를 넘기면 설정/데이터 이상으로 본다.
const MAX_USERNAME_ATTEMPTS: u32 = 1000;

/// 귀속 판정 결과
///
/// null 반환 대신 태그된 결과를 써서 호출부가 미귀속 케이스를
/// 놓칠 수 없게 합니다.
#[derive(Debug)]
pub enum SocialResolution {
    /// 기존 계정으로 로그인
    Login(User),
    /// 신규 프로필 - 가입 확인 단계로 이관 (저장된 것 없음)
    NeedsRegistration(SocialProfile),
}

/// 계정 귀속 판정기
pub struct AccountResolver {
    directory: Arc<dyn UserDirectory>,
}

impl AccountResolver {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// 전역 컨테이너에서 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 프로필을 로컬 계정으로 귀속 판정합니다.
    pub async fn resolve(&self, profile: &SocialProfile) -> Result<SocialResolution, AppError> {
        // 1. 연동 레코드 우선
        if let Some(link) = self
            .directory
            .find_link(profile.provider, &profile.provider_user_id)
            .await?
        {
            let user = self
                .directory
                .find_user_by_id(link.user_id)
                .await?
                .ok_or(AppError::UserNotFound)?;
            return Ok(SocialResolution::Login(user));
        }

        // 2. 이메일 일치 → 기존 계정에 연동
        if let Some(mut user) = self.directory.find_user_by_email(&profile.email).await? {
            self.directory
                .set_login_type(user.id, profile.provider.login_type())
                .await?;
            user.login_type = profile.provider.login_type();

            match self
                .directory
                .create_link(NewSocialLink {
                    user_id: user.id,
                    provider: profile.provider,
                    provider_user_id: profile.provider_user_id.clone(),
                    email: profile.email.clone(),
                })
                .await
            {
                Ok(_) => {}
                // 동시 요청이 먼저 연동을 만든 경우: 이미 원하는 상태다
                Err(AppError::DuplicateProviderLink) => {}
                Err(e) => return Err(e),
            }

            log::info!("{} 계정 연동: user_id={}", profile.provider, user.id);
            return Ok(SocialResolution::Login(user));
        }

        // 3. 신규 - 저장 없이 가입 확인으로
        Ok(SocialResolution::NeedsRegistration(profile.clone()))
    }

    /// 가입 확인을 마친 소셜 사용자를 생성하고 연동까지 만듭니다.
    ///
    /// 최종 사용자명은 `desired_username` → `nickname` → 이메일 로컬 파트
    /// 순으로 정하고, 충돌하면 숫자 접미사를 붙여가며
    /// (`alice`, `alice1`, `alice2`, ...) 빈 이름을 찾습니다.
    /// 사전 조회는 힌트일 뿐이며, insert가 유니크 제약에 걸리면
    /// 그 신호를 믿고 다음 접미사로 재시도합니다.
    ///
    /// # Errors
    ///
    /// * `DuplicateEmail` - 해당 이메일의 사용자가 이미 존재
    /// * `DuplicateProviderLink` - 해당 제공자 계정이 이미 연동됨
    pub async fn register(
        &self,
        provider: SocialProvider,
        email: &str,
        nickname: Option<&str>,
        provider_user_id: &str,
        desired_username: Option<&str>,
    ) -> Result<User, AppError> {
        if self.directory.find_user_by_email(email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let base = Self::base_username(email, nickname, desired_username);
        let password_hash = Self::random_password_hash()?;

        let mut candidate = base.clone();
        let mut counter: u32 = 1;

        loop {
            if counter > MAX_USERNAME_ATTEMPTS {
                return Err(AppError::InternalError(format!(
                    "사용자명 생성 실패: {}",
                    base
                )));
            }

            if self
                .directory
                .find_user_by_username(&candidate)
                .await?
                .is_some()
            {
                candidate = format!("{}{}", base, counter);
                counter += 1;
                continue;
            }

            match self
                .directory
                .create_user(NewUser {
                    username: candidate.clone(),
                    email: email.to_string(),
                    password_hash: password_hash.clone(),
                    login_type: provider.login_type(),
                    role: UserRole::User,
                })
                .await
            {
                Ok(user) => {
                    self.directory
                        .create_link(NewSocialLink {
                            user_id: user.id,
                            provider,
                            provider_user_id: provider_user_id.to_string(),
                            email: email.to_string(),
                        })
                        .await?;

                    log::info!(
                        "{} 소셜 가입 완료: user_id={}, username={}",
                        provider,
                        user.id,
                        user.username
                    );
                    return Ok(user);
                }
                // 사전 조회와 insert 사이에 같은 이름이 생겼다. 제약이 판정한다.
                Err(AppError::UsernameCollision) => {
                    candidate = format!("{}{}", base, counter);
                    counter += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// 사용자명 후보의 기준값을 정합니다.
    fn base_username(email: &str, nickname: Option<&str>, desired: Option<&str>) -> String {
        if let Some(name) = desired.map(str::trim).filter(|name| !name.is_empty()) {
            return name.to_string();
        }
        if let Some(name) = nickname.map(str::trim).filter(|name| !name.is_empty()) {
            return name.to_string();
        }
        email.split('@').next().unwrap_or(email).to_string()
    }

    /// 소셜 사용자용 무작위 비밀번호 해시를 생성합니다.
    ///
    /// 소셜 사용자에게 비밀번호 로그인 경로는 없으며, 이 값은
    /// 스키마상 비밀번호 컬럼을 채우기 위한 일회성 난수입니다.
    fn random_password_hash() -> Result<String, AppError> {
        bcrypt::hash(Uuid::new_v4().to_string(), PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해시 생성 실패: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoginType;
    use crate::repositories::memory::MemoryDirectory;

    fn kakao_profile(provider_user_id: &str, email: &str) -> SocialProfile {
        SocialProfile {
            provider: SocialProvider::Kakao,
            provider_user_id: provider_user_id.to_string(),
            email: email.to_string(),
            nickname: Some("앨리스".to_string()),
        }
    }

    #[actix_web::test]
    async fn test_resolve_links_existing_user_by_email() {
        let directory = Arc::new(MemoryDirectory::new());
        let existing = directory.seed_user("alice", "a@x.com", LoginType::Email);
        let resolver = AccountResolver::new(directory.clone());

        let profile = kakao_profile("K1", "a@x.com");

        match resolver.resolve(&profile).await.unwrap() {
            SocialResolution::Login(user) => {
                assert_eq!(user.id, existing.id);
                assert_eq!(user.login_type, LoginType::Kakao);
            }
            other => panic!("expected Login, got {:?}", other),
        }

        assert_eq!(directory.link_count(), 1);

        // 저장소에도 로그인 유형이 반영되어야 한다
        let stored = directory.find_user_by_id(existing.id).await.unwrap().unwrap();
        assert_eq!(stored.login_type, LoginType::Kakao);
    }

    #[actix_web::test]
    async fn test_resolve_is_idempotent_for_linked_account() {
        let directory = Arc::new(MemoryDirectory::new());
        let existing = directory.seed_user("alice", "a@x.com", LoginType::Email);
        let resolver = AccountResolver::new(directory.clone());

        let profile = kakao_profile("K1", "a@x.com");

        resolver.resolve(&profile).await.unwrap();
        match resolver.resolve(&profile).await.unwrap() {
            SocialResolution::Login(user) => assert_eq!(user.id, existing.id),
            other => panic!("expected Login, got {:?}", other),
        }

        // 두 번째 호출이 연동 레코드를 중복 생성하면 안 된다
        assert_eq!(directory.link_count(), 1);
    }

    #[actix_web::test]
    async fn test_resolve_defers_unknown_identity_without_persisting() {
        let directory = Arc::new(MemoryDirectory::new());
        let resolver = AccountResolver::new(directory.clone());

        let profile = kakao_profile("K9", "new@x.com");

        match resolver.resolve(&profile).await.unwrap() {
            SocialResolution::NeedsRegistration(deferred) => {
                assert_eq!(deferred.provider_user_id, "K9");
                assert_eq!(deferred.email, "new@x.com");
            }
            other => panic!("expected NeedsRegistration, got {:?}", other),
        }

        assert_eq!(directory.user_count(), 0);
        assert_eq!(directory.link_count(), 0);
    }

    #[actix_web::test]
    async fn test_register_creates_user_and_link() {
        let directory = Arc::new(MemoryDirectory::new());
        let resolver = AccountResolver::new(directory.clone());

        let user = resolver
            .register(SocialProvider::Naver, "bob@x.com", Some("밥"), "N1", None)
            .await
            .unwrap();

        assert_eq!(user.username, "밥");
        assert_eq!(user.login_type, LoginType::Naver);
        assert_eq!(directory.user_count(), 1);
        assert_eq!(directory.link_count(), 1);

        // 이후 같은 프로필은 로그인으로 귀속된다
        let profile = SocialProfile {
            provider: SocialProvider::Naver,
            provider_user_id: "N1".to_string(),
            email: "bob@x.com".to_string(),
            nickname: None,
        };
        assert!(matches!(
            resolver.resolve(&profile).await.unwrap(),
            SocialResolution::Login(_)
        ));
    }

    #[actix_web::test]
    async fn test_register_suffixes_colliding_usernames() {
        let directory = Arc::new(MemoryDirectory::new());
        let resolver = AccountResolver::new(directory.clone());

        let first = resolver
            .register(SocialProvider::Kakao, "a1@x.com", Some("alice"), "K1", None)
            .await
            .unwrap();
        let second = resolver
            .register(SocialProvider::Kakao, "a2@x.com", Some("alice"), "K2", None)
            .await
            .unwrap();

        assert_eq!(first.username, "alice");
        assert_eq!(second.username, "alice1");
        assert_eq!(directory.user_count(), 2);
    }

    #[actix_web::test]
    async fn test_register_prefers_desired_username() {
        let directory = Arc::new(MemoryDirectory::new());
        let resolver = AccountResolver::new(directory.clone());

        let user = resolver
            .register(
                SocialProvider::Kakao,
                "c@x.com",
                Some("nickname"),
                "K3",
                Some("chosen"),
            )
            .await
            .unwrap();

        assert_eq!(user.username, "chosen");
    }

    #[actix_web::test]
    async fn test_register_falls_back_to_email_local_part() {
        let directory = Arc::new(MemoryDirectory::new());
        let resolver = AccountResolver::new(directory.clone());

        let user = resolver
            .register(SocialProvider::Kakao, "dave@x.com", None, "K4", None)
            .await
            .unwrap();

        assert_eq!(user.username, "dave");
    }

    #[actix_web::test]
    async fn test_register_rejects_duplicate_email() {
        let directory = Arc::new(MemoryDirectory::new());
        directory.seed_user("alice", "a@x.com", LoginType::Email);
        let resolver = AccountResolver::new(directory.clone());

        let result = resolver
            .register(SocialProvider::Kakao, "a@x.com", Some("alice2"), "K5", None)
            .await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
        assert_eq!(directory.user_count(), 1);
    }
}
