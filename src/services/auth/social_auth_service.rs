//! 소셜 로그인 플로우 오케스트레이션
//!
//! 콜백/가입 핸들러가 사용하는 상위 서비스입니다.
//! 인가 코드 교환 → 프로필 조회 → 계정 귀속 판정을 한 번의 호출로 묶고,
//! 가입 경로의 동시성 경합을 처리합니다.

use std::sync::Arc;

use crate::config::SocialProvider;
use crate::core::ServiceLocator;
use crate::domain::dto::SocialRegisterRequest;
use crate::domain::entities::User;
use crate::errors::errors::AppError;
use crate::repositories::UserDirectory;
use crate::services::auth::account_resolver::{AccountResolver, SocialResolution};
use crate::services::auth::social_api::SocialApiClient;

/// 소셜 인증 서비스
pub struct SocialAuthService {
    api: Arc<SocialApiClient>,
    resolver: Arc<AccountResolver>,
    directory: Arc<dyn UserDirectory>,
}

impl SocialAuthService {
    pub fn new(
        api: Arc<SocialApiClient>,
        resolver: Arc<AccountResolver>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            api,
            resolver,
            directory,
        }
    }

    /// 전역 컨테이너에서 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 인가 코드로 전체 인증 플로우를 수행합니다.
    ///
    /// 코드 교환과 프로필 조회는 제공자 네트워크 호출이며,
    /// 귀속 판정까지 끝나면 로그인 또는 가입 확인 필요로 갈립니다.
    pub async fn authenticate_with_code(
        &self,
        provider: SocialProvider,
        code: &str,
    ) -> Result<SocialResolution, AppError> {
        let access_token = self.api.exchange_code(provider, code).await?;
        let profile = self.api.fetch_profile(provider, &access_token).await?;
        self.resolver.resolve(&profile).await
    }

    /// 클라이언트가 직접 받아온 액세스 토큰으로 인증합니다. (비브라우저 경로)
    pub async fn authenticate_with_access_token(
        &self,
        provider: SocialProvider,
        access_token: &str,
    ) -> Result<SocialResolution, AppError> {
        let profile = self.api.fetch_profile(provider, access_token).await?;
        self.resolver.resolve(&profile).await
    }

    /// 가입 확인 요청을 처리합니다.
    ///
    /// 동시에 들어온 같은 프로필의 가입 요청 중 패자는 저장소 유니크
    /// 제약에서 중복 에러를 받습니다. 그 경우 승자가 만든
    /// `(provider, provider_user_id)` 연동 레코드가 존재할 때만 로그인으로
    /// 전환합니다. 연동 없이 이메일만 겹치는 요청은 클라이언트가 돌려보낸
    /// 값을 신뢰할 근거가 없으므로 중복 에러를 그대로 돌려줍니다.
    pub async fn register(
        &self,
        provider: SocialProvider,
        request: &SocialRegisterRequest,
    ) -> Result<User, AppError> {
        match self
            .resolver
            .register(
                provider,
                &request.email,
                request.nickname.as_deref(),
                &request.provider_user_id,
                request.username.as_deref(),
            )
            .await
        {
            Ok(user) => Ok(user),
            Err(err)
                if matches!(
                    err,
                    AppError::DuplicateEmail | AppError::DuplicateProviderLink
                ) =>
            {
                match self
                    .directory
                    .find_link(provider, &request.provider_user_id)
                    .await?
                {
                    Some(link) => {
                        let user = self
                            .directory
                            .find_user_by_id(link.user_id)
                            .await?
                            .ok_or(AppError::UserNotFound)?;
                        log::info!(
                            "{} 가입 경합 - 기존 연동으로 로그인 처리: user_id={}",
                            provider,
                            user.id
                        );
                        Ok(user)
                    }
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoginType;
    use crate::repositories::memory::MemoryDirectory;

    fn service_with(directory: Arc<MemoryDirectory>) -> SocialAuthService {
        let resolver = Arc::new(AccountResolver::new(directory.clone()));
        SocialAuthService::new(Arc::new(SocialApiClient::new()), resolver, directory)
    }

    fn register_request(email: &str, provider_user_id: &str) -> SocialRegisterRequest {
        serde_json::from_value(serde_json::json!({
            "email": email,
            "nickname": "앨리스",
            "kakaoId": provider_user_id,
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn test_register_creates_new_user() {
        let directory = Arc::new(MemoryDirectory::new());
        let service = service_with(directory.clone());

        let user = service
            .register(SocialProvider::Kakao, &register_request("a@x.com", "K1"))
            .await
            .unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(directory.user_count(), 1);
        assert_eq!(directory.link_count(), 1);
    }

    #[actix_web::test]
    async fn test_register_race_loser_logs_in_via_winner_link() {
        let directory = Arc::new(MemoryDirectory::new());
        let service = service_with(directory.clone());

        // 승자가 먼저 가입을 끝낸 상황
        let winner = service
            .register(SocialProvider::Kakao, &register_request("a@x.com", "K1"))
            .await
            .unwrap();

        // 패자의 동일 요청: DuplicateEmail이지만 연동이 존재하므로 로그인 처리
        let loser_result = service
            .register(SocialProvider::Kakao, &register_request("a@x.com", "K1"))
            .await
            .unwrap();

        assert_eq!(loser_result.id, winner.id);
        assert_eq!(directory.user_count(), 1);
        assert_eq!(directory.link_count(), 1);
    }

    #[actix_web::test]
    async fn test_register_duplicate_email_without_link_is_rejected() {
        let directory = Arc::new(MemoryDirectory::new());
        directory.seed_user("alice", "a@x.com", LoginType::Email);
        let service = service_with(directory.clone());

        // 기존 이메일 계정은 있지만 연동 레코드는 없다 -
        // 클라이언트가 보낸 값만 믿고 연동해 주지 않는다
        let result = service
            .register(SocialProvider::Kakao, &register_request("a@x.com", "K1"))
            .await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
        assert_eq!(directory.link_count(), 0);
    }
}
