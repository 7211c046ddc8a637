//! # 소셜 제공자 API 클라이언트
//!
//! 카카오와 네이버의 OAuth 2.0 연동을 하나의 클라이언트로 제공합니다.
//! 두 제공자는 동일한 계약(인가 코드 교환 / 프로필 조회)을 공유하며,
//! 엔드포인트·자격증명·응답 형태만 [`SocialProvider`] 태그로 달라집니다.
//!
//! ## 요청 형식
//!
//! 토큰 교환 (두 제공자 공통, form-encoded POST):
//!
//! ```text
//! POST {token_uri}
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=authorization_code&client_id=...&redirect_uri=...&code=...[&client_secret=...]
//! ```
//!
//! 프로필 조회: 카카오는 POST, 네이버는 GET이며 둘 다 Bearer 토큰을 씁니다.
//!
//! ## 장애 처리
//!
//! 모든 요청에 명시적 타임아웃이 걸려 있어 느린 제공자가 요청 스레드를
//! 무한정 잡아두지 못합니다. 타임아웃/커넥션 수준의 일시 오류는 짧은
//! 백오프 후 한 번만 재시도하고, 그래도 실패하면 `ProviderUnavailable`로
//! 구분해 보고합니다. HTTP 에러 응답의 본문은 로그로만 남깁니다.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{KakaoOAuthConfig, NaverOAuthConfig, SocialProvider};
use crate::core::ServiceLocator;
use crate::domain::models::social::{
    KakaoUserResponse, NaverUserResponse, ProviderTokenResponse, SocialProfile,
};
use crate::errors::errors::AppError;

/// 제공자 호출 타임아웃
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// 일시 오류 재시도 전 대기 시간
const RETRY_BACKOFF: Duration = Duration::from_millis(300);

/// 제공자별 엔드포인트와 자격증명
struct ProviderEndpoints {
    token_uri: String,
    user_info_uri: String,
    client_id: String,
    client_secret: Option<String>,
    redirect_uri: String,
}

impl ProviderEndpoints {
    fn resolve(provider: SocialProvider) -> Self {
        match provider {
            SocialProvider::Kakao => Self {
                token_uri: KakaoOAuthConfig::token_uri(),
                user_info_uri: KakaoOAuthConfig::user_info_uri(),
                client_id: KakaoOAuthConfig::rest_api_key(),
                client_secret: KakaoOAuthConfig::client_secret(),
                redirect_uri: KakaoOAuthConfig::redirect_uri(),
            },
            SocialProvider::Naver => Self {
                token_uri: NaverOAuthConfig::token_uri(),
                user_info_uri: NaverOAuthConfig::user_info_uri(),
                client_id: NaverOAuthConfig::client_id(),
                client_secret: Some(NaverOAuthConfig::client_secret()),
                redirect_uri: NaverOAuthConfig::redirect_uri(),
            },
        }
    }
}

/// 카카오/네이버 API 클라이언트
pub struct SocialApiClient {
    http: reqwest::Client,
}

impl SocialApiClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("HTTP 클라이언트 생성 실패");

        Self { http }
    }

    /// 전역 컨테이너에서 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 인가 코드를 액세스 토큰으로 교환합니다.
    ///
    /// # Errors
    ///
    /// * `ProviderExchangeFailure` - 제공자가 2xx 외 응답을 돌려준 경우
    /// * `ProviderResponseMalformed` - 응답에 `access_token` 필드가 없는 경우
    /// * `ProviderUnavailable` - 타임아웃/커넥션 오류 (재시도 후에도 실패)
    pub async fn exchange_code(
        &self,
        provider: SocialProvider,
        code: &str,
    ) -> Result<String, AppError> {
        let endpoints = ProviderEndpoints::resolve(provider);

        let mut params: Vec<(&str, String)> = vec![
            ("grant_type", "authorization_code".to_string()),
            ("client_id", endpoints.client_id),
            ("redirect_uri", endpoints.redirect_uri),
            ("code", code.to_string()),
        ];
        if let Some(secret) = endpoints.client_secret {
            params.push(("client_secret", secret));
        }

        let request = self.http.post(&endpoints.token_uri).form(&params);
        let response = self.send_with_retry(provider, request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("{} 토큰 교환 실패 (HTTP {}): {}", provider, status, body);
            return Err(AppError::ProviderExchangeFailure {
                provider,
                status: status.as_u16(),
            });
        }

        let token_response = response
            .json::<ProviderTokenResponse>()
            .await
            .map_err(|e| {
                log::error!("{} 토큰 응답 파싱 실패: {}", provider, e);
                AppError::ProviderResponseMalformed { provider }
            })?;

        token_response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(AppError::ProviderResponseMalformed { provider })
    }

    /// 액세스 토큰으로 사용자 프로필을 조회하고 공통 형태로 정규화합니다.
    ///
    /// # Errors
    ///
    /// * `ProviderProfileFailure` - 제공자가 2xx 외 응답 또는 파싱 불가 응답을 돌려준 경우
    /// * `ProviderProfileIncomplete` - 응답에 이메일이 없는 경우
    /// * `ProviderUnavailable` - 타임아웃/커넥션 오류 (재시도 후에도 실패)
    pub async fn fetch_profile(
        &self,
        provider: SocialProvider,
        access_token: &str,
    ) -> Result<SocialProfile, AppError> {
        let endpoints = ProviderEndpoints::resolve(provider);

        // 카카오는 POST, 네이버는 GET
        let request = match provider {
            SocialProvider::Kakao => self
                .http
                .post(&endpoints.user_info_uri)
                .bearer_auth(access_token)
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded;charset=utf-8",
                ),
            SocialProvider::Naver => self
                .http
                .get(&endpoints.user_info_uri)
                .bearer_auth(access_token),
        };

        let response = self.send_with_retry(provider, request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!(
                "{} 사용자 정보 조회 실패 (HTTP {}): {}",
                provider,
                status,
                body
            );
            return Err(AppError::ProviderProfileFailure {
                provider,
                status: status.as_u16(),
            });
        }

        match provider {
            SocialProvider::Kakao => {
                let body = response.json::<KakaoUserResponse>().await.map_err(|e| {
                    log::error!("카카오 사용자 정보 파싱 실패: {}", e);
                    AppError::ProviderProfileFailure {
                        provider,
                        status: status.as_u16(),
                    }
                })?;
                Self::profile_from_kakao(body)
            }
            SocialProvider::Naver => {
                let body = response.json::<NaverUserResponse>().await.map_err(|e| {
                    log::error!("네이버 사용자 정보 파싱 실패: {}", e);
                    AppError::ProviderProfileFailure {
                        provider,
                        status: status.as_u16(),
                    }
                })?;
                Self::profile_from_naver(body)
            }
        }
    }

    /// 요청을 보내고, 일시적인 전송 오류면 한 번 재시도합니다.
    async fn send_with_retry(
        &self,
        provider: SocialProvider,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, AppError> {
        let retry = request.try_clone();

        match request.send().await {
            Ok(response) => Ok(response),
            Err(err) if Self::is_transient(&err) => {
                log::warn!("{} 요청 일시 오류, 재시도: {}", provider, err);
                actix_web::rt::time::sleep(RETRY_BACKOFF).await;

                match retry {
                    Some(retry_request) => retry_request.send().await.map_err(|e| {
                        log::error!("{} 요청 재시도 실패: {}", provider, e);
                        AppError::ProviderUnavailable { provider }
                    }),
                    None => Err(AppError::ProviderUnavailable { provider }),
                }
            }
            Err(err) => {
                log::error!("{} 요청 실패: {}", provider, err);
                Err(AppError::ProviderUnavailable { provider })
            }
        }
    }

    fn is_transient(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    /// 카카오 응답을 공통 프로필로 정규화합니다.
    ///
    /// 카카오 ID는 숫자로 내려오므로 문자열로 변환해 보관합니다.
    fn profile_from_kakao(body: KakaoUserResponse) -> Result<SocialProfile, AppError> {
        let provider = SocialProvider::Kakao;
        let account = body.kakao_account.unwrap_or_default();

        let email = account
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or(AppError::ProviderProfileIncomplete { provider })?;

        let nickname = account.profile.and_then(|profile| profile.nickname);

        Ok(SocialProfile {
            provider,
            provider_user_id: body.id.to_string(),
            email,
            nickname,
        })
    }

    /// 네이버 응답을 공통 프로필로 정규화합니다.
    ///
    /// 네이버는 `resultcode`/`response` 봉투 구조를 쓰며,
    /// `resultcode != "00"`은 조회 실패입니다.
    fn profile_from_naver(body: NaverUserResponse) -> Result<SocialProfile, AppError> {
        let provider = SocialProvider::Naver;

        if body.resultcode != "00" {
            log::error!(
                "네이버 사용자 정보 조회 실패: resultcode={}, message={}",
                body.resultcode,
                body.message.as_deref().unwrap_or("")
            );
            return Err(AppError::ProviderProfileFailure {
                provider,
                status: 200,
            });
        }

        let account = body.response.ok_or(AppError::ProviderProfileFailure {
            provider,
            status: 200,
        })?;

        let email = account
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or(AppError::ProviderProfileIncomplete { provider })?;

        Ok(SocialProfile {
            provider,
            provider_user_id: account.id,
            email,
            nickname: account.nickname,
        })
    }
}

impl Default for SocialApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kakao_profile_normalization() {
        let body: KakaoUserResponse = serde_json::from_str(
            r#"{
                "id": 1234567890,
                "kakao_account": {
                    "email": "alice@kakao.com",
                    "profile": { "nickname": "앨리스" }
                }
            }"#,
        )
        .unwrap();

        let profile = SocialApiClient::profile_from_kakao(body).unwrap();

        assert_eq!(profile.provider, SocialProvider::Kakao);
        assert_eq!(profile.provider_user_id, "1234567890");
        assert_eq!(profile.email, "alice@kakao.com");
        assert_eq!(profile.nickname.as_deref(), Some("앨리스"));
    }

    #[test]
    fn test_kakao_profile_without_email_is_incomplete() {
        let body: KakaoUserResponse = serde_json::from_str(
            r#"{ "id": 1, "kakao_account": { "profile": { "nickname": "앨리스" } } }"#,
        )
        .unwrap();

        match SocialApiClient::profile_from_kakao(body) {
            Err(AppError::ProviderProfileIncomplete { provider }) => {
                assert_eq!(provider, SocialProvider::Kakao);
            }
            other => panic!("expected ProviderProfileIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_kakao_profile_without_account_is_incomplete() {
        let body: KakaoUserResponse = serde_json::from_str(r#"{ "id": 1 }"#).unwrap();

        assert!(matches!(
            SocialApiClient::profile_from_kakao(body),
            Err(AppError::ProviderProfileIncomplete { .. })
        ));
    }

    #[test]
    fn test_naver_profile_normalization() {
        let body: NaverUserResponse = serde_json::from_str(
            r#"{
                "resultcode": "00",
                "message": "success",
                "response": { "id": "N-abc", "email": "bob@naver.com", "nickname": "밥" }
            }"#,
        )
        .unwrap();

        let profile = SocialApiClient::profile_from_naver(body).unwrap();

        assert_eq!(profile.provider, SocialProvider::Naver);
        assert_eq!(profile.provider_user_id, "N-abc");
        assert_eq!(profile.email, "bob@naver.com");
        assert_eq!(profile.nickname.as_deref(), Some("밥"));
    }

    #[test]
    fn test_naver_error_resultcode_is_failure() {
        let body: NaverUserResponse = serde_json::from_str(
            r#"{ "resultcode": "024", "message": "Authentication failed" }"#,
        )
        .unwrap();

        assert!(matches!(
            SocialApiClient::profile_from_naver(body),
            Err(AppError::ProviderProfileFailure { .. })
        ));
    }

    #[test]
    fn test_naver_profile_without_email_is_incomplete() {
        let body: NaverUserResponse = serde_json::from_str(
            r#"{ "resultcode": "00", "message": "success", "response": { "id": "N-abc" } }"#,
        )
        .unwrap();

        assert!(matches!(
            SocialApiClient::profile_from_naver(body),
            Err(AppError::ProviderProfileIncomplete { .. })
        ));
    }

    #[test]
    fn test_token_response_without_access_token() {
        let body: ProviderTokenResponse =
            serde_json::from_str(r#"{ "error": "invalid_grant" }"#).unwrap();
        assert!(body.access_token.is_none());
    }
}
