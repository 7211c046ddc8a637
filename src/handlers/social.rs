//! Social Authentication HTTP Handlers
//!
//! 카카오/네이버 소셜 로그인 엔드포인트들입니다.
//! 두 제공자의 플로우는 동일하므로 제공자 태그로 매개화된 공통 구현을
//! 공유하고, 엔드포인트는 얇은 래퍼입니다.
//!
//! 콜백의 "가입 확인 필요" 이관은 전적으로 상태가 없습니다 - 서버는
//! 대기 레코드를 만들지 않고 프로필을 URL 인코딩된 쿼리 파라미터로
//! 가입 확인 페이지에 넘깁니다.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde_json::json;
use validator::Validate;

use crate::config::{FrontendConfig, SocialProvider};
use crate::domain::dto::{SocialCallbackQuery, SocialRegisterRequest, TokenLoginRequest};
use crate::domain::entities::User;
use crate::domain::models::social::SocialProfile;
use crate::errors::errors::AppError;
use crate::services::auth::{SocialAuthService, SocialResolution, TokenService, session_cookie};

fn user_summary(user: &User) -> serde_json::Value {
    json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "role": user.role,
    })
}

/// 가입 확인 페이지로 넘길 쿼리 스트링을 구성합니다.
fn registration_query(profile: &SocialProfile) -> String {
    format!(
        "email={}&nickname={}&{}={}&provider={}",
        urlencoding::encode(&profile.email),
        urlencoding::encode(profile.nickname.as_deref().unwrap_or("")),
        profile.provider.id_param(),
        urlencoding::encode(&profile.provider_user_id),
        profile.provider.as_str(),
    )
}

/// 콜백 공통 구현: 코드 교환 → 프로필 → 귀속 판정 → 쿠키/리다이렉트
async fn social_callback(
    provider: SocialProvider,
    query: SocialCallbackQuery,
) -> Result<HttpResponse, AppError> {
    // 사용자가 인가를 거부했거나 제공자 측 오류
    if let Some(error) = &query.error {
        log::warn!("{} 인가 오류: {}", provider, error);
        return Err(AppError::ValidationError(format!(
            "{} 로그인 중 오류가 발생했습니다.",
            provider
        )));
    }

    let code = query
        .code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| {
            AppError::ValidationError(format!("{} 인가 코드를 받을 수 없습니다.", provider))
        })?;

    match SocialAuthService::instance()
        .authenticate_with_code(provider, code)
        .await?
    {
        SocialResolution::Login(user) => {
            let token = TokenService::instance().issue(user.id, &user.username)?;

            log::info!("{} 로그인 성공: 사용자 ID {}", provider, user.id);

            Ok(HttpResponse::Found()
                .cookie(session_cookie::bind(token))
                .append_header((
                    header::LOCATION,
                    FrontendConfig::login_success_url(provider.login_flag()),
                ))
                .finish())
        }
        SocialResolution::NeedsRegistration(profile) => {
            log::info!("{} 신규 사용자 - 가입 확인 페이지로 이동", provider);

            Ok(HttpResponse::Found()
                .append_header((
                    header::LOCATION,
                    FrontendConfig::social_register_url(&registration_query(&profile)),
                ))
                .finish())
        }
    }
}

/// 가입 확인 공통 구현: 사용자 생성 후 즉시 로그인 상태로
async fn social_register(
    provider: SocialProvider,
    payload: SocialRegisterRequest,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    if payload.provider_user_id.trim().is_empty() {
        return Err(AppError::ValidationError(
            "필수 정보가 누락되었습니다.".to_string(),
        ));
    }

    let user = SocialAuthService::instance()
        .register(provider, &payload)
        .await?;

    // 가입과 첫 로그인은 한 플로우다
    let token = TokenService::instance().issue(user.id, &user.username)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie::bind(token))
        .json(json!({
            "success": true,
            "message": format!("{} 소셜 로그인 가입이 완료되었습니다.", provider),
            "user": user_summary(&user),
        })))
}

/// 카카오 로그인 콜백 핸들러
///
/// # Endpoint
/// `GET /api/auth/kakao/callback?code={code}`
#[get("/kakao/callback")]
pub async fn kakao_callback(
    query: web::Query<SocialCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    social_callback(SocialProvider::Kakao, query.into_inner()).await
}

/// 네이버 로그인 콜백 핸들러
///
/// # Endpoint
/// `GET /api/auth/naver/callback?code={code}&state={state}`
#[get("/naver/callback")]
pub async fn naver_callback(
    query: web::Query<SocialCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    social_callback(SocialProvider::Naver, query.into_inner()).await
}

/// 카카오 소셜 가입 확인 핸들러
///
/// # Endpoint
/// `POST /api/auth/kakao/register`
#[post("/kakao/register")]
pub async fn kakao_register(
    payload: web::Json<SocialRegisterRequest>,
) -> Result<HttpResponse, AppError> {
    social_register(SocialProvider::Kakao, payload.into_inner()).await
}

/// 네이버 소셜 가입 확인 핸들러
///
/// # Endpoint
/// `POST /api/auth/naver/register`
#[post("/naver/register")]
pub async fn naver_register(
    payload: web::Json<SocialRegisterRequest>,
) -> Result<HttpResponse, AppError> {
    social_register(SocialProvider::Naver, payload.into_inner()).await
}

/// 카카오 액세스 토큰 직접 로그인 핸들러 (비브라우저 클라이언트용)
///
/// 이미 발급된 액세스 토큰으로 프로필을 조회해 귀속 판정합니다.
/// 가입이 필요한 프로필이면 리다이렉트 대신 프로필을 JSON으로 돌려줍니다.
///
/// # Endpoint
/// `POST /api/auth/kakao/login`
#[post("/kakao/login")]
pub async fn kakao_token_login(
    payload: web::Json<TokenLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let access_token = payload.access_token.trim();
    if access_token.is_empty() {
        return Err(AppError::ValidationError(
            "카카오 액세스 토큰이 필요합니다.".to_string(),
        ));
    }

    match SocialAuthService::instance()
        .authenticate_with_access_token(SocialProvider::Kakao, access_token)
        .await?
    {
        SocialResolution::Login(user) => {
            let token = TokenService::instance().issue(user.id, &user.username)?;

            Ok(HttpResponse::Ok()
                .cookie(session_cookie::bind(token))
                .json(json!({
                    "success": true,
                    "message": "카카오 로그인 성공",
                    "user": user_summary(&user),
                })))
        }
        SocialResolution::NeedsRegistration(profile) => Ok(HttpResponse::Ok().json(json!({
            "success": false,
            "message": "가입 확인이 필요합니다.",
            "needsRegistration": true,
            "profile": {
                "email": profile.email,
                "nickname": profile.nickname,
                "kakaoId": profile.provider_user_id,
                "provider": profile.provider.as_str(),
            },
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_query_is_url_encoded() {
        let profile = SocialProfile {
            provider: SocialProvider::Kakao,
            provider_user_id: "12345".to_string(),
            email: "a@x.com".to_string(),
            nickname: Some("앨리스 님".to_string()),
        };

        let query = registration_query(&profile);

        assert!(query.contains("email=a%40x.com"));
        assert!(query.contains("kakaoId=12345"));
        assert!(query.contains("provider=kakao"));
        // 공백과 한글은 인코딩되어야 한다
        assert!(!query.contains("앨리스 님"));
    }

    #[test]
    fn test_registration_query_with_empty_nickname() {
        let profile = SocialProfile {
            provider: SocialProvider::Naver,
            provider_user_id: "N-1".to_string(),
            email: "b@x.com".to_string(),
            nickname: None,
        };

        let query = registration_query(&profile);

        assert!(query.contains("nickname=&"));
        assert!(query.contains("naverId=N-1"));
        assert!(query.contains("provider=naver"));
    }
}
