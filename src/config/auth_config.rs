//! # Authentication Configuration Module
//!
//! JWT 토큰, 세션 쿠키, 카카오/네이버 OAuth 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **이메일 인증**: 사용자명/패스워드 기반 전통적인 인증
//! 2. **카카오 OAuth 2.0**: 카카오 계정을 통한 소셜 로그인
//! 3. **네이버 OAuth 2.0**: 네이버 계정을 통한 소셜 로그인
//!
//! 토큰 서명 시크릿은 시작 시 한 번 읽히는 프로세스 전역 불변 설정입니다.
//! 시크릿 교체(rotation)나 토큰 폐기 목록은 존재하지 않습니다 -
//! 토큰 유효성은 서명과 만료 시각만으로 결정됩니다.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// 사용자의 로그인 유형
///
/// DB의 `login_type` 컬럼과 일대일 대응합니다. 소셜 계정이 연동되면
/// 기존 이메일 계정이라도 마지막 소셜 제공자로 갱신됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    Email,
    Kakao,
    Naver,
}

impl LoginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginType::Email => "email",
            LoginType::Kakao => "kakao",
            LoginType::Naver => "naver",
        }
    }
}

/// 사용자 역할 (`USER` / `ADMIN`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

/// 소셜 로그인 제공자
///
/// 카카오와 네이버는 동일한 인가 코드 교환/프로필 조회 계약을 공유하며,
/// 이 태그 하나로 엔드포인트와 자격증명, 파라미터 이름이 선택됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Kakao,
    Naver,
}

impl SocialProvider {
    /// 와이어 포맷 태그 (`kakao` / `naver`)
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Kakao => "kakao",
            SocialProvider::Naver => "naver",
        }
    }

    /// 가입 확인 페이지로 전달하는 제공자 ID 파라미터 이름
    pub fn id_param(&self) -> &'static str {
        match self {
            SocialProvider::Kakao => "kakaoId",
            SocialProvider::Naver => "naverId",
        }
    }

    /// 로그인 성공 리다이렉트에 붙는 쿼리 플래그
    pub fn login_flag(&self) -> &'static str {
        match self {
            SocialProvider::Kakao => "kakaoLogin",
            SocialProvider::Naver => "naverLogin",
        }
    }

    pub fn login_type(&self) -> LoginType {
        match self {
            SocialProvider::Kakao => LoginType::Kakao,
            SocialProvider::Naver => LoginType::Naver,
        }
    }
}

impl fmt::Display for SocialProvider {
    /// 사용자 대면 메시지에 쓰이는 한글 표기
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocialProvider::Kakao => write!(f, "카카오"),
            SocialProvider::Naver => write!(f, "네이버"),
        }
    }
}

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 토큰 서명에 사용하는 공유 시크릿을 반환합니다.
    ///
    /// 기본값은 개발 환경 전용이며, 운영 환경에서는 `JWT_SECRET`을
    /// 반드시 설정해야 합니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| "always-secret-key-change-in-production-min-256-bits".to_string())
    }

    /// 토큰 수명(시간)을 반환합니다. 기본값: 24시간
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }
}

/// 세션 쿠키 설정
///
/// 쿠키 수명(7일)과 토큰 자체의 만료 클레임(기본 24시간)은 서로
/// 독립적으로 검사됩니다. 실질 세션 수명은 둘 중 짧은 쪽입니다.
pub struct SessionCookieConfig;

impl SessionCookieConfig {
    /// 세션 쿠키 이름
    pub const NAME: &'static str = "auth_token";

    /// 쿠키 Max-Age(초)를 반환합니다. 기본값: 604800 (7일)
    pub fn max_age_secs() -> i64 {
        env::var("SESSION_COOKIE_MAX_AGE")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604_800)
    }

    /// `Secure` 속성 사용 여부를 반환합니다.
    ///
    /// `COOKIE_SECURE` 환경 변수가 우선하며, 미설정 시 프로덕션 환경에서만
    /// true입니다. (개발 환경은 HTTP이므로 false)
    pub fn secure() -> bool {
        match env::var("COOKIE_SECURE") {
            Ok(value) => value == "true" || value == "1",
            Err(_) => super::Environment::current().is_production(),
        }
    }
}

/// 카카오 OAuth 설정
///
/// 카카오는 REST API 키가 client_id 역할을 하며, client_secret은 선택입니다.
pub struct KakaoOAuthConfig;

impl KakaoOAuthConfig {
    /// 카카오 REST API 키 (client_id)
    ///
    /// # Panics
    ///
    /// `KAKAO_REST_API_KEY` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn rest_api_key() -> String {
        env::var("KAKAO_REST_API_KEY").expect("KAKAO_REST_API_KEY must be set")
    }

    /// 선택적인 카카오 client_secret (보안 강화 옵션 활성화 시에만 존재)
    pub fn client_secret() -> Option<String> {
        env::var("KAKAO_CLIENT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    /// 인가 코드 콜백 URI
    ///
    /// # Panics
    ///
    /// `KAKAO_REDIRECT_URI` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn redirect_uri() -> String {
        env::var("KAKAO_REDIRECT_URI").expect("KAKAO_REDIRECT_URI must be set")
    }

    /// 토큰 교환 엔드포인트
    pub fn token_uri() -> String {
        env::var("KAKAO_TOKEN_URI")
            .unwrap_or_else(|_| "https://kauth.kakao.com/oauth/token".to_string())
    }

    /// 사용자 정보 조회 엔드포인트 (POST + Bearer 토큰)
    pub fn user_info_uri() -> String {
        env::var("KAKAO_USER_INFO_URI")
            .unwrap_or_else(|_| "https://kapi.kakao.com/v2/user/me".to_string())
    }

    /// 카카오계정과 함께 로그아웃한 뒤 돌아올 URI
    pub fn logout_redirect_uri() -> String {
        env::var("KAKAO_LOGOUT_REDIRECT_URI")
            .unwrap_or_else(|_| format!("{}/login", super::FrontendConfig::base_url()))
    }

    /// 카카오계정과 함께 로그아웃하기 위한 URL을 생성합니다.
    pub fn logout_url() -> String {
        format!(
            "https://kauth.kakao.com/oauth/logout?client_id={}&logout_redirect_uri={}",
            Self::rest_api_key(),
            urlencoding::encode(&Self::logout_redirect_uri())
        )
    }
}

/// 네이버 OAuth 설정
///
/// 네이버는 client_secret이 필수입니다.
pub struct NaverOAuthConfig;

impl NaverOAuthConfig {
    /// 네이버 애플리케이션 client_id
    ///
    /// # Panics
    ///
    /// `NAVER_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_id() -> String {
        env::var("NAVER_CLIENT_ID").expect("NAVER_CLIENT_ID must be set")
    }

    /// 네이버 애플리케이션 client_secret
    ///
    /// # Panics
    ///
    /// `NAVER_CLIENT_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_secret() -> String {
        env::var("NAVER_CLIENT_SECRET").expect("NAVER_CLIENT_SECRET must be set")
    }

    /// 인가 코드 콜백 URI
    ///
    /// # Panics
    ///
    /// `NAVER_REDIRECT_URI` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn redirect_uri() -> String {
        env::var("NAVER_REDIRECT_URI").expect("NAVER_REDIRECT_URI must be set")
    }

    /// 토큰 교환 엔드포인트
    pub fn token_uri() -> String {
        env::var("NAVER_TOKEN_URI")
            .unwrap_or_else(|_| "https://nid.naver.com/oauth2.0/token".to_string())
    }

    /// 사용자 정보 조회 엔드포인트 (GET + Bearer 토큰)
    pub fn user_info_uri() -> String {
        env::var("NAVER_USER_INFO_URI")
            .unwrap_or_else(|_| "https://openapi.naver.com/v1/nid/me".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_wire_tags() {
        assert_eq!(SocialProvider::Kakao.as_str(), "kakao");
        assert_eq!(SocialProvider::Naver.as_str(), "naver");
        assert_eq!(SocialProvider::Kakao.id_param(), "kakaoId");
        assert_eq!(SocialProvider::Naver.id_param(), "naverId");
        assert_eq!(SocialProvider::Kakao.login_flag(), "kakaoLogin");
        assert_eq!(SocialProvider::Naver.login_flag(), "naverLogin");
    }

    #[test]
    fn test_provider_login_type_mapping() {
        assert_eq!(SocialProvider::Kakao.login_type(), LoginType::Kakao);
        assert_eq!(SocialProvider::Naver.login_type(), LoginType::Naver);
    }

    #[test]
    fn test_login_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LoginType::Kakao).unwrap(),
            "\"kakao\""
        );
        assert_eq!(serde_json::to_string(&LoginType::Email).unwrap(), "\"email\"");
    }

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"USER\"");
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
    }

    #[test]
    fn test_jwt_defaults() {
        if std::env::var("JWT_SECRET").is_err() {
            assert!(JwtConfig::secret().contains("change-in-production"));
        }
        if std::env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 24);
        }
    }

    #[test]
    fn test_session_cookie_defaults() {
        if std::env::var("SESSION_COOKIE_MAX_AGE").is_err() {
            assert_eq!(SessionCookieConfig::max_age_secs(), 604_800);
        }
    }
}
