//! 세션 쿠키 바인딩
//!
//! 발급된 토큰을 HTTP 쿠키로 싣고 내리는 계층입니다.
//! 쿠키 속성은 고정입니다: `HttpOnly; Path=/; Max-Age=604800; SameSite=Lax`,
//! `Secure`는 배포 환경 설정을 따릅니다.
//!
//! 서버 측 세션 테이블은 없습니다. 쿠키를 지우는 것이 로그아웃 계약의
//! 전부이며, 지워진 토큰도 자체 만료 전까지는 헤더로 다시 제출하면
//! 여전히 유효합니다.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::ServiceRequest;
use actix_web::http::header;

use crate::config::SessionCookieConfig;

/// 토큰을 담은 세션 쿠키를 생성합니다.
pub fn bind(token: String) -> Cookie<'static> {
    Cookie::build(SessionCookieConfig::NAME, token)
        .http_only(true)
        .path("/")
        .max_age(Duration::seconds(SessionCookieConfig::max_age_secs()))
        .same_site(SameSite::Lax)
        .secure(SessionCookieConfig::secure())
        .finish()
}

/// 세션 쿠키를 삭제하는(Max-Age=0) 쿠키를 생성합니다.
pub fn clear() -> Cookie<'static> {
    Cookie::build(SessionCookieConfig::NAME, "")
        .http_only(true)
        .path("/")
        .max_age(Duration::seconds(0))
        .same_site(SameSite::Lax)
        .secure(SessionCookieConfig::secure())
        .finish()
}

/// 요청에서 토큰을 추출합니다.
///
/// 세션 쿠키를 우선하고, 없으면 비브라우저 클라이언트를 위해
/// `Authorization: Bearer` 헤더를 확인합니다.
pub fn token_from_request(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SessionCookieConfig::NAME) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bind_sets_fixed_attributes() {
        let cookie = bind("token-value".to_string());

        assert_eq!(cookie.name(), "auth_token");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604_800)));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_clear_expires_immediately() {
        let cookie = clear();

        assert_eq!(cookie.name(), "auth_token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::seconds(0)));
    }

    #[test]
    fn test_extract_prefers_cookie_over_header() {
        let req = TestRequest::default()
            .cookie(Cookie::new("auth_token", "cookie-token"))
            .insert_header((header::AUTHORIZATION, "Bearer header-token"))
            .to_srv_request();

        assert_eq!(token_from_request(&req), Some("cookie-token".to_string()));
    }

    #[test]
    fn test_extract_falls_back_to_bearer_header() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer header-token"))
            .to_srv_request();

        assert_eq!(token_from_request(&req), Some("header-token".to_string()));
    }

    #[test]
    fn test_extract_rejects_non_bearer_header() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwdw=="))
            .to_srv_request();

        assert_eq!(token_from_request(&req), None);
    }

    #[test]
    fn test_extract_returns_none_without_credentials() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(token_from_request(&req), None);
    }
}
