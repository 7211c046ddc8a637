//! JWT 토큰 관리 서비스 구현
//!
//! HMAC-SHA256 서명 기반의 상태 없는(stateless) 토큰 시스템을 제공합니다.
//! 토큰 유효성은 서명과 만료 시각만으로 결정됩니다 - 서버 측 세션 테이블이나
//! 폐기 목록은 없으며, 로그아웃은 클라이언트 쿠키 삭제가 전부입니다.
//!
//! 발급과 검증 모두 순수 연산이므로(I/O 없음) 임의 개수의 요청 스레드가
//! 동시에 호출해도 안전합니다. 공유 상태는 불변 시크릿뿐입니다.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::JwtConfig;
use crate::core::ServiceLocator;
use crate::domain::models::auth::TokenClaims;
use crate::errors::errors::AppError;

/// JWT 토큰 관리 서비스
pub struct TokenService;

impl TokenService {
    pub fn new() -> Self {
        Self
    }

    /// 전역 컨테이너에서 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 사용자를 위한 JWT 토큰 발급
    ///
    /// `iat = 지금`, `exp = 지금 + 설정된 수명(기본 24시간)`을 클레임에
    /// 포함합니다. 소셜 로그인 경로는 이 토큰을 7일짜리 쿠키에 담지만,
    /// 토큰 자체의 만료는 독립적으로 검사됩니다.
    ///
    /// # Arguments
    ///
    /// * `user_id` - 토큰을 발급받을 사용자 ID
    /// * `username` - 사용자명
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 인코딩 실패
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(JwtConfig::expiration_hours());

        let claims = TokenClaims {
            sub: user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Arguments
    ///
    /// * `token` - 검증할 JWT 토큰 문자열 (Bearer 접두사 제외)
    ///
    /// # Errors
    ///
    /// * `AppError::ExpiredToken` - 만료된 토큰
    /// * `AppError::MalformedToken` - 파싱/서명 검증 실패
    pub fn validate(&self, token: &str) -> Result<TokenClaims, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        // 만료 경계를 정확히 지키기 위해 leeway 없이 검증한다
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => AppError::MalformedToken,
            })
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 임의 클레임으로 직접 서명한 토큰을 만듭니다 (만료 경계 테스트용)
    fn encode_with_claims(claims: &TokenClaims) -> String {
        let secret = JwtConfig::secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), claims, &encoding_key).unwrap()
    }

    #[test]
    fn test_issue_validate_round_trip() {
        let service = TokenService::new();

        let token = service.issue(42, "alice").unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, JwtConfig::expiration_hours() * 3600);
    }

    #[test]
    fn test_validate_accepts_token_before_expiry() {
        let service = TokenService::new();
        let now = Utc::now().timestamp();

        let claims = TokenClaims {
            sub: 1,
            username: "alice".to_string(),
            iat: now - 86_370,
            exp: now + 30,
        };

        let token = encode_with_claims(&claims);
        assert!(service.validate(&token).is_ok());
    }

    #[test]
    fn test_validate_rejects_expired_token() {
        let service = TokenService::new();
        let now = Utc::now().timestamp();

        let claims = TokenClaims {
            sub: 1,
            username: "alice".to_string(),
            iat: now - 86_401,
            exp: now - 2,
        };

        let token = encode_with_claims(&claims);
        match service.validate(&token) {
            Err(AppError::ExpiredToken) => {}
            other => panic!("expected ExpiredToken, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let service = TokenService::new();

        match service.validate("not-a-token") {
            Err(AppError::MalformedToken) => {}
            other => panic!("expected MalformedToken, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_wrong_signature() {
        let service = TokenService::new();
        let now = Utc::now().timestamp();

        let claims = TokenClaims {
            sub: 1,
            username: "alice".to_string(),
            iat: now,
            exp: now + 3600,
        };

        let foreign_key = EncodingKey::from_secret(b"some-other-secret");
        let token = encode(&Header::default(), &claims, &foreign_key).unwrap();

        match service.validate(&token) {
            Err(AppError::MalformedToken) => {}
            other => panic!("expected MalformedToken, got {:?}", other),
        }
    }
}
