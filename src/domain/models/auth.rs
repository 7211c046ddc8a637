//! 토큰 클레임 및 인증된 요청 컨텍스트 모델

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::errors::errors::AppError;

/// JWT 토큰 클레임
///
/// 발급 이후 변경되지 않으며, 유효성은 서명과 `exp`만으로 결정됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID
    pub sub: i64,
    /// 사용자명
    pub username: String,
    /// 발급 시각 (unix timestamp)
    pub iat: i64,
    /// 만료 시각 (unix timestamp)
    pub exp: i64,
}

/// 인증 미들웨어가 요청 extensions에 저장하는 사용자 식별 정보
///
/// 토큰 클레임에서 추출되며, 보호된 핸들러는 extractor로 꺼내 씁니다.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

impl From<&TokenClaims> for AuthenticatedUser {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username.clone(),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    /// 요청 extensions에서 인증 정보를 추출합니다.
    ///
    /// 미들웨어를 거치지 않은 경로에서 사용되면 `MissingToken`으로 401이 됩니다.
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or(AppError::MissingToken),
        )
    }
}
