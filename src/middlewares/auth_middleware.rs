//! JWT 인증 미들웨어
//!
//! 모든 인바운드 요청을 한 번씩 평가하는 상태 없는 게이트입니다.
//! 요청당 판정은 한 번뿐이고, 거부는 그 요청에 대해 최종적입니다.
//!
//! 1. CORS preflight(OPTIONS)는 무조건 통과
//! 2. 공개 경로 목록에 걸리면 토큰 확인 없이 통과
//!    (메뉴 목록은 GET만 공개 - 변경 동사는 인증 필요)
//! 3. 그 외에는 세션 쿠키 → `Authorization: Bearer` 순으로 토큰 추출
//! 4. 토큰이 없거나 검증에 실패하면 401 JSON 응답으로 종료
//! 5. 검증에 성공하면 사용자 식별 정보를 요청 extensions에 싣고 진행

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::http::Method;
use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 없이 접근 가능한 경로 접두사
///
/// 로그인/가입 및 소셜 콜백 계열, 헬스체크, AI 프록시가 해당합니다.
const PUBLIC_PATH_PREFIXES: &[&str] = &[
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/kakao/login",
    "/api/auth/kakao/callback",
    "/api/auth/kakao/register",
    "/api/auth/naver/callback",
    "/api/auth/naver/register",
    "/api/hello",
    "/api/openai/",
];

/// 요청이 인증 없이 통과할 수 있는지 판정합니다.
///
/// 게이트의 관할은 `/api` 아래 경로뿐입니다.
pub(crate) fn is_public_request(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS {
        return true;
    }

    if !path.starts_with("/api") {
        return true;
    }

    if PUBLIC_PATH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return true;
    }

    // 메뉴 목록은 읽기 전용 접근만 공개
    if method == Method::GET && path.starts_with("/api/menus") {
        return true;
    }

    false
}

/// JWT 인증 미들웨어
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AuthMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
