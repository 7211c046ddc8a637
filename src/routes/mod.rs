//! API 라우트 설정 모듈
//!
//! 인증 관련 엔드포인트와 헬스체크를 등록합니다.
//! 경로별 접근 제어는 앱 전역의 인증 미들웨어가 담당하므로
//! 여기서는 라우트 등록만 합니다.
//!
//! # Available Routes
//!
//! ## 이메일 인증
//! - `POST /api/auth/register` - 회원가입 (공개)
//! - `POST /api/auth/login` - 로그인 (공개)
//! - `GET /api/auth/me` - 현재 사용자 조회 (인증 필요)
//! - `POST /api/auth/logout` - 로그아웃 (인증 필요)
//! - `GET /api/auth/users/{id}` - 사용자 조회 (인증 필요)
//!
//! ## 소셜 인증 (모두 공개)
//! - `POST /api/auth/kakao/login` - 액세스 토큰 직접 로그인
//! - `GET /api/auth/kakao/callback` - 카카오 인가 코드 콜백
//! - `POST /api/auth/kakao/register` - 카카오 가입 확인
//! - `GET /api/auth/naver/callback` - 네이버 인가 코드 콜백
//! - `POST /api/auth/naver/register` - 네이버 가입 확인
//!
//! ## 기타
//! - `GET /api/hello` - 헬스체크 (공개)

use actix_web::web;
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
    configure_auth_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            // 이메일 인증
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::current_user)
            .service(handlers::auth::logout)
            .service(handlers::auth::user_by_id)
            // 카카오
            .service(handlers::social::kakao_token_login)
            .service(handlers::social::kakao_callback)
            .service(handlers::social::kakao_register)
            // 네이버
            .service(handlers::social::naver_callback)
            .service(handlers::social::naver_register),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/api/hello
/// ```
#[actix_web::get("/api/hello")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "always_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
