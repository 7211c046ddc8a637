//! 인증 서비스 모듈
//!
//! - [`token_service`] - JWT 토큰 발급/검증
//! - [`session_cookie`] - 세션 쿠키 생성/삭제/추출
//! - [`social_api`] - 카카오/네이버 API 클라이언트
//! - [`account_resolver`] - 소셜 프로필의 계정 귀속 판정과 가입 처리
//! - [`social_auth_service`] - 소셜 로그인 플로우 오케스트레이션

pub mod account_resolver;
pub mod session_cookie;
pub mod social_api;
pub mod social_auth_service;
pub mod token_service;

pub use account_resolver::{AccountResolver, SocialResolution};
pub use social_api::SocialApiClient;
pub use social_auth_service::SocialAuthService;
pub use token_service::TokenService;
