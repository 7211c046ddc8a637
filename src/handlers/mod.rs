//! HTTP 핸들러 모듈
//!
//! - [`auth`] - 이메일 가입/로그인/로그아웃, 현재 사용자 조회
//! - [`social`] - 카카오/네이버 콜백, 소셜 가입, 액세스 토큰 로그인

pub mod auth;
pub mod social;
