//! API 경계의 요청 객체

pub mod auth_requests;

pub use auth_requests::{
    LoginRequest, RegisterUserRequest, SocialCallbackQuery, SocialRegisterRequest,
    TokenLoginRequest,
};
