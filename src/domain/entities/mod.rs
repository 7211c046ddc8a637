//! 핵심 도메인 엔티티

pub mod social_login;
pub mod user;

pub use social_login::SocialLogin;
pub use user::User;
