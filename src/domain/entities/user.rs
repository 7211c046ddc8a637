//! User Entity Implementation
//!
//! 이메일 인증과 소셜 인증을 모두 지원하는 통합 사용자 모델입니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::config::{LoginType, SocialProvider, UserRole};

/// 사용자 엔티티
///
/// `username`과 `email`은 시스템 전역에서 유일하며,
/// 유일성은 저장소 계층의 유니크 인덱스로 강제됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 정수 ID (counters 컬렉션에서 할당)
    #[serde(rename = "_id")]
    pub id: i64,
    /// 사용자명 (unique)
    pub username: String,
    /// 이메일 (unique)
    pub email: String,
    /// bcrypt 해시된 비밀번호
    ///
    /// 소셜 가입 사용자도 무작위 값으로 해시를 갖지만,
    /// 해당 값으로는 로그인할 수 없습니다.
    pub password_hash: String,
    /// 로그인 유형 (email / kakao / naver)
    pub login_type: LoginType,
    /// 사용자 역할
    pub role: UserRole,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 이메일 가입 사용자 생성
    pub fn new_email(id: i64, username: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id,
            username,
            email,
            password_hash,
            login_type: LoginType::Email,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// 소셜 가입 사용자 생성
    ///
    /// `password_hash`에는 무작위 생성값의 해시가 들어갑니다.
    pub fn new_social(
        id: i64,
        username: String,
        email: String,
        password_hash: String,
        provider: SocialProvider,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id,
            username,
            email,
            password_hash,
            login_type: provider.login_type(),
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// 관리자 여부
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_email_user_defaults() {
        let user = User::new_email(
            1,
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );

        assert_eq!(user.login_type, LoginType::Email);
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_new_social_user_login_type() {
        let user = User::new_social(
            2,
            "bob".to_string(),
            "bob@example.com".to_string(),
            "hash".to_string(),
            SocialProvider::Naver,
        );

        assert_eq!(user.login_type, LoginType::Naver);
    }

    #[test]
    fn test_user_serializes_integer_id() {
        let user = User::new_email(
            42,
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["_id"], 42);
        assert_eq!(json["login_type"], "email");
        assert_eq!(json["role"], "USER");
    }
}
