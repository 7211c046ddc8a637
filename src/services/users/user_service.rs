//! 사용자 서비스 구현
//!
//! 이메일 가입/로그인과 사용자 조회를 담당합니다.

use std::sync::Arc;

use crate::config::{KakaoOAuthConfig, LoginType, PasswordConfig, SocialProvider, UserRole};
use crate::core::ServiceLocator;
use crate::domain::dto::RegisterUserRequest;
use crate::domain::entities::User;
use crate::errors::errors::AppError;
use crate::repositories::{NewUser, UserDirectory};

const INVALID_CREDENTIALS_MESSAGE: &str = "사용자명 또는 비밀번호가 올바르지 않습니다.";

/// 사용자 서비스
pub struct UserService {
    directory: Arc<dyn UserDirectory>,
}

impl UserService {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// 전역 컨테이너에서 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 이메일 회원가입
    ///
    /// 중복 판정은 저장소 유니크 제약이 내립니다.
    ///
    /// # Errors
    ///
    /// * `DuplicateEmail` / `UsernameCollision` - 이미 사용 중인 값
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, AppError> {
        let password_hash = bcrypt::hash(&request.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해시 생성 실패: {}", e)))?;

        self.directory
            .create_user(NewUser {
                username: request.username.trim().to_string(),
                email: request.email.trim().to_string(),
                password_hash,
                login_type: LoginType::Email,
                role: UserRole::User,
            })
            .await
    }

    /// 사용자명/비밀번호 인증
    ///
    /// 사용자 부재와 비밀번호 불일치는 같은 메시지로 응답합니다.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .directory
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string())
            })?;

        let password_matches = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !password_matches {
            return Err(AppError::AuthenticationError(
                INVALID_CREDENTIALS_MESSAGE.to_string(),
            ));
        }

        Ok(user)
    }

    /// ID로 사용자 조회
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.directory.find_user_by_id(id).await
    }

    /// 카카오 연동 사용자라면 카카오계정 로그아웃 URL을 돌려줍니다.
    ///
    /// 로그아웃 응답에 부가 정보로 실리며, 연동이 없으면 None입니다.
    pub async fn kakao_logout_url(&self, user_id: i64) -> Result<Option<String>, AppError> {
        match self.directory.find_link_by_user(user_id).await? {
            Some(link) if link.provider == SocialProvider::Kakao => {
                Ok(Some(KakaoOAuthConfig::logout_url()))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryDirectory;

    fn register_request(username: &str, email: &str, password: &str) -> RegisterUserRequest {
        serde_json::from_value(serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn test_register_then_authenticate() {
        let directory = Arc::new(MemoryDirectory::new());
        let service = UserService::new(directory.clone());

        let user = service
            .register(register_request("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        assert_eq!(user.login_type, LoginType::Email);
        assert_eq!(user.role, UserRole::User);
        // 비밀번호는 해시로만 저장된다
        assert_ne!(user.password_hash, "secret123");

        let authenticated = service.authenticate("alice", "secret123").await.unwrap();
        assert_eq!(authenticated.id, user.id);
    }

    #[actix_web::test]
    async fn test_authenticate_rejects_wrong_password() {
        let directory = Arc::new(MemoryDirectory::new());
        let service = UserService::new(directory.clone());

        service
            .register(register_request("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        let result = service.authenticate("alice", "wrong-password").await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_authenticate_unknown_user_same_message() {
        let directory = Arc::new(MemoryDirectory::new());
        let service = UserService::new(directory.clone());

        match service.authenticate("ghost", "whatever").await {
            Err(AppError::AuthenticationError(message)) => {
                assert_eq!(message, INVALID_CREDENTIALS_MESSAGE);
            }
            other => panic!("expected AuthenticationError, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_register_duplicate_email_rejected() {
        let directory = Arc::new(MemoryDirectory::new());
        let service = UserService::new(directory.clone());

        service
            .register(register_request("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        let result = service
            .register(register_request("alice2", "a@x.com", "secret123"))
            .await;
        assert!(matches!(result, Err(AppError::DuplicateEmail)));

        let result = service
            .register(register_request("alice", "a2@x.com", "secret123"))
            .await;
        assert!(matches!(result, Err(AppError::UsernameCollision)));
    }
}
