//! 인메모리 저장소 구현 (테스트 전용)
//!
//! MongoDB 구현과 동일한 유일성 규칙을 흉내 내는 테스트 더블입니다.
//! 유니크 제약 위반 시 운영 구현과 같은 도메인 에러를 돌려줍니다.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::DateTime;

use crate::config::{LoginType, SocialProvider};
use crate::domain::entities::{SocialLogin, User};
use crate::errors::errors::AppError;
use crate::repositories::directory::{NewSocialLink, NewUser, UserDirectory};

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    links: Vec<SocialLogin>,
    next_user_id: i64,
    next_link_id: i64,
}

/// 인메모리 [`UserDirectory`] 구현
#[derive(Default)]
pub struct MemoryDirectory {
    state: Mutex<MemoryState>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 테스트 준비용: 사용자를 직접 심습니다.
    pub fn seed_user(&self, username: &str, email: &str, login_type: LoginType) -> User {
        let mut state = self.state.lock().unwrap();
        state.next_user_id += 1;

        let now = DateTime::now();
        let user = User {
            id: state.next_user_id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "seeded-hash".to_string(),
            login_type,
            role: crate::config::UserRole::User,
            created_at: now,
            updated_at: now,
        };

        state.users.push(user.clone());
        user
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn link_count(&self) -> usize {
        self.state.lock().unwrap().links.len()
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut state = self.state.lock().unwrap();

        if state.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::DuplicateEmail);
        }
        if state.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::UsernameCollision);
        }

        state.next_user_id += 1;
        let now = DateTime::now();
        let user = User {
            id: state.next_user_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            login_type: new_user.login_type,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };

        state.users.push(user.clone());
        Ok(user)
    }

    async fn set_login_type(&self, user_id: i64, login_type: LoginType) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();

        match state.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.login_type = login_type;
                user.updated_at = DateTime::now();
                Ok(())
            }
            None => Err(AppError::UserNotFound),
        }
    }

    async fn find_link(
        &self,
        provider: SocialProvider,
        provider_user_id: &str,
    ) -> Result<Option<SocialLogin>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .links
            .iter()
            .find(|l| l.provider == provider && l.provider_user_id == provider_user_id)
            .cloned())
    }

    async fn find_link_by_user(&self, user_id: i64) -> Result<Option<SocialLogin>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.links.iter().find(|l| l.user_id == user_id).cloned())
    }

    async fn create_link(&self, new_link: NewSocialLink) -> Result<SocialLogin, AppError> {
        let mut state = self.state.lock().unwrap();

        if state
            .links
            .iter()
            .any(|l| l.provider == new_link.provider && l.provider_user_id == new_link.provider_user_id)
        {
            return Err(AppError::DuplicateProviderLink);
        }

        state.next_link_id += 1;
        let link = SocialLogin::new(
            state.next_link_id,
            new_link.user_id,
            new_link.provider,
            new_link.provider_user_id,
            new_link.email,
        );

        state.links.push(link.clone());
        Ok(link)
    }
}
