//! # MongoDB 저장소 구현
//!
//! [`UserDirectory`] 계약의 운영 구현입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 사용자 조회 캐싱을 지원합니다.
//!
//! ## 캐싱 전략
//!
//! - 개별 사용자: `user:{user_id}` (TTL 600초)
//! - 이메일 조회: `user:email:{email}` (TTL 600초)
//! - 사용자 갱신 시 두 키 모두 무효화
//!
//! ## 데이터 무결성
//!
//! 유니크 인덱스(email, username, provider+provider_user_id)가 중복을
//! 차단하며, E11000 중복 키 에러를 인덱스 이름으로 구분해 도메인 에러로
//! 변환합니다. 사전 조회는 편의일 뿐, 최종 판정은 항상 제약 위반입니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::caching::redis::RedisClient;
use crate::config::{LoginType, SocialProvider};
use crate::db::Database;
use crate::domain::entities::{SocialLogin, User};
use crate::errors::errors::AppError;
use crate::repositories::directory::{NewSocialLink, NewUser, UserDirectory};

/// 사용자 캐시 TTL (초)
const USER_CACHE_TTL_SECS: u64 = 600;

/// MongoDB 기반 사용자/소셜 연동 저장소
pub struct MongoDirectory {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl MongoDirectory {
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self { db, redis }
    }

    fn users(&self) -> Collection<User> {
        self.db.get_database().collection::<User>("users")
    }

    fn links(&self) -> Collection<SocialLogin> {
        self.db
            .get_database()
            .collection::<SocialLogin>("social_logins")
    }

    /// 필요한 모든 인덱스를 생성합니다.
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다. 유니크 인덱스는
    /// 중복 판정의 권위 있는 신호이므로 생성 실패 시 기동을 중단해야 합니다.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        self.users()
            .create_indexes([email_index, username_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let provider_user_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "provider_user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("provider_user_unique".to_string())
                    .build(),
            )
            .build();

        let link_user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("link_user_id".to_string()).build())
            .build();

        self.links()
            .create_indexes([provider_user_index, link_user_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// E11000 중복 키 에러라면 에러 메시지를 돌려줍니다.
    ///
    /// 메시지에는 위반한 인덱스 이름이 포함되어 있어 어느 제약이
    /// 걸렸는지 구분할 수 있습니다.
    fn duplicate_key_message(err: &mongodb::error::Error) -> Option<String> {
        if let mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
            write_error,
        )) = &*err.kind
        {
            if write_error.code == 11000 {
                return Some(write_error.message.clone());
            }
        }
        None
    }

    async fn invalidate_user_cache(&self, user: &User) {
        let _ = self.redis.delete(&format!("user:{}", user.id)).await;
        let _ = self
            .redis
            .delete(&format!("user:email:{}", user.email))
            .await;
    }
}

#[async_trait]
impl UserDirectory for MongoDirectory {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let cache_key = format!("user:{}", id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .users()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self
                .redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECS)
                .await;
        }

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = format!("user:email:{}", email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .users()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self
                .redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECS)
                .await;
        }

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.users()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let id = self.db.next_sequence("users").await?;

        let now = mongodb::bson::DateTime::now();
        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            login_type: new_user.login_type,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };

        match self.users().insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(err) => match Self::duplicate_key_message(&err) {
                Some(message) if message.contains("email_unique") => Err(AppError::DuplicateEmail),
                Some(message) if message.contains("username_unique") => {
                    Err(AppError::UsernameCollision)
                }
                _ => Err(AppError::DatabaseError(err.to_string())),
            },
        }
    }

    async fn set_login_type(&self, user_id: i64, login_type: LoginType) -> Result<(), AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .users()
            .find_one_and_update(
                doc! { "_id": user_id },
                doc! { "$set": {
                    "login_type": login_type.as_str(),
                    "updated_at": mongodb::bson::DateTime::now(),
                } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        match updated {
            Some(user) => {
                self.invalidate_user_cache(&user).await;
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
        self.links()
            .find_one(doc! {
                "provider": provider.as_str(),
                "provider_user_id": provider_user_id,
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_link_by_user(&self, user_id: i64) -> Result<Option<SocialLogin>, AppError> {
        self.links()
            .find_one(doc! { "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create_link(&self, new_link: NewSocialLink) -> Result<SocialLogin, AppError> {
        let id = self.db.next_sequence("social_logins").await?;

        let link = SocialLogin::new(
            id,
            new_link.user_id,
            new_link.provider,
            new_link.provider_user_id,
            new_link.email,
        );

        match self.links().insert_one(&link).await {
            Ok(_) => Ok(link),
            Err(err) => match Self::duplicate_key_message(&err) {
                Some(_) => Err(AppError::DuplicateProviderLink),
                None => Err(AppError::DatabaseError(err.to_string())),
            },
        }
    }
}
