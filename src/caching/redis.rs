//! # Redis 캐시 클라이언트 구현
//!
//! Redis를 백엔드로 하는 읽기 캐시 클라이언트를 제공합니다.
//! 사용자 조회(ID/이메일)의 성능을 위해 저장소 계층에서 사용되며,
//! 값은 JSON으로 직렬화되어 TTL과 함께 저장됩니다.
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 처리합니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

use crate::errors::errors::AppError;

/// Redis 캐시 클라이언트 래퍼
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 환경 변수 `REDIS_URL`에서 서버 주소를 읽어오며(기본값:
    /// `redis://localhost:6379`), 생성 시 PING으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("Redis 연결 성공");

        Ok(Self { client })
    }

    /// 지정된 키의 값을 조회하고 JSON에서 역직렬화합니다.
    ///
    /// 키가 없으면 `Ok(None)`을 반환합니다.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        let raw: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| AppError::RedisError(e.to_string())),
            None => Ok(None),
        }
    }

    /// 값을 JSON으로 직렬화하여 TTL(초)과 함께 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> Result<(), AppError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        let json = serde_json::to_string(value).map_err(|e| AppError::RedisError(e.to_string()))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_secs)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(())
    }

    /// 지정된 키를 삭제합니다. 키가 없어도 성공으로 처리합니다.
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        conn.del::<_, ()>(key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(())
    }
}
