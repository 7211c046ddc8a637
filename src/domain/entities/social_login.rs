//! SocialLogin Entity Implementation

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::config::SocialProvider;

/// 소셜 로그인 연동 엔티티
///
/// 로컬 사용자 한 명과 `(provider, provider_user_id)` 한 쌍을 연결합니다.
/// 한 쌍은 최대 한 명의 사용자만 가리킬 수 있으며,
/// 유일성은 저장소의 복합 유니크 인덱스로 강제됩니다.
/// 타임스탬프를 제외하면 생성 후 수정되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLogin {
    /// 정수 ID (counters 컬렉션에서 할당)
    #[serde(rename = "_id")]
    pub id: i64,
    /// users 컬렉션의 `_id` (FK)
    pub user_id: i64,
    /// 소셜 로그인 제공자
    pub provider: SocialProvider,
    /// 제공자 측의 사용자 고유 ID
    pub provider_user_id: String,
    /// 연동 시점의 이메일
    pub email: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl SocialLogin {
    pub fn new(
        id: i64,
        user_id: i64,
        provider: SocialProvider,
        provider_user_id: String,
        email: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id,
            user_id,
            provider,
            provider_user_id,
            email,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_login_serializes_provider_tag() {
        let link = SocialLogin::new(
            1,
            10,
            SocialProvider::Kakao,
            "K1".to_string(),
            "a@x.com".to_string(),
        );

        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["provider"], "kakao");
        assert_eq!(json["user_id"], 10);
        assert_eq!(json["provider_user_id"], "K1");
    }
}
