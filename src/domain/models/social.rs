//! 소셜 제공자 통합 모델
//!
//! 카카오/네이버의 토큰·프로필 응답 와이어 형태와,
//! 두 제공자를 하나로 정규화한 [`SocialProfile`]을 정의합니다.

use serde::{Deserialize, Serialize};

use crate::config::SocialProvider;

/// 제공자별 응답을 정규화한 공통 프로필
///
/// 이메일은 계정 귀속 판단의 전제 조건이므로 필수입니다.
/// 이메일이 없는 응답은 프로필 조회 단계에서 이미 거부됩니다.
#[derive(Debug, Clone, Serialize)]
pub struct SocialProfile {
    pub provider: SocialProvider,
    pub provider_user_id: String,
    pub email: String,
    pub nickname: Option<String>,
}

/// 토큰 교환 응답 (카카오/네이버 공통 형태)
///
/// `access_token` 필드 부재는 제공자 응답 이상으로 처리해야 하므로
/// Option으로 받습니다.
#[derive(Debug, Deserialize)]
pub struct ProviderTokenResponse {
    pub access_token: Option<String>,
}

/// 카카오 사용자 정보 응답 (`https://kapi.kakao.com/v2/user/me`)
///
/// ```json
/// { "id": 12345, "kakao_account": { "email": "...", "profile": { "nickname": "..." } } }
/// ```
#[derive(Debug, Deserialize)]
pub struct KakaoUserResponse {
    pub id: i64,
    #[serde(default)]
    pub kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KakaoAccount {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile: Option<KakaoAccountProfile>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KakaoAccountProfile {
    #[serde(default)]
    pub nickname: Option<String>,
}

/// 네이버 사용자 정보 응답 (`https://openapi.naver.com/v1/nid/me`)
///
/// ```json
/// { "resultcode": "00", "message": "success", "response": { "id": "...", "email": "...", "nickname": "..." } }
/// ```
#[derive(Debug, Deserialize)]
pub struct NaverUserResponse {
    pub resultcode: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<NaverAccount>,
}

#[derive(Debug, Deserialize)]
pub struct NaverAccount {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}
