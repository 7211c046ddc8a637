//! 인증 관련 요청 DTO
//!
//! 필드 이름과 제약 조건은 기존 프론트엔드 계약을 그대로 따릅니다.
//! (소셜 가입 요청의 제공자 ID는 `kakaoId` / `naverId` 라는 이름으로 들어옵니다)

use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// 이메일 회원가입 요청
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 2, max = 50, message = "사용자명은 2~50자여야 합니다"))]
    pub username: String,

    #[validate(length(min = 6, message = "비밀번호는 6자 이상이어야 합니다"))]
    pub password: String,

    #[validate(email(message = "올바른 이메일 형식이어야 합니다"))]
    pub email: String,
}

/// 사용자명/비밀번호 로그인 요청
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 소셜 콜백 쿼리 파라미터
///
/// 제공자가 인가를 거부하면 `code` 없이 `error`만 들어옵니다.
#[derive(Debug, Deserialize)]
pub struct SocialCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// 소셜 가입 확인 요청
///
/// 가입 확인 페이지가 콜백 리다이렉트로 받은 프로필 정보를 그대로 되돌려
/// 보냅니다. 서버 측 대기 레코드는 없으며, 이 값들은 클라이언트를 신뢰하는
/// 경계입니다. 중복 판정만은 저장소 제약과 기존 연동 레코드로 검증합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct SocialRegisterRequest {
    #[validate(email(message = "올바른 이메일 형식이어야 합니다"))]
    pub email: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub nickname: Option<String>,

    /// 제공자 측 사용자 ID (`kakaoId` 또는 `naverId`)
    #[serde(alias = "kakaoId", alias = "naverId")]
    pub provider_user_id: String,

    /// 사용자가 가입 확인 페이지에서 직접 고른 사용자명 (선택)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub username: Option<String>,
}

/// 액세스 토큰 직접 로그인 요청 (비브라우저 클라이언트용)
#[derive(Debug, Deserialize)]
pub struct TokenLoginRequest {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_register_accepts_kakao_id_alias() {
        let json = r#"{"email":"a@x.com","nickname":"앨리스","kakaoId":"K1"}"#;
        let request: SocialRegisterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.provider_user_id, "K1");
        assert_eq!(request.nickname.as_deref(), Some("앨리스"));
        assert_eq!(request.username, None);
    }

    #[test]
    fn test_social_register_accepts_naver_id_alias() {
        let json = r#"{"email":"b@x.com","naverId":"N1","username":"bob"}"#;
        let request: SocialRegisterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.provider_user_id, "N1");
        assert_eq!(request.username.as_deref(), Some("bob"));
    }

    #[test]
    fn test_social_register_blank_optional_fields_become_none() {
        let json = r#"{"email":"a@x.com","nickname":"  ","kakaoId":"K1","username":""}"#;
        let request: SocialRegisterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.nickname, None);
        assert_eq!(request.username, None);
    }

    #[test]
    fn test_register_request_validation() {
        use validator::Validate;

        let valid = RegisterUserRequest {
            username: "alice".to_string(),
            password: "secret123".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_password = RegisterUserRequest {
            username: "alice".to_string(),
            password: "12345".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(short_password.validate().is_err());

        let bad_email = RegisterUserRequest {
            username: "alice".to_string(),
            password: "secret123".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_token_login_request_field_name() {
        let json = r#"{"accessToken":"abc"}"#;
        let request: TokenLoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.access_token, "abc");
    }
}
