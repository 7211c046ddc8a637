//! 서버 및 환경 설정 관리 모듈

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우
    /// `Development`를 기본값으로 사용합니다.
    pub fn current() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            "test" | "testing" => Environment::Test,
            _ => Environment::Development,
        }
    }

    /// 프로덕션 유사 환경 여부를 반환합니다.
    ///
    /// 세션 쿠키의 `Secure` 속성은 이 값을 따릅니다.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST` 환경 변수(4-15)가 우선하며,
    /// 미설정 시 개발/테스트 환경은 4, 프로덕션은 12를 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        match Environment::current() {
            Environment::Development | Environment::Test => 4,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다. 기본값: 8080
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}

/// 프론트엔드 리다이렉트 설정
///
/// 소셜 로그인 콜백은 처리 결과에 따라 프론트엔드 페이지로 리다이렉트합니다.
pub struct FrontendConfig;

impl FrontendConfig {
    /// 프론트엔드 기본 URL을 반환합니다. 기본값: "http://localhost:8088"
    pub fn base_url() -> String {
        env::var("FRONTEND_BASE_URL").unwrap_or_else(|_| "http://localhost:8088".to_string())
    }

    /// 소셜 로그인 성공 시 리다이렉트 URL (`/?kakaoLogin=success` 형태)
    pub fn login_success_url(flag: &str) -> String {
        format!("{}/?{}=success", Self::base_url(), flag)
    }

    /// 소셜 가입 확인 페이지 URL (쿼리 스트링은 호출부에서 구성)
    pub fn social_register_url(query: &str) -> String {
        format!("{}/social-register?{}", Self::base_url(), query)
    }
}
