//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 게이트웨이와 소셜 로그인 파이프라인을 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 에러를
//! `{"success": false, "message": ...}` 형태의 JSON 응답으로 변환합니다.
//!
//! 외부 서비스(카카오/네이버 API, MongoDB)가 돌려준 원문 메시지는 절대
//! 클라이언트에게 전달하지 않습니다. 상세 내용은 로그로만 남기고,
//! 응답 메시지는 고정된 문구를 사용합니다.

use thiserror::Error;

use crate::config::SocialProvider;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 인증 토큰 미제공 (401 Unauthorized)
    #[error("인증 토큰이 필요합니다.")]
    MissingToken,

    /// 파싱/서명 검증에 실패한 토큰 (401 Unauthorized)
    #[error("유효하지 않은 토큰입니다.")]
    MalformedToken,

    /// 만료된 토큰 (401 Unauthorized)
    #[error("토큰이 만료되었습니다.")]
    ExpiredToken,

    /// 인증 실패 (401 Unauthorized)
    #[error("{0}")]
    AuthenticationError(String),

    /// 소셜 제공자 토큰 교환 실패 (502 Bad Gateway)
    #[error("{provider} 액세스 토큰 발급에 실패했습니다.")]
    ProviderExchangeFailure {
        provider: SocialProvider,
        status: u16,
    },

    /// 소셜 제공자 응답에 액세스 토큰 필드가 없음 (502 Bad Gateway)
    #[error("{provider} 응답에서 액세스 토큰을 찾을 수 없습니다.")]
    ProviderResponseMalformed { provider: SocialProvider },

    /// 소셜 제공자 사용자 정보 조회 실패 (502 Bad Gateway)
    #[error("{provider} 사용자 정보 조회에 실패했습니다.")]
    ProviderProfileFailure {
        provider: SocialProvider,
        status: u16,
    },

    /// 소셜 제공자가 이메일을 돌려주지 않음 (400 Bad Request)
    ///
    /// 이메일은 계정 귀속 판단의 전제 조건이므로 여기서 플로우가 끝납니다.
    #[error("{provider} 이메일 정보를 가져올 수 없습니다. {provider} 계정에서 이메일 제공에 동의해주세요.")]
    ProviderProfileIncomplete { provider: SocialProvider },

    /// 소셜 제공자 서버에 연결 불가 - 타임아웃/커넥션 오류 (502 Bad Gateway)
    #[error("{provider} 서버에 연결할 수 없습니다. 잠시 후 다시 시도해주세요.")]
    ProviderUnavailable { provider: SocialProvider },

    /// 이메일 중복 (409 Conflict)
    #[error("이미 존재하는 이메일입니다.")]
    DuplicateEmail,

    /// 사용자명 중복 (409 Conflict)
    ///
    /// 소셜 가입 플로우에서는 숫자 접미사 재시도로 복구되며,
    /// 이메일 가입 플로우에서는 그대로 클라이언트에게 전달됩니다.
    #[error("이미 사용 중인 사용자명입니다.")]
    UsernameCollision,

    /// `(provider, provider_user_id)` 연동 레코드 중복 (409 Conflict)
    #[error("이미 연동된 소셜 계정입니다.")]
    DuplicateProviderLink,

    /// 사용자 조회 실패 (404 Not Found)
    #[error("사용자를 찾을 수 없습니다.")]
    UserNotFound,

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("{0}")]
    ValidationError(String),

    /// 데이터베이스 에러 (500 Internal Server Error) - 상세는 로그로만
    #[error("서버 내부 오류가 발생했습니다.")]
    DatabaseError(String),

    /// Redis 캐시 에러 (500 Internal Server Error) - 상세는 로그로만
    #[error("서버 내부 오류가 발생했습니다.")]
    RedisError(String),

    /// 내부 서버 에러 (500 Internal Server Error) - 상세는 로그로만
    #[error("서버 내부 오류가 발생했습니다.")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::MissingToken
            | AppError::MalformedToken
            | AppError::ExpiredToken
            | AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::ProviderExchangeFailure { .. }
            | AppError::ProviderResponseMalformed { .. }
            | AppError::ProviderProfileFailure { .. }
            | AppError::ProviderUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::ProviderProfileIncomplete { .. } | AppError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::DuplicateEmail
            | AppError::UsernameCollision
            | AppError::DuplicateProviderLink => StatusCode::CONFLICT,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 계열은 내부 상세를 로그로 남기고, 응답 본문에는 고정 문구만 내보냅니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("내부 오류: {:?}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "message": self.to_string()
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
