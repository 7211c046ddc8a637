//! Authentication HTTP Handlers
//!
//! 이메일 기반 인증 엔드포인트들입니다.
//! 로그인 성공 시 토큰을 세션 쿠키로 내려주며, 로그아웃은 쿠키 삭제가
//! 전부입니다(서버 측 세션 없음).

use actix_web::{HttpResponse, get, post, web};
use serde_json::json;
use validator::Validate;

use crate::domain::dto::{LoginRequest, RegisterUserRequest};
use crate::domain::entities::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::auth::{TokenService, session_cookie};
use crate::services::users::UserService;

/// 응답에 싣는 사용자 요약 (비밀번호 해시는 절대 내보내지 않음)
fn user_summary(user: &User) -> serde_json::Value {
    json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "role": user.role,
    })
}

/// 이메일 회원가입 핸들러
///
/// 가입만 처리하고 로그인 상태로 만들지는 않습니다.
///
/// # Endpoint
/// `POST /api/auth/register`
#[post("/register")]
pub async fn register(payload: web::Json<RegisterUserRequest>) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = UserService::instance().register(payload.into_inner()).await?;

    log::info!("회원가입 완료: {} ({})", user.username, user.email);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "회원가입이 완료되었습니다.",
        "user": user_summary(&user),
    })))
}

/// 로그인 핸들러
///
/// # Endpoint
/// `POST /api/auth/login`
#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    if payload.username.trim().is_empty() || payload.password.trim().is_empty() {
        return Err(AppError::ValidationError(
            "사용자명과 비밀번호를 입력해주세요.".to_string(),
        ));
    }

    let user = UserService::instance()
        .authenticate(&payload.username, &payload.password)
        .await?;

    let token = TokenService::instance().issue(user.id, &user.username)?;

    log::info!("로그인 성공: {} (ID: {})", user.username, user.id);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie::bind(token))
        .json(json!({
            "success": true,
            "message": "로그인 성공",
            "user": user_summary(&user),
        })))
}

/// 현재 인증된 사용자 정보 조회 핸들러
///
/// # Endpoint
/// `GET /api/auth/me`
#[get("/me")]
pub async fn current_user(identity: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let user = UserService::instance()
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": user_summary(&user),
    })))
}

/// 로그아웃 핸들러
///
/// 세션 쿠키를 삭제합니다. 토큰 자체는 만료 전까지 유효하게 남습니다.
/// 카카오 연동 사용자에게는 카카오계정 로그아웃 URL을 함께 내려줍니다.
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout")]
pub async fn logout(identity: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    // 부가 정보 조회 실패가 로그아웃을 막아서는 안 된다
    let kakao_logout_url = match UserService::instance()
        .kakao_logout_url(identity.user_id)
        .await
    {
        Ok(url) => url,
        Err(err) => {
            log::warn!("카카오 로그아웃 URL 조회 실패: {:?}", err);
            None
        }
    };

    log::info!("로그아웃: 사용자 ID {}", identity.user_id);

    let mut body = json!({
        "success": true,
        "message": "로그아웃되었습니다.",
        "isKakaoUser": kakao_logout_url.is_some(),
    });
    if let Some(url) = kakao_logout_url {
        body["kakaoLogoutUrl"] = json!(url);
    }

    Ok(HttpResponse::Ok().cookie(session_cookie::clear()).json(body))
}

/// ID로 사용자 조회 핸들러
///
/// # Endpoint
/// `GET /api/auth/users/{id}`
#[get("/users/{id}")]
pub async fn user_by_id(path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let user = UserService::instance()
        .find_by_id(path.into_inner())
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": user_summary(&user),
    })))
}
