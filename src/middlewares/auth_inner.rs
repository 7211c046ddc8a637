//! AuthMiddleware 인증 로직의 핵심 기능

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::middlewares::auth_middleware::is_public_request;
use crate::services::auth::TokenService;
use crate::services::auth::session_cookie;

/// 실제 인증 판정을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            // 공개 경로는 토큰 추출 없이 통과
            if is_public_request(req.method(), req.path()) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            // 세션 쿠키 우선, 없으면 Bearer 헤더
            let token = match session_cookie::token_from_request(&req) {
                Some(token) => token,
                None => {
                    log::debug!("토큰 없는 요청 거부: {} {}", req.method(), req.path());
                    return Ok(reject(req, &AppError::MissingToken));
                }
            };

            let token_service = TokenService::instance();

            match token_service.validate(&token) {
                Ok(claims) => {
                    // 사용자 식별 정보를 요청 extensions에 저장
                    req.extensions_mut().insert(AuthenticatedUser::from(&claims));
                    log::debug!("인증 성공: 사용자 ID {}", claims.sub);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::warn!("토큰 검증 실패: {}", err);
                    Ok(reject(req, &err))
                }
            }
        })
    }
}

/// 401 JSON 응답으로 요청을 종료합니다.
fn reject<B>(req: ServiceRequest, err: &AppError) -> ServiceResponse<EitherBody<B>> {
    let response = HttpResponse::Unauthorized().json(serde_json::json!({
        "success": false,
        "message": err.to_string(),
    }));

    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}
