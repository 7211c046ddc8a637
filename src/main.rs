//! always 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 인증 파이프라인을 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 JWT 인증 기반의 REST API를 제공합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use always_backend::caching::redis::RedisClient;
use always_backend::config::{FrontendConfig, ServerConfig};
use always_backend::core::ServiceLocator;
use always_backend::db::Database;
use always_backend::middlewares::AuthMiddleware;
use always_backend::repositories::{MongoDirectory, UserDirectory};
use always_backend::routes::configure_all_routes;
use always_backend::services::auth::{
    AccountResolver, SocialApiClient, SocialAuthService, TokenService,
};
use always_backend::services::users::UserService;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("always 백엔드 시작중...");

    // 데이터 스토어 초기화
    let (database, redis_client) = initialize_data_stores().await;

    // 저장소 디렉터리 초기화 (유니크 인덱스는 중복 판정의 권위 있는 신호)
    let mongo_directory = Arc::new(MongoDirectory::new(database.clone(), redis_client.clone()));
    mongo_directory
        .ensure_indexes()
        .await
        .expect("저장소 인덱스 생성 실패");
    let directory: Arc<dyn UserDirectory> = mongo_directory;

    // 서비스 구성 및 전역 등록
    let social_api = Arc::new(SocialApiClient::new());
    let resolver = Arc::new(AccountResolver::new(directory.clone()));

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(Arc::new(TokenService::new()));
    ServiceLocator::set(Arc::new(UserService::new(directory.clone())));
    ServiceLocator::set(Arc::new(SocialAuthService::new(
        social_api.clone(),
        resolver.clone(),
        directory.clone(),
    )));
    ServiceLocator::set(social_api);
    ServiceLocator::set(resolver);

    info!("모든 서비스가 초기화되었습니다");

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("서버가 http://{} 에서 실행중입니다", bind_address);
    info!("Health check: http://{}/api/hello", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .unwrap();

    info!(
        "Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // 인증 게이트 (핸들러 바로 앞에서 평가)
            .wrap(AuthMiddleware::new())
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// `PROFILE` 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG` 환경변수를 기반으로 로깅 레벨을 설정합니다. 기본값은 info입니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// # Panics
///
/// MongoDB 또는 Redis 연결 실패 시 애플리케이션이 종료됩니다.
async fn initialize_data_stores() -> (Arc<Database>, Arc<RedisClient>) {
    info!("데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await.expect("데이터베이스 연결 실패"));

    let redis_client = Arc::new(RedisClient::new().await.expect("Redis 연결 실패"));

    (database, redis_client)
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드 오리진에서의 쿠키 포함 요청을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin(&FrontendConfig::base_url())
        .allowed_origin("http://localhost:8088")
        .allowed_origin("http://127.0.0.1:8088")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        // 세션 쿠키를 위해 자격 증명 지원
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
