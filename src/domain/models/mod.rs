//! 외부 시스템 통합 모델 및 요청 컨텍스트 모델

pub mod auth;
pub mod social;
