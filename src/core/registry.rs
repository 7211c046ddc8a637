//! # Service Registry - 싱글톤 컴포넌트 컨테이너
//!
//! 애플리케이션 전역에서 공유되는 서비스/인프라 컴포넌트를 타입 단위로
//! 보관하는 컨테이너입니다. 모든 컴포넌트는 `main`의 부트스트랩 단계에서
//! 생성되어 [`ServiceLocator::set`]으로 등록되고, 이후 핸들러와 미들웨어는
//! 각 서비스의 `instance()` 헬퍼를 통해 `Arc` 핸들을 꺼내 씁니다.
//!
//! 등록은 시작 시 한 번만 일어나고 이후에는 읽기 전용이므로,
//! 요청 스레드들이 제한 없이 동시에 조회해도 안전합니다.
//!
//! ```rust,ignore
//! // main.rs
//! ServiceLocator::set(Arc::new(TokenService::new()));
//!
//! // 어디서든
//! let token_service = TokenService::instance();
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

/// 싱글톤 컴포넌트 컨테이너
///
/// `TypeId`를 키로 각 타입당 정확히 하나의 `Arc` 인스턴스를 보관합니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

/// 전역 컨테이너 인스턴스
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(|| ServiceLocator {
    instances: RwLock::new(HashMap::new()),
});

impl ServiceLocator {
    /// 컴포넌트 인스턴스를 등록합니다.
    ///
    /// 같은 타입을 다시 등록하면 기존 인스턴스를 교체합니다.
    /// (테스트에서 컴포넌트를 갈아끼울 때 사용)
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = Self::short_type_name(std::any::type_name::<T>());
        log::debug!("컴포넌트 등록: {}", type_name);

        let mut instances = LOCATOR
            .instances
            .write()
            .expect("ServiceLocator lock poisoned");
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 컴포넌트 인스턴스를 가져옵니다.
    ///
    /// # Panics
    ///
    /// 해당 타입이 등록되지 않았거나 타입이 일치하지 않으면 패닉이 발생합니다.
    /// 부트스트랩 누락은 설정 오류이므로 조기에 실패시킵니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let instances = LOCATOR
            .instances
            .read()
            .expect("ServiceLocator lock poisoned");

        let instance = instances.get(&TypeId::of::<T>()).unwrap_or_else(|| {
            panic!(
                "{} is not registered. Register it with ServiceLocator::set() during startup",
                Self::short_type_name(std::any::type_name::<T>())
            )
        });

        instance
            .clone()
            .downcast::<T>()
            .expect("Type mismatch in ServiceLocator")
    }

    /// 전체 모듈 경로에서 타입 이름만 추출합니다.
    fn short_type_name(type_name: &str) -> &str {
        type_name.rsplit("::").next().unwrap_or(type_name)
    }
}
