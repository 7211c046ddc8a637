//! # 문자열 유틸리티
//!
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some으로 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 프론트엔드는 선택 입력란을 비워두면 빈 문자열을 보냅니다.
/// 역직렬화 시 빈 문자열/공백 문자열을 None으로 변환하고,
/// 유효한 문자열은 앞뒤 공백을 제거한 후 Some으로 반환합니다.
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`
/// 속성과 함께 사용됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
