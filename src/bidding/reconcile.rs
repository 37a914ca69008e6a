/// 응답 재조정
/// 백엔드가 저장에 성공하고도 오류를 보내는 경우가 있어,
/// 오류 응답이 실제로는 성공인지 판별한다. 모든 호출부는 이 함수만 사용한다.
// region:    --- Imports
use crate::api::ApiError;
use crate::error::FlowError;
use serde_json::Value;
use tracing::info;

// endregion: --- Imports

/// 재조정 결과
#[derive(Debug)]
pub enum Reconciliation<T> {
    /// 정상 성공
    Confirmed(T),
    /// 오류로 보고되었으나 성공으로 판정
    DisguisedSuccess,
    Failed(FlowError),
}

impl<T> Reconciliation<T> {
    pub fn is_success(&self) -> bool {
        !matches!(self, Reconciliation::Failed(_))
    }
}

/// 오류가 위장된 성공인지 판정
/// 1. 상태 코드가 2xx
/// 2. 본문에 success: true
/// 3. 본문에 저장된 오퍼의 필드(price 또는 _id)가 있음
pub fn is_disguised_success(err: &ApiError) -> bool {
    if let Some(status) = err.status() {
        if (200..300).contains(&status) {
            return true;
        }
    }

    match err.payload() {
        Some(Value::Object(fields)) => {
            fields.get("success").and_then(Value::as_bool) == Some(true)
                || fields.contains_key("price")
                || fields.contains_key("_id")
        }
        _ => false,
    }
}

/// API 결과를 재조정
pub fn reconcile<T>(result: Result<T, ApiError>) -> Reconciliation<T> {
    match result {
        Ok(value) => Reconciliation::Confirmed(value),
        Err(err) if is_disguised_success(&err) => {
            info!(
                "{:<12} --> 오류 응답을 성공으로 판정: {}",
                "Reconcile", err
            );
            Reconciliation::DisguisedSuccess
        }
        Err(err) => Reconciliation::Failed(FlowError::from_api(&err)),
    }
}
