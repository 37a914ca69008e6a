use serde_json::Value;
use thiserror::Error;

/// 백엔드 호출 실패
/// 실패로 보고되었지만 실제로는 저장에 성공한 경우를 판별할 수 있도록
/// 상태 코드와 응답 본문을 보존한다.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend responded with status {status}")]
    Status { status: u16, payload: Option<Value> },

    #[error("unexpected response body (status {status}): {source}")]
    Decode {
        status: u16,
        payload: Option<Value>,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request path: {0}")]
    InvalidPath(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            ApiError::InvalidPath(_) => None,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Status { payload, .. } | ApiError::Decode { payload, .. } => {
                payload.as_ref()
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// 서버가 보낸 메시지 (문자열 또는 문자열 배열)
    pub fn server_message(&self) -> Option<String> {
        let payload = self.payload()?;
        let message = payload.get("message").or_else(|| payload.get("error"))?;
        match message {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
            _ => None,
        }
    }
}
