/// 알림 프록시
/// 브라우저의 Authorization 헤더를 그대로 전달하고, 서버 측 API 키를 추가해서
/// 백엔드 알림 API를 호출한다. API 키는 클라이언트에 노출되지 않는다.
// region:    --- Imports
use crate::api::routes;
use crate::config::Config;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use reqwest::{Client, Url};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

// endregion: --- Imports

pub const API_KEY_HEADER: &str = "x-access-key";

// region:    --- Proxy State
pub struct ProxyState {
    http: Client,
    upstream: Url,
    api_key: Option<String>,
}

impl ProxyState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Client::builder().timeout(config.request_timeout).build()?,
            upstream: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

/// 프록시 라우터
pub fn router(state: Arc<ProxyState>) -> Router {
    // 프론트엔드 개발 서버를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/notification/general",
            get(handle_general_notifications),
        )
        .layer(cors)
        .with_state(state)
}

// endregion: --- Proxy State

// region:    --- Proxy Handlers

/// 일반 알림 조회 프록시
pub async fn handle_general_notifications(
    State(state): State<Arc<ProxyState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("{:<12} --> 일반 알림 조회 프록시", "Proxy");

    let url = match state.upstream.join(routes::GENERAL_NOTIFICATIONS) {
        Ok(url) => url,
        Err(e) => {
            error!("{:<12} --> 잘못된 백엔드 주소: {}", "Proxy", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Invalid upstream url" })),
            )
                .into_response();
        }
    };

    let mut request = state.http.get(url);
    if let Some(auth) = headers.get(AUTHORIZATION) {
        request = request.header(AUTHORIZATION, auth.clone());
    }
    if let Some(key) = &state.api_key {
        request = request.header(API_KEY_HEADER, key);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            error!("{:<12} --> 백엔드 호출 실패: {}", "Proxy", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "Failed to reach notification service",
                    "message": e.to_string()
                })),
            )
                .into_response();
        }
    };

    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        warn!("{:<12} --> 백엔드 오류 status: {}", "Proxy", status);
        return (
            status,
            Json(json!({
                "error": "Failed to fetch notifications",
                "details": body
            })),
        )
            .into_response();
    }

    // 백엔드가 배열을 바로 보내는 경우도 같은 형태로 감싼다
    let notifications = match body {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut fields) => fields
            .remove("notifications")
            .unwrap_or_else(|| Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };

    (
        StatusCode::OK,
        Json(json!({ "notifications": notifications })),
    )
        .into_response()
}

// endregion: --- Proxy Handlers
