// region:    --- Imports
use mazad_client::config::Config;
use mazad_client::handlers::{self, ProxyState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정 로드
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{:<12} --> 설정 로드 실패: {}", "Main", e);
            return Err(e.into());
        }
    };
    info!("{:<12} --> 백엔드 주소: {}", "Main", config.api_url);

    if config.api_key.is_none() {
        warn!(
            "{:<12} --> MAZAD_API_KEY 미설정: x-access-key 헤더 없이 전달합니다",
            "Main"
        );
    }

    // 라우터 설정
    let state = Arc::new(ProxyState::new(&config)?);
    let routes_all = handlers::router(state);

    // 리스너 생성
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        "{:<12} --> Notification proxy: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
