/// 환경 변수 기반 설정
/// 백엔드 API 주소, 서버 측 API 키, 미디어 주소, 프록시 바인딩 주소를 관리한다.
// region:    --- Imports
use reqwest::Url;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Config
const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_ASSET_URL: &str = "http://localhost:3000/static/";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_NOTIFICATION_POLL_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid url in {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("invalid socket address in {name}: {value}")]
    InvalidAddr { name: &'static str, value: String },
    #[error("invalid number in {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// 클라이언트 및 프록시 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 백엔드 API 기본 주소
    pub api_url: Url,
    /// 서버 측에서만 주입하는 API 키 (x-access-key)
    pub api_key: Option<String>,
    /// 이미지/동영상 기본 주소
    pub asset_url: Url,
    /// 알림 프록시 바인딩 주소
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub notification_poll_interval: Duration,
}

impl Config {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_url = parse_url(
            "MAZAD_API_URL",
            env::var("MAZAD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        )?;
        let asset_url = parse_url(
            "MAZAD_ASSET_URL",
            env::var("MAZAD_ASSET_URL").unwrap_or_else(|_| DEFAULT_ASSET_URL.to_string()),
        )?;

        let bind_value =
            env::var("MAZAD_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr {
                name: "MAZAD_BIND_ADDR",
                value: bind_value.clone(),
            })?;

        let request_timeout = Duration::from_secs(parse_secs(
            "MAZAD_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        let notification_poll_interval = Duration::from_secs(parse_secs(
            "MAZAD_NOTIFICATION_POLL_SECS",
            DEFAULT_NOTIFICATION_POLL_SECS,
        )?);

        Ok(Self {
            api_url,
            api_key: env::var("MAZAD_API_KEY").ok().filter(|k| !k.is_empty()),
            asset_url,
            bind_addr,
            request_timeout,
            notification_poll_interval,
        })
    }

    /// 테스트나 임베딩용: 백엔드 주소만 지정하고 나머지는 기본값
    pub fn with_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_url("api_url", api_url.to_string())?,
            api_key: None,
            asset_url: parse_url("asset_url", DEFAULT_ASSET_URL.to_string())?,
            bind_addr: DEFAULT_BIND_ADDR
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidAddr {
                    name: "bind_addr",
                    value: DEFAULT_BIND_ADDR.to_string(),
                })?,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            notification_poll_interval: Duration::from_secs(DEFAULT_NOTIFICATION_POLL_SECS),
        })
    }

    /// 상대 경로 미디어를 asset 기본 주소 기준으로 변환
    /// 이미 절대 주소인 경우 그대로 반환
    pub fn media_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        match self.asset_url.join(path.trim_start_matches('/')) {
            Ok(url) => url.to_string(),
            Err(_) => path.to_string(),
        }
    }
}

// 끝에 '/'가 없으면 join 시 마지막 세그먼트가 사라지므로 보정
fn parse_url(name: &'static str, value: String) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.clone()
    } else {
        format!("{}/", value)
    };
    Url::parse(&normalized).map_err(|_| ConfigError::InvalidUrl { name, value })
}

fn parse_secs(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(default),
    }
}

// endregion: --- Config
