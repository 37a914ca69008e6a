/// 인증 세션
/// 로그인/로그아웃은 외부 인증 모듈이 담당하고, 나머지 컴포넌트는 읽기만 한다.
// region:    --- Imports
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

// endregion: --- Imports

// region:    --- Session Model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Professional,
    Client,
    Reseller,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: SessionUser,
}

impl Session {
    pub fn is_professional(&self) -> bool {
        self.user.account_type == AccountType::Professional
    }
}

// endregion: --- Session Model

// region:    --- Session Handle
/// 프로세스 전역 세션 핸들
#[derive(Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }

    /// 현재 세션 스냅샷
    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// 외부 인증 모듈 전용
    pub async fn replace(&self, session: Option<Session>) {
        *self.inner.write().await = session;
    }
}

// endregion: --- Session Handle
