/// 알림 벨
/// 알림 목록, 읽지 않은 개수, 읽음 처리, 드롭다운 표시 상태를 관리한다.
// region:    --- Imports
pub mod model;

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use model::Notification;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

// endregion: --- Imports

// region:    --- Notification Bell
pub struct NotificationBell {
    client: ApiClient,
    notifications: RwLock<Vec<Notification>>,
    open: AtomicBool,
}

impl NotificationBell {
    pub fn new(client: ApiClient) -> Arc<Self> {
        Arc::new(Self {
            client,
            notifications: RwLock::new(Vec::new()),
            open: AtomicBool::new(false),
        })
    }

    /// 알림 목록 갱신 (폴링)
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let notifications = self.client.general_notifications().await?;
        debug!(
            "{:<12} --> 알림 {}건 수신",
            "Notification",
            notifications.len()
        );
        *self.notifications.write().await = notifications;
        Ok(())
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    pub async fn unread_count(&self) -> usize {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    /// 단건 읽음 처리
    pub async fn mark_as_read(&self, notification_id: &str) -> Result<(), ApiError> {
        info!(
            "{:<12} --> 읽음 처리 id: {}",
            "Notification", notification_id
        );
        self.client.mark_notification_read(notification_id).await?;
        if let Some(n) = self
            .notifications
            .write()
            .await
            .iter_mut()
            .find(|n| n.id == notification_id)
        {
            n.read = true;
        }
        Ok(())
    }

    /// 전체 읽음 처리
    /// 일괄 API가 없으므로 읽지 않은 알림마다 한 번씩 호출한다.
    /// 실패한 항목은 읽지 않은 상태로 남고 첫 오류를 반환한다.
    pub async fn mark_all_as_read(&self) -> Result<(), ApiError> {
        let unread: Vec<String> = self
            .notifications
            .read()
            .await
            .iter()
            .filter(|n| !n.read)
            .map(|n| n.id.clone())
            .collect();

        let mut first_error = None;
        for id in unread {
            if let Err(e) = self.mark_as_read(&id).await {
                error!("{:<12} --> 읽음 처리 실패 id: {}: {}", "Notification", id, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn toggle(&self) {
        self.open.fetch_xor(true, Ordering::SeqCst);
    }

    /// 바깥 클릭 시 닫기
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    /// 항목 선택: 읽음 처리 후 드롭다운 닫기
    pub async fn select(&self, notification_id: &str) -> Result<(), ApiError> {
        self.close();
        let already_read = self
            .notifications
            .read()
            .await
            .iter()
            .any(|n| n.id == notification_id && n.read);
        if already_read {
            return Ok(());
        }
        self.mark_as_read(notification_id).await
    }
}

// endregion: --- Notification Bell

// region:    --- Notification Poller
/// 주기적 알림 갱신, 핸들 drop 시 중지
pub struct NotificationPoller {
    task: JoinHandle<()>,
}

impl NotificationPoller {
    pub fn start(bell: Arc<NotificationBell>, period: Duration) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = bell.refresh().await {
                    error!("{:<12} --> 알림 갱신 실패: {}", "Poller", e);
                }
            }
        });
        Self { task }
    }

    /// 설정된 주기(MAZAD_NOTIFICATION_POLL_SECS)로 시작
    pub fn from_config(bell: Arc<NotificationBell>, config: &Config) -> Self {
        Self::start(bell, config.notification_poll_interval)
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// endregion: --- Notification Poller
