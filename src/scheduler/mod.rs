/// 남은 시간 카운트다운
/// 매 초 종료 시각과 현재 시각의 차이를 새로 계산한다 (누적 감소 방식이 아님).
/// 타이머마다 독립된 태스크로 실행되며, 핸들을 drop하면 중지된다.
// region:    --- Imports
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

// endregion: --- Imports

// region:    --- Time Left
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLeft {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub has_ended: bool,
}

/// 남은 시간 계산
pub fn time_left(ending_at: DateTime<Utc>, now: DateTime<Utc>) -> TimeLeft {
    let remaining = (ending_at - now).num_seconds().max(0);

    let days = remaining / 86_400;
    let hours = (remaining % 86_400) / 3_600;
    let minutes = (remaining % 3_600) / 60;
    let seconds = remaining % 60;

    TimeLeft {
        days: format!("{:02}", days),
        hours: format!("{:02}", hours),
        minutes: format!("{:02}", minutes),
        seconds: format!("{:02}", seconds),
        has_ended: ending_at <= now,
    }
}

// endregion: --- Time Left

// region:    --- Countdown
/// 카운트다운 핸들
pub struct Countdown {
    receiver: watch::Receiver<TimeLeft>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// 1초 간격 카운트다운 시작
    pub fn start(ending_at: DateTime<Utc>) -> Self {
        Self::start_with_period(ending_at, Duration::from_secs(1))
    }

    pub fn start_with_period(ending_at: DateTime<Utc>, period: Duration) -> Self {
        let (sender, receiver) = watch::channel(time_left(ending_at, Utc::now()));

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let current = time_left(ending_at, Utc::now());
                let ended = current.has_ended;
                if sender.send(current).is_err() {
                    debug!("{:<12} --> 구독자 없음, 카운트다운 종료", "Countdown");
                    break;
                }
                if ended {
                    debug!("{:<12} --> 종료 시각 도달", "Countdown");
                    break;
                }
            }
        });

        Self { receiver, task }
    }

    /// 최신 값
    pub fn current(&self) -> TimeLeft {
        self.receiver.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TimeLeft> {
        self.receiver.clone()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// endregion: --- Countdown
