/// 사용자 피드백 (토스트, 로그인 이동, 확인창)
/// 화면 계층이 구현하고, 흐름 로직은 이 트레이트로만 결과를 알린다.
// region:    --- Imports
use std::sync::Mutex;
use tracing::{info, warn};

// endregion: --- Imports

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

pub trait Feedback: Send + Sync {
    fn notify(&self, toast: Toast);

    fn redirect_to_login(&self);

    /// 차단형 확인창
    fn confirm(&self, prompt: &str) -> bool;
}

// region:    --- Log Feedback
/// 화면 없이 실행할 때 사용 (확인창은 항상 거절)
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => warn!("{:<12} --> {}", "Toast", toast.message),
            _ => info!("{:<12} --> {}", "Toast", toast.message),
        }
    }

    fn redirect_to_login(&self) {
        info!("{:<12} --> 로그인 페이지로 이동", "Toast");
    }

    fn confirm(&self, prompt: &str) -> bool {
        warn!("{:<12} --> 확인창 자동 거절: {}", "Toast", prompt);
        false
    }
}

// endregion: --- Log Feedback

// region:    --- Recording Feedback
/// 발생한 피드백을 기록 (헤드리스 화면, 테스트용)
pub struct RecordingFeedback {
    toasts: Mutex<Vec<Toast>>,
    login_redirects: Mutex<usize>,
    confirm_answer: bool,
}

impl RecordingFeedback {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            toasts: Mutex::new(Vec::new()),
            login_redirects: Mutex::new(0),
            confirm_answer,
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts().pop()
    }

    pub fn login_redirects(&self) -> usize {
        self.login_redirects.lock().map(|n| *n).unwrap_or(0)
    }
}

impl Feedback for RecordingFeedback {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }

    fn redirect_to_login(&self) {
        if let Ok(mut n) = self.login_redirects.lock() {
            *n += 1;
        }
    }

    fn confirm(&self, _prompt: &str) -> bool {
        self.confirm_answer
    }
}

// endregion: --- Recording Feedback
