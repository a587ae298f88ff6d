//! Toast-style notifications shown to the admin.

pub mod messages {
    pub const LOAD_DRAFTS_FAILED: &str = "Không thể tải danh sách bài học";
    pub const LOAD_DETAILS_FAILED: &str = "Không thể tải chi tiết bài học";
    pub const APPROVE_SUCCESS: &str = "Duyệt bài học thành công";
    pub const APPROVE_FAILED: &str = "Duyệt bài học thất bại";
    pub const REJECT_SUCCESS: &str = "Từ chối bài học thành công";
    pub const REJECT_FAILED: &str = "Từ chối bài học thất bại";
    pub const EMPTY_REASON: &str = "Vui lòng nhập lý do từ chối";
    pub const QUIZ_NOT_IMPLEMENTED: &str = "Chức năng xem trước bài quiz chưa được hỗ trợ";
    pub const SUBMISSION_IN_FLIGHT: &str = "Đang xử lý, vui lòng chờ";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);

    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }

    fn info(&self, message: &str) {
        self.notify(Level::Info, message);
    }
}

/// Sends notices to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success | Level::Info => tracing::info!(notice = message),
            Level::Error => tracing::warn!(notice = message),
        }
    }
}

/// Prints notices for the terminal front ends and logs them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        let tag = match level {
            Level::Success => "[ok]",
            Level::Error => "[error]",
            Level::Info => "[info]",
        };
        println!("{tag} {message}");
        TracingNotifier.notify(level, message);
    }
}
