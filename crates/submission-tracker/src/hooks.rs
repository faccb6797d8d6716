//! 跟踪器回调。
//!
//! 跟踪器只通过这三个回调与界面层交互，所有展示逻辑都由实现方负责。

use std::sync::Arc;

use arbuz_core::{AttemptId, QueuePosition, Verdict};

use crate::error::TrackerError;
use crate::events::{EventBroadcaster, TrackerEvent};

pub trait TrackerHooks: Send + Sync {
    /// 排队位置更新，可能被调用零次或多次。
    fn on_queue_update(&self, position: QueuePosition);

    /// 不可恢复的失败。调用后不会再有其他回调。
    fn on_critical_failure(&self, cause: &TrackerError);

    /// 评测结果。调用后不会再有其他回调。
    fn on_verdict(&self, verdict: &Verdict);
}

/// 将回调转发到事件总线。
#[derive(Debug, Clone)]
pub struct BroadcastHooks {
    attempt_id: AttemptId,
    broadcaster: Arc<EventBroadcaster>,
}

impl BroadcastHooks {
    pub fn new(attempt_id: AttemptId, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            attempt_id,
            broadcaster,
        }
    }
}

impl TrackerHooks for BroadcastHooks {
    fn on_queue_update(&self, position: QueuePosition) {
        self.broadcaster.emit(TrackerEvent::QueueUpdate {
            attempt_id: self.attempt_id,
            position,
        });
    }

    fn on_critical_failure(&self, cause: &TrackerError) {
        self.broadcaster.emit(TrackerEvent::CriticalFailure {
            attempt_id: self.attempt_id,
            cause: cause.to_string(),
        });
    }

    fn on_verdict(&self, verdict: &Verdict) {
        self.broadcaster.emit(TrackerEvent::Verdict {
            attempt_id: self.attempt_id,
            verdict: verdict.clone(),
        });
    }
}
