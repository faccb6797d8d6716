use anyhow::Result;
use arbuz_core::{AttemptId, QueuePosition, Verdict};
use tokio::sync::broadcast;

/// 跟踪器对外广播的事件类型，与 [`crate::TrackerHooks`] 的三个回调一一对应。
#[derive(Debug, Clone)]
pub enum TrackerEvent {
    /// 排队位置更新。
    QueueUpdate {
        /// 提交尝试 ID。
        attempt_id: AttemptId,
        /// 当前排队位置。
        position: QueuePosition,
    },
    /// 不可恢复的失败，等待状态应当结束。
    CriticalFailure {
        /// 提交尝试 ID。
        attempt_id: AttemptId,
        /// 失败原因。
        cause: String,
    },
    /// 评测结果。
    Verdict {
        /// 提交尝试 ID。
        attempt_id: AttemptId,
        /// 解码后的评测结果。
        verdict: Verdict,
    },
}

impl TrackerEvent {
    pub fn attempt_id(&self) -> AttemptId {
        match self {
            TrackerEvent::QueueUpdate { attempt_id, .. }
            | TrackerEvent::CriticalFailure { attempt_id, .. }
            | TrackerEvent::Verdict { attempt_id, .. } => *attempt_id,
        }
    }

    /// 该事件之后同一次尝试不会再有事件。
    pub fn is_final(&self) -> bool {
        !matches!(self, TrackerEvent::QueueUpdate { .. })
    }
}

/// 基于 `tokio::broadcast` 的事件广播器。
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<TrackerEvent>,
}

impl EventBroadcaster {
    /// 创建事件广播器。
    ///
    /// `capacity` 表示内部广播队列容量。
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 广播一个事件。没有订阅者时事件被丢弃。
    pub fn emit(&self, event: TrackerEvent) {
        let _ = self.sender.send(event);
    }

    /// 订阅事件流。
    pub fn subscribe(&self) -> EventStream {
        EventStream {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 事件接收流包装器。
#[derive(Debug)]
pub struct EventStream {
    receiver: broadcast::Receiver<TrackerEvent>,
}

impl EventStream {
    /// 异步接收下一条事件。
    pub async fn recv(&mut self) -> Result<TrackerEvent> {
        Ok(self.receiver.recv().await?)
    }

    /// 非阻塞尝试接收一条事件。
    pub fn try_recv(&mut self) -> Result<TrackerEvent> {
        Ok(self.receiver.try_recv()?)
    }
}
