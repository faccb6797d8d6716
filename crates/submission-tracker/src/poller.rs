//! 排队状态轮询器。
//!
//! 按固定间隔查询提交状态，直到后端返回非“排队中”的状态码。
//! 同一句柄任意时刻至多只有一个查询在途：下一次计时只在上一次查询返回后才开始等待。

use std::sync::Arc;
use std::time::Duration;

use arbuz_api_types::UpdateResponse;
use arbuz_core::{PollStatus, QueuePosition};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use crate::backend::{JudgeBackend, PollContext};
use crate::error::{BackendError, PollTransportError};

/// 轮询器状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// 正在按间隔查询。
    Polling,
    /// 已终止（到达终态或被取消），不会再发出查询。
    Stopped,
}

/// 一次后台轮询的句柄。
///
/// 句柄被丢弃时轮询随之取消。
pub struct PollHandle {
    token: CancellationToken,
    state: watch::Receiver<PollState>,
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl PollHandle {
    /// 取消轮询。可重复调用，效果与调用一次相同。
    ///
    /// 已发出的查询不会被中断，但其响应会被丢弃。
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// 返回可在其他任务中使用的取消令牌。
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// 当前轮询状态。
    pub fn state(&self) -> PollState {
        *self.state.borrow()
    }

    /// 等待后台任务结束。
    pub async fn wait(self) {
        if let Err(err) = self.task.await {
            warn!(error = %err, "status poller task ended abnormally");
        }
    }
}

/// 排队状态轮询器。
#[derive(Clone)]
pub struct StatusPoller {
    backend: Arc<dyn JudgeBackend>,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(backend: Arc<dyn JudgeBackend>, interval: Duration) -> Self {
        Self { backend, interval }
    }

    /// 在后台启动轮询。
    ///
    /// 每收到一次排队状态调用 `on_pending`；到达终态时先进入 `Stopped`，
    /// 再调用且仅调用一次 `on_terminal`。取消后两个回调都不会再被调用。
    pub fn start<P, T>(&self, context: PollContext, on_pending: P, on_terminal: T) -> PollHandle
    where
        P: FnMut(QueuePosition) + Send + 'static,
        T: FnOnce(i64) + Send + 'static,
    {
        let token = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(PollState::Polling);
        let poller = self.clone();
        let loop_token = token.clone();

        let task = tokio::spawn(async move {
            let terminal = poller
                .poll_until_terminal(&context, &loop_token, on_pending)
                .await;
            state_tx.send_replace(PollState::Stopped);

            if let Some(raw_code) = terminal {
                if !loop_token.is_cancelled() {
                    on_terminal(raw_code);
                }
            }
        });

        PollHandle {
            _guard: token.clone().drop_guard(),
            token,
            state: state_rx,
            task,
        }
    }

    /// 轮询直到终态，返回终态状态码；被取消时返回 `None`。
    ///
    /// 首次查询发生在启动一个间隔之后。查询失败只记录日志，下一次计时照常进行。
    #[tracing::instrument(skip_all, fields(handle = %context.handle))]
    pub async fn poll_until_terminal<P>(
        &self,
        context: &PollContext,
        token: &CancellationToken,
        mut on_pending: P,
    ) -> Option<i64>
    where
        P: FnMut(QueuePosition),
    {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("status polling cancelled");
                    return None;
                }
                _ = ticker.tick() => {}
            }

            let response = self.backend.update(context).await;
            if token.is_cancelled() {
                debug!("discarding status response received after cancellation");
                return None;
            }

            match decode_status(response) {
                Ok(PollStatus::Pending { queue_position }) => {
                    debug!(position = queue_position.get(), "submission still queued");
                    on_pending(queue_position);
                }
                Ok(PollStatus::Terminal { raw_code }) => {
                    info!(raw_code, "submission left the queue");
                    return Some(raw_code);
                }
                Err(err) => {
                    warn!(error = %err, "status query failed, retrying on next tick");
                }
            }
        }
    }
}

fn decode_status(
    response: Result<UpdateResponse, BackendError>,
) -> Result<PollStatus, PollTransportError> {
    let update = response?;
    Ok(PollStatus::decode(update.code, update.position)?)
}
