//! 判题后端传输层。
//!
//! `JudgeBackend` 屏蔽了与判题 Web 后端通信的 HTTP 细节，
//! 提交、轮询与取结果三个组件都只依赖该 trait，测试中可替换为脚本化实现。

use arbuz_api_types::{ResultResponse, SubmitForm, SubmitResponse, TaskEntry, UpdateResponse};
use arbuz_core::{Language, SubmissionHandle, TaskId};
use async_trait::async_trait;

use crate::error::BackendError;

pub mod http;

pub use http::HttpBackend;

/// 一次状态查询携带的上下文。
///
/// `task` 与 `language` 仅用于后端展示，真正定位提交的是 `handle`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollContext {
    /// 后端分配的提交句柄。
    pub handle: SubmissionHandle,
    /// 当前选择的题目。
    pub task: TaskId,
    /// 当前选择的语言。
    pub language: Language,
}

/// 判题后端接口。
///
/// 每个方法对应一次网络请求，不做重试；重试与容错策略由调用方决定。
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// 以表单形式提交代码（`POST /submit`）。
    async fn submit(&self, form: &SubmitForm) -> Result<SubmitResponse, BackendError>;

    /// 查询排队状态（`GET /update`）。
    async fn update(&self, context: &PollContext) -> Result<UpdateResponse, BackendError>;

    /// 获取最终评测结果（`GET /result`）。
    async fn result(&self, handle: &SubmissionHandle) -> Result<ResultResponse, BackendError>;

    /// 获取题目列表（`GET /task_list`）。
    async fn task_list(&self) -> Result<Vec<TaskEntry>, BackendError>;
}
