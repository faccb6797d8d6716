//! 提交客户端：把一次提交发送到判题后端并换取提交句柄。

use std::sync::Arc;

use arbuz_api_types::SubmitForm;
use arbuz_core::{Submission, SubmissionHandle, TaskCatalog};
use tracing::{info, warn};

use crate::backend::JudgeBackend;
use crate::error::{BackendError, SubmissionError};

/// 提交客户端。
#[derive(Clone)]
pub struct SubmissionClient {
    backend: Arc<dyn JudgeBackend>,
}

impl SubmissionClient {
    pub fn new(backend: Arc<dyn JudgeBackend>) -> Self {
        Self { backend }
    }

    /// 发送提交，成功时返回后端分配的句柄。
    ///
    /// 失败不会重试；重定向响应同样视为失败。
    #[tracing::instrument(skip(self, submission), fields(task = %submission.task(), language = %submission.language()))]
    pub async fn submit(
        &self,
        submission: Submission,
    ) -> Result<SubmissionHandle, SubmissionError> {
        let form = SubmitForm {
            task: submission.task().to_string(),
            language: submission.language().id().to_string(),
            program_contents: submission.into_source_text(),
        };

        let response = self
            .backend
            .submit(&form)
            .await
            .inspect_err(|err| warn!(error = %err, "submission failed"))?;

        let handle = SubmissionHandle::new(response.user_id.to_string())
            .map_err(|_| SubmissionError::MissingHandle)?;
        info!(handle = %handle, "submission accepted");
        Ok(handle)
    }

    /// 获取题目列表，按后端给出的顺序原样返回。
    pub async fn task_catalog(&self) -> Result<TaskCatalog, BackendError> {
        let tasks = self.backend.task_list().await?;
        Ok(tasks
            .into_iter()
            .map(|entry| (entry.0, entry.1))
            .collect())
    }
}
