//! 基于 `reqwest` 的判题后端实现。
//!
//! 后端通过 `user_id` Cookie 识别用户：没有 Cookie 的请求会被重定向并下发 Cookie。
//! 客户端因此启用 Cookie 存储且从不跟随重定向，重定向响应一律视为失败。

use arbuz_api_types::{
    ErrorResponse, ResultResponse, SubmitForm, SubmitResponse, TaskEntry, UpdateResponse,
};
use arbuz_core::SubmissionHandle;
use async_trait::async_trait;
use reqwest::header::{COOKIE, LOCATION};
use reqwest::{Client, Response, redirect};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{JudgeBackend, PollContext};
use crate::TrackerConfig;
use crate::error::BackendError;

/// HTTP 判题后端。
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// 根据配置创建后端客户端。
    pub fn new(config: &TrackerConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .timeout(config.request_timeout());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 访问首页以获取 `user_id` Cookie。
    ///
    /// 后端对首次访问返回重定向并设置 Cookie，这里接受 3xx 响应。
    #[tracing::instrument(skip(self))]
    pub async fn open_session(&self) -> Result<(), BackendError> {
        let response = self.client.get(self.url("/")).send().await?;
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            info!(status = status.as_u16(), "judge session opened");
            return Ok(());
        }
        Err(Self::http_error(response).await)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            return Err(BackendError::Redirect {
                status: status.as_u16(),
                location,
            });
        }
        if !status.is_success() {
            return Err(Self::http_error(response).await);
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn http_error(response: Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read response text".to_string());
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|error| error.detail)
            .unwrap_or(body);

        BackendError::Http { status, message }
    }
}

#[async_trait]
impl JudgeBackend for HttpBackend {
    #[tracing::instrument(skip(self, form), fields(task = %form.task, language = %form.language))]
    async fn submit(&self, form: &SubmitForm) -> Result<SubmitResponse, BackendError> {
        let response = self
            .client
            .post(self.url("/submit"))
            .form(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn update(&self, context: &PollContext) -> Result<UpdateResponse, BackendError> {
        debug!(handle = %context.handle, "querying submission status");
        let cookie = format!(
            "user_id={}; task={}; language={}",
            context.handle,
            context.task,
            context.language.id()
        );
        let response = self
            .client
            .get(self.url("/update"))
            .header(COOKIE, cookie)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn result(&self, handle: &SubmissionHandle) -> Result<ResultResponse, BackendError> {
        let response = self
            .client
            .get(self.url("/result"))
            .header(COOKIE, format!("user_id={handle}"))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn task_list(&self) -> Result<Vec<TaskEntry>, BackendError> {
        let response = self.client.get(self.url("/task_list")).send().await?;
        Self::read_json(response).await
    }
}
