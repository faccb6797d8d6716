use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use arbuz_api_types::{ResultResponse, SubmitForm, SubmitResponse, TaskEntry, UpdateResponse};
use arbuz_core::SubmissionHandle;
use async_trait::async_trait;
use submission_tracker::{BackendError, JudgeBackend, PollContext};

/// Backend that replays scripted responses and records how it was called.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    inner: Arc<ScriptState>,
}

#[derive(Default)]
struct ScriptState {
    submit: Mutex<Option<Result<SubmitResponse, BackendError>>>,
    updates: Mutex<VecDeque<Result<UpdateResponse, BackendError>>>,
    result: Mutex<Option<Result<ResultResponse, BackendError>>>,
    tasks: Mutex<Vec<TaskEntry>>,
    update_delay: Mutex<Duration>,
    submitted: Mutex<Vec<SubmitForm>>,
    update_calls: Mutex<Vec<tokio::time::Instant>>,
    result_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

pub fn http_error(status: u16, message: &str) -> BackendError {
    BackendError::Http {
        status,
        message: message.to_string(),
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle(self, handle: &str) -> Self {
        *self.inner.submit.lock().expect("submit lock") = Some(Ok(SubmitResponse {
            user_id: handle.into(),
        }));
        self
    }

    pub fn with_numeric_handle(self, handle: i64) -> Self {
        *self.inner.submit.lock().expect("submit lock") = Some(Ok(SubmitResponse {
            user_id: handle.into(),
        }));
        self
    }

    pub fn with_submit_error(self, error: BackendError) -> Self {
        *self.inner.submit.lock().expect("submit lock") = Some(Err(error));
        self
    }

    pub fn pending(self, position: i64) -> Self {
        self.push_update(Ok(UpdateResponse::pending(position)))
    }

    pub fn terminal(self, code: i64) -> Self {
        self.push_update(Ok(UpdateResponse {
            code,
            position: None,
        }))
    }

    pub fn update_error(self, status: u16) -> Self {
        self.push_update(Err(http_error(status, "status unavailable")))
    }

    pub fn push_update(self, update: Result<UpdateResponse, BackendError>) -> Self {
        self.inner
            .updates
            .lock()
            .expect("updates lock")
            .push_back(update);
        self
    }

    pub fn with_result(self, result: ResultResponse) -> Self {
        *self.inner.result.lock().expect("result lock") = Some(Ok(result));
        self
    }

    pub fn with_result_error(self, error: BackendError) -> Self {
        *self.inner.result.lock().expect("result lock") = Some(Err(error));
        self
    }

    pub fn with_tasks(self, tasks: &[(&str, &str)]) -> Self {
        *self.inner.tasks.lock().expect("tasks lock") = tasks
            .iter()
            .map(|(id, name)| TaskEntry(id.to_string(), name.to_string()))
            .collect();
        self
    }

    pub fn with_update_delay(self, delay: Duration) -> Self {
        *self.inner.update_delay.lock().expect("delay lock") = delay;
        self
    }

    pub fn submitted_forms(&self) -> Vec<SubmitForm> {
        self.inner.submitted.lock().expect("submitted lock").clone()
    }

    pub fn update_call_times(&self) -> Vec<tokio::time::Instant> {
        self.inner.update_calls.lock().expect("calls lock").clone()
    }

    pub fn update_calls(&self) -> usize {
        self.inner.update_calls.lock().expect("calls lock").len()
    }

    pub fn result_calls(&self) -> usize {
        self.inner.result_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.inner.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JudgeBackend for ScriptedBackend {
    async fn submit(&self, form: &SubmitForm) -> Result<SubmitResponse, BackendError> {
        self.inner
            .submitted
            .lock()
            .expect("submitted lock")
            .push(form.clone());
        self.inner
            .submit
            .lock()
            .expect("submit lock")
            .take()
            .unwrap_or_else(|| Err(http_error(500, "no submit response scripted")))
    }

    async fn update(&self, _context: &PollContext) -> Result<UpdateResponse, BackendError> {
        self.inner
            .update_calls
            .lock()
            .expect("calls lock")
            .push(tokio::time::Instant::now());

        let current = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = *self.inner.update_delay.lock().expect("delay lock");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner
            .updates
            .lock()
            .expect("updates lock")
            .pop_front()
            .unwrap_or_else(|| Err(http_error(400, "no status response scripted")))
    }

    async fn result(&self, _handle: &SubmissionHandle) -> Result<ResultResponse, BackendError> {
        self.inner.result_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .result
            .lock()
            .expect("result lock")
            .take()
            .unwrap_or_else(|| Err(http_error(400, "no result response scripted")))
    }

    async fn task_list(&self) -> Result<Vec<TaskEntry>, BackendError> {
        Ok(self.inner.tasks.lock().expect("tasks lock").clone())
    }
}
