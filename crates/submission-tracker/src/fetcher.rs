//! 评测结果获取与解码。

use std::sync::Arc;

use arbuz_api_types::ResultResponse;
use arbuz_core::{SubmissionHandle, TestCaseResult, Timing, Verdict, VerdictCode};
use tracing::{info, warn};

use crate::backend::JudgeBackend;
use crate::error::FetchError;

/// 结果获取器。在轮询到达终态后对同一句柄调用一次。
#[derive(Clone)]
pub struct ResultFetcher {
    backend: Arc<dyn JudgeBackend>,
}

impl ResultFetcher {
    pub fn new(backend: Arc<dyn JudgeBackend>) -> Self {
        Self { backend }
    }

    /// 获取并解码最终结果，失败不重试。
    #[tracing::instrument(skip(self), fields(handle = %handle))]
    pub async fn fetch(&self, handle: &SubmissionHandle) -> Result<Verdict, FetchError> {
        let response = self
            .backend
            .result(handle)
            .await
            .inspect_err(|err| warn!(error = %err, "result request failed"))?;

        let verdict = decode_verdict(response)?;
        info!(verdict = verdict.label(), "verdict received");
        Ok(verdict)
    }
}

/// 将结果负载解码为 [`Verdict`]，所有文本字段在此处转义。
pub fn decode_verdict(response: ResultResponse) -> Result<Verdict, FetchError> {
    let code = VerdictCode::try_from(response.code)
        .map_err(|_| FetchError::UnknownVerdict(response.code))?;

    match code {
        VerdictCode::CriticalError => Ok(Verdict::critical_error(response.error.as_deref())),
        VerdictCode::Success => Ok(Verdict::Success {
            timing: timing(&response)?,
        }),
        VerdictCode::TimeLimitExceeded => {
            let timing = timing(&response)?;
            // Interactive tasks may time out without any start data to show.
            let timed_out_test = response
                .input
                .as_deref()
                .and_then(<[String]>::first)
                .filter(|_| timing.test_count == 1)
                .map(|input| TestCaseResult::timed_out(input));
            Ok(Verdict::TimeLimitExceeded {
                timing,
                timed_out_test,
            })
        }
        VerdictCode::WrongAnswer => {
            let timing = timing(&response)?;
            let failed_tests = failed_tests(&response)?;
            Ok(Verdict::WrongAnswer {
                timing,
                failed_tests,
            })
        }
    }
}

fn timing(response: &ResultResponse) -> Result<Timing, FetchError> {
    let elapsed_seconds = response
        .time
        .ok_or_else(|| malformed("missing `time`"))?;
    let tests = response
        .tests
        .ok_or_else(|| malformed("missing `tests`"))?;
    let test_count =
        u32::try_from(tests).map_err(|_| malformed(format!("invalid test count {tests}")))?;

    Ok(Timing::new(elapsed_seconds, test_count))
}

fn failed_tests(response: &ResultResponse) -> Result<Vec<TestCaseResult>, FetchError> {
    let (Some(input), Some(output), Some(expected)) = (
        response.input.as_deref(),
        response.output.as_deref(),
        response.expected.as_deref(),
    ) else {
        return Err(malformed("wrong answer without failing test data"));
    };

    if input.len() != output.len() || input.len() != expected.len() {
        return Err(malformed(format!(
            "failing test arrays differ in length (input {}, output {}, expected {})",
            input.len(),
            output.len(),
            expected.len()
        )));
    }

    let interactive = response.interactive.unwrap_or(false);
    Ok(input
        .iter()
        .zip(expected)
        .zip(output)
        .map(|((input, expected), output)| {
            TestCaseResult::new(input, expected, output, interactive)
        })
        .collect())
}

fn malformed(reason: impl Into<String>) -> FetchError {
    FetchError::Malformed(reason.into())
}
