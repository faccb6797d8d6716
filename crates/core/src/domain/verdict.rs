use super::{DomainError, escape_markup};

/// Verdict codes of the result endpoint.
///
/// Unrelated to the status codes of the queue endpoint even where the numbers
/// coincide (`1` is a wrong answer here and "pending" there).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictCode {
    CriticalError,
    Success,
    WrongAnswer,
    TimeLimitExceeded,
}

impl VerdictCode {
    pub fn code(self) -> i64 {
        match self {
            VerdictCode::CriticalError => -1,
            VerdictCode::Success => 0,
            VerdictCode::WrongAnswer => 1,
            VerdictCode::TimeLimitExceeded => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VerdictCode::CriticalError => "Critical Error",
            VerdictCode::Success => "Arbuz",
            VerdictCode::WrongAnswer => "Wrong Answer",
            VerdictCode::TimeLimitExceeded => "Time Limit Exceeded",
        }
    }

    /// Kebab-case class name derived from the label, e.g. `wrong-answer`.
    pub fn css_class(self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }
}

impl TryFrom<i64> for VerdictCode {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(VerdictCode::CriticalError),
            0 => Ok(VerdictCode::Success),
            1 => Ok(VerdictCode::WrongAnswer),
            2 => Ok(VerdictCode::TimeLimitExceeded),
            other => Err(DomainError::UnknownVerdict(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub elapsed_seconds: f64,
    pub test_count: u32,
}

impl Timing {
    pub fn new(elapsed_seconds: f64, test_count: u32) -> Self {
        Self {
            elapsed_seconds,
            test_count,
        }
    }

    /// Elapsed time rounded to hundredths for display.
    pub fn rounded_seconds(&self) -> f64 {
        (self.elapsed_seconds * 100.0).round() / 100.0
    }
}

/// One test shown to the user. All text is markup-escaped on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseResult {
    input: String,
    expected_output: String,
    actual_output: String,
    interactive: bool,
}

impl TestCaseResult {
    pub fn new(input: &str, expected_output: &str, actual_output: &str, interactive: bool) -> Self {
        Self {
            input: escape_markup(input),
            expected_output: escape_markup(expected_output),
            actual_output: escape_markup(actual_output),
            interactive,
        }
    }

    /// A test that ran out of time; only its input is known.
    pub fn timed_out(input: &str) -> Self {
        Self::new(input, "", "", false)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    pub fn actual_output(&self) -> &str {
        &self.actual_output
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Titles of the input, expected and actual columns.
    pub fn column_headers(&self) -> [&'static str; 3] {
        if self.interactive {
            ["Start data", "Correct interaction", "Your interaction"]
        } else {
            ["Input", "Correct output", "Your output"]
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The judge could not run the program. Carries no timing.
    CriticalError { message: Option<String> },
    TimeLimitExceeded {
        timing: Timing,
        /// Present only when the submission was judged on a single test.
        timed_out_test: Option<TestCaseResult>,
    },
    WrongAnswer {
        timing: Timing,
        failed_tests: Vec<TestCaseResult>,
    },
    Success { timing: Timing },
}

impl Verdict {
    pub fn critical_error(message: Option<&str>) -> Self {
        Verdict::CriticalError {
            message: message.map(escape_markup),
        }
    }

    pub fn code(&self) -> VerdictCode {
        match self {
            Verdict::CriticalError { .. } => VerdictCode::CriticalError,
            Verdict::TimeLimitExceeded { .. } => VerdictCode::TimeLimitExceeded,
            Verdict::WrongAnswer { .. } => VerdictCode::WrongAnswer,
            Verdict::Success { .. } => VerdictCode::Success,
        }
    }

    pub fn label(&self) -> &'static str {
        self.code().label()
    }

    pub fn timing(&self) -> Option<&Timing> {
        match self {
            Verdict::CriticalError { .. } => None,
            Verdict::TimeLimitExceeded { timing, .. }
            | Verdict::WrongAnswer { timing, .. }
            | Verdict::Success { timing } => Some(timing),
        }
    }

    pub fn test_cases(&self) -> &[TestCaseResult] {
        match self {
            Verdict::TimeLimitExceeded {
                timed_out_test: Some(test),
                ..
            } => std::slice::from_ref(test),
            Verdict::WrongAnswer { failed_tests, .. } => failed_tests,
            _ => &[],
        }
    }

    /// Number of passed tests, derived from the total and the failures.
    pub fn successful_count(&self) -> Option<u32> {
        match self {
            Verdict::WrongAnswer {
                timing,
                failed_tests,
            } => {
                let failed = u32::try_from(failed_tests.len()).unwrap_or(u32::MAX);
                Some(timing.test_count.saturating_sub(failed))
            }
            Verdict::Success { timing } => Some(timing.test_count),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_verdicts() {
        let cases = [
            (-1, VerdictCode::CriticalError),
            (0, VerdictCode::Success),
            (1, VerdictCode::WrongAnswer),
            (2, VerdictCode::TimeLimitExceeded),
        ];

        for (raw, expected) in cases {
            let code = VerdictCode::try_from(raw).expect("code should be known");
            assert_eq!(code, expected);
            assert_eq!(code.code(), raw);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        for raw in [3, -2, 42] {
            let err = VerdictCode::try_from(raw).expect_err("code should be unknown");
            assert_eq!(err, DomainError::UnknownVerdict(raw));
        }
    }

    #[test]
    fn labels_and_classes() {
        assert_eq!(VerdictCode::Success.label(), "Arbuz");
        assert_eq!(VerdictCode::TimeLimitExceeded.css_class(), "time-limit-exceeded");
        assert_eq!(VerdictCode::CriticalError.css_class(), "critical-error");
    }

    #[test]
    fn test_case_text_is_escaped() {
        let test = TestCaseResult::new("<script>", "a>b", "<", true);

        assert_eq!(test.input(), "&lt;script&gt;");
        assert_eq!(test.expected_output(), "a&gt;b");
        assert_eq!(test.actual_output(), "&lt;");
        assert!(test.is_interactive());
        assert_eq!(
            test.column_headers(),
            ["Start data", "Correct interaction", "Your interaction"]
        );
        assert_eq!(
            TestCaseResult::new("1", "2", "3", false).column_headers(),
            ["Input", "Correct output", "Your output"]
        );
    }

    #[test]
    fn wrong_answer_derives_successful_count() {
        let verdict = Verdict::WrongAnswer {
            timing: Timing::new(0.5, 5),
            failed_tests: vec![
                TestCaseResult::new("a", "a", "x", false),
                TestCaseResult::new("b", "b", "y", false),
            ],
        };

        assert_eq!(verdict.successful_count(), Some(3));
        assert_eq!(verdict.test_cases().len(), 2);
        assert_eq!(verdict.code(), VerdictCode::WrongAnswer);
    }

    #[test]
    fn critical_error_has_no_timing_or_tests() {
        let verdict = Verdict::critical_error(Some("<compile error>"));

        assert!(verdict.timing().is_none());
        assert!(verdict.test_cases().is_empty());
        assert_eq!(verdict.successful_count(), None);
        assert_eq!(
            verdict,
            Verdict::CriticalError {
                message: Some("&lt;compile error&gt;".to_string())
            }
        );
    }

    #[test]
    fn time_limit_exposes_single_test() {
        let verdict = Verdict::TimeLimitExceeded {
            timing: Timing::new(2.0, 1),
            timed_out_test: Some(TestCaseResult::timed_out("1000000")),
        };

        assert_eq!(verdict.test_cases().len(), 1);
        assert_eq!(verdict.test_cases()[0].expected_output(), "");
    }

    #[test]
    fn timing_rounds_to_hundredths() {
        assert_eq!(Timing::new(1.23456, 3).rounded_seconds(), 1.23);
        assert_eq!(Timing::new(2.999, 3).rounded_seconds(), 3.0);
    }
}
