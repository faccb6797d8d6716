//! Plain-text rendering of queue notices and verdicts.

use std::fmt::Write;

use arbuz_core::{QueueNotice, TaskCatalog, Verdict};

pub fn queue_notice(notice: QueueNotice) -> String {
    match notice {
        QueueNotice::NextInLine => {
            "Watermelons will stay with you while we process your code...".to_string()
        }
        QueueNotice::Ranked { position, suffix } => {
            format!("Your position in the queue: {position}{suffix}")
        }
    }
}

pub fn verdict(verdict: &Verdict) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", verdict.label());

    if let Verdict::CriticalError {
        message: Some(message),
    } = verdict
    {
        let _ = writeln!(out, "{message}");
    }

    if let Some(timing) = verdict.timing() {
        let _ = writeln!(out, "Time: {}s", timing.rounded_seconds());
        match verdict {
            Verdict::WrongAnswer { failed_tests, .. } => {
                let _ = writeln!(
                    out,
                    "Tests: {}  Successful: {}  Failed: {}",
                    timing.test_count,
                    verdict.successful_count().unwrap_or_default(),
                    failed_tests.len()
                );
            }
            _ => {
                let _ = writeln!(out, "Tests: {}", timing.test_count);
            }
        }
    }

    let tests = verdict.test_cases();
    if tests.is_empty() {
        let _ = writeln!(out, "No tests to show.");
        return out;
    }

    for test in tests {
        let [input, expected, actual] = test.column_headers();
        let _ = writeln!(out);
        let _ = writeln!(out, "{input}:\n{}", test.input());
        if let Verdict::WrongAnswer { .. } = verdict {
            let _ = writeln!(out, "{expected}:\n{}", test.expected_output());
            let _ = writeln!(out, "{actual}:\n{}", test.actual_output());
        }
    }
    out
}

pub fn task_catalog(catalog: &TaskCatalog) -> String {
    if catalog.is_empty() {
        return "No tasks available.\n".to_string();
    }

    let width = catalog
        .tasks()
        .iter()
        .map(|task| task.id.len())
        .max()
        .unwrap_or_default();
    catalog.tasks().iter().fold(String::new(), |mut out, task| {
        let _ = writeln!(out, "{:<width$}  {}", task.id, task.display_name);
        out
    })
}

#[cfg(test)]
mod tests {
    use arbuz_core::{TestCaseResult, Timing};

    use super::*;

    #[test]
    fn test_queue_notices() {
        assert_eq!(
            queue_notice(QueueNotice::NextInLine),
            "Watermelons will stay with you while we process your code..."
        );
        assert_eq!(
            queue_notice(QueueNotice::Ranked {
                position: 12,
                suffix: "th"
            }),
            "Your position in the queue: 12th"
        );
    }

    #[test]
    fn test_success_shows_rounded_time() {
        let text = verdict(&Verdict::Success {
            timing: Timing::new(1.23456, 10),
        });

        assert_eq!(text, "Arbuz\nTime: 1.23s\nTests: 10\nNo tests to show.\n");
    }

    #[test]
    fn test_wrong_answer_lists_failures() {
        let text = verdict(&Verdict::WrongAnswer {
            timing: Timing::new(0.5, 5),
            failed_tests: vec![TestCaseResult::new("1 2", "3", "4", true)],
        });

        assert!(text.starts_with("Wrong Answer\nTime: 0.5s\n"));
        assert!(text.contains("Tests: 5  Successful: 4  Failed: 1\n"));
        assert!(text.contains("Start data:\n1 2\n"));
        assert!(text.contains("Correct interaction:\n3\n"));
        assert!(text.contains("Your interaction:\n4\n"));
    }

    #[test]
    fn test_time_limit_shows_only_input() {
        let text = verdict(&Verdict::TimeLimitExceeded {
            timing: Timing::new(2.0, 1),
            timed_out_test: Some(TestCaseResult::timed_out("999")),
        });

        assert!(text.contains("Tests: 1\n"));
        assert!(text.contains("Input:\n999\n"));
        assert!(!text.contains("Correct output"));
    }

    #[test]
    fn test_critical_error_message() {
        let text = verdict(&Verdict::critical_error(Some("compilation failed")));

        assert_eq!(text, "Critical Error\ncompilation failed\nNo tests to show.\n");
    }

    #[test]
    fn test_task_catalog_is_aligned() {
        let catalog: TaskCatalog = [
            ("a".to_string(), "First".to_string()),
            ("week3A".to_string(), "Week 3 A".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(task_catalog(&catalog), "a       First\nweek3A  Week 3 A\n");
    }
}
