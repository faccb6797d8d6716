mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use arbuz_core::Submission;
use clap::{Parser, Subcommand};
use submission_tracker::{SubmissionTracker, TrackOutcome, TrackerConfig, TrackerEvent};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "arbuz", version, about = "Submit programs to the Arbuz judge")]
struct Opt {
    /// Tracker config file. Ignored when missing and `--base-url` is given.
    #[arg(long, short, env = "ARBUZ_CONFIG", default_value = "arbuz.toml")]
    config: PathBuf,

    /// Overrides `base_url` from the config file.
    #[arg(long, env = "ARBUZ_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the tasks offered by the judge
    Tasks,
    /// Submit a program and wait for its verdict
    Submit {
        #[arg(long, short)]
        task: String,
        #[arg(long, short, default_value = "cpp17")]
        language: String,
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let opt = Opt::parse();

    let config = load_config(&opt.config, opt.base_url.clone())?;
    info!(base_url = %config.base_url, "connecting to judge");
    let tracker = SubmissionTracker::connect(config)
        .await
        .context("failed to connect to judge")?;

    match opt.command {
        Command::Tasks => {
            let catalog = tracker
                .task_catalog()
                .await
                .context("failed to load task list")?;
            print!("{}", render::task_catalog(&catalog));
            Ok(())
        }
        Command::Submit {
            task,
            language,
            file,
        } => submit(&tracker, &task, &language, &file).await,
    }
}

fn load_config(path: &Path, base_url: Option<String>) -> anyhow::Result<TrackerConfig> {
    let mut config = match (path.exists(), base_url.as_deref()) {
        (true, _) => TrackerConfig::from_file(path)?,
        (false, Some(base_url)) => TrackerConfig::new(base_url),
        (false, None) => anyhow::bail!(
            "config file {} not found and no --base-url given",
            path.display()
        ),
    };
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    config.validate()?;
    Ok(config)
}

async fn submit(
    tracker: &SubmissionTracker,
    task: &str,
    language: &str,
    file: &Path,
) -> anyhow::Result<()> {
    let source = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read program: {}", file.display()))?;
    let submission = Submission::from_form(language, task, source)?;

    let cancel = CancellationToken::new();
    let mut events = tracker.subscribe_events();
    let tracking = tracker.track_broadcast(submission, &cancel);
    tokio::pin!(tracking);

    info!("waiting for verdict, press Ctrl+C to stop");
    let result = loop {
        tokio::select! {
            result = &mut tracking => break result,
            _ = tokio::signal::ctrl_c(), if !cancel.is_cancelled() => {
                info!("interrupt received, stopping status polling");
                cancel.cancel();
            }
            event = events.recv() => match event {
                Ok(event) => print_event(&event),
                Err(err) => warn!(error = %err, "failed to receive tracker event"),
            }
        }
    };

    while let Ok(event) = events.try_recv() {
        print_event(&event);
    }

    let report = result?;
    match report.outcome {
        TrackOutcome::Judged(_) => info!(
            handle = %report.handle,
            waited_ms = report.waited().num_milliseconds(),
            "submission judged"
        ),
        TrackOutcome::Cancelled => info!(handle = %report.handle, "tracking cancelled"),
    }
    Ok(())
}

fn print_event(event: &TrackerEvent) {
    match event {
        TrackerEvent::QueueUpdate { position, .. } => {
            println!("{}", render::queue_notice(position.notice()));
        }
        TrackerEvent::CriticalFailure { cause, .. } => {
            eprintln!("Critical Error\n{cause}");
        }
        TrackerEvent::Verdict { verdict, .. } => {
            print!("{}", render::verdict(verdict));
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
