use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use antiflow::cli::{Cli, Command};
use antiflow::client::GenerationClient;
use antiflow::logging::{init_tracing, LogMode};
use antiflow::model::{GenerationRequest, TaskHandle};
use antiflow::session::GenerationSession;
use antiflow::ui::plain::TransitionReporter;
use antiflow::ui::result::ResultState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Command::Tui));
    init_tracing(if interactive {
        LogMode::Interactive
    } else {
        LogMode::Plain
    });

    let config = cli.resolve_config().context("Failed to load configuration")?;
    let client = GenerationClient::new(&config.service).context("Failed to create client")?;
    let mut session = GenerationSession::new(Arc::new(client), config.polling.interval());

    tracing::info!(
        base_url = %config.service.base_url,
        interval_ms = config.polling.interval_ms,
        "Starting"
    );

    match cli.command {
        None | Some(Command::Tui) => {
            antiflow::ui::runtime::run(&mut session, &config.defaults, &config.service.base_url)
                .await
                .context("Terminal UI failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Generate {
            topic,
            duration,
            mood,
        }) => {
            let request = GenerationRequest::new(
                topic,
                duration.unwrap_or(config.defaults.duration),
                mood.unwrap_or(config.defaults.mood),
            )?;
            let mut reporter = TransitionReporter::new(io::stdout());
            // A rejected submission is reported through the Failed state.
            let _ = session.submit(&request).await;
            finish(&mut session, &mut reporter).await
        }
        Some(Command::Watch { task_id }) => {
            let mut reporter = TransitionReporter::new(io::stdout());
            session.track(TaskHandle::new(task_id));
            finish(&mut session, &mut reporter).await
        }
    }
}

async fn finish(
    session: &mut GenerationSession<GenerationClient>,
    reporter: &mut TransitionReporter<io::Stdout>,
) -> anyhow::Result<ExitCode> {
    reporter.report(session.state())?;
    let state = session
        .run_to_completion(|state| {
            if let Err(err) = reporter.report(state) {
                tracing::warn!(error = %err, "Failed to write progress");
            }
        })
        .await;

    Ok(match state {
        ResultState::Completed { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
