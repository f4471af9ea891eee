//! Newsfeed client
//!
//! Interactive terminal driver for the newsfeed backend. Commands are read
//! from stdin, the page is kept as an HTML snapshot on disk and refreshed in
//! the background. Uses hexagonal (ports & adapters) architecture for clean
//! separation of concerns.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;

#[cfg(test)]
mod test_utils;

use adapters::{HtmlSnapshotView, HttpFeedApi, InputLines, PromptConfirm};
use app::{help_text, parse_action, FeedAction, FeedService, Outcome, PollHandle};
use config::Config;
use feed::render_summary;

type Service = FeedService<HttpFeedApi, HtmlSnapshotView, PromptConfirm>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,newsfeed_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting newsfeed client...");

    let config = Config::from_env();
    tracing::info!(
        output = %config.output_path,
        poll_secs = config.poll_interval.as_secs(),
        "Configuration loaded"
    );

    let api = HttpFeedApi::new(
        &config.api_url,
        config.session_cookie.as_deref(),
        config.http_timeout,
    )
    .context("Failed to build HTTP client")?;
    tracing::info!(base_url = api.base_url(), "Backend client ready");

    let input: InputLines = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));
    let view = Arc::new(HtmlSnapshotView::new(&config.output_path));
    let confirm = Arc::new(PromptConfirm::new(input.clone()));

    let service: Arc<Service> = Arc::new(FeedService::new(
        Arc::new(api),
        view.clone(),
        confirm,
        config.notification_lifetime,
    ));

    service.init().await;
    print_summary(&service);
    println!("Type `help` for the list of commands.");

    let poller = {
        let service = service.clone();
        PollHandle::spawn(config.poll_interval, move || {
            let service = service.clone();
            async move {
                service.refresh().await;
            }
        })
    };

    loop {
        // Released before dispatch so the delete prompt can read its answer
        let line = {
            let mut lines = input.lock().await;
            lines.next_line().await
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stdin");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "quit" | "exit" | "q") {
            break;
        }

        match parse_action(trimmed) {
            Ok(FeedAction::Help) => println!("{}", help_text()),
            Ok(action) => {
                let outcome = service.dispatch(action).await;
                if !matches!(outcome, Outcome::Ignored | Outcome::Cancelled) {
                    print_summary(&service);
                }
            }
            Err(e) => println!("{}. Type `help` for the list of commands.", e),
        }
    }

    poller.stop().await;
    view.flush().await;
    tracing::info!("Newsfeed client stopped");

    Ok(())
}

fn print_summary(service: &Service) {
    let state = service.state();
    println!("{}", render_summary(&state.posts(), &state.session()));
}
