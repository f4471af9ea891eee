//! Confirmation prompt on stdin

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::domain::ports::Confirm;

/// Stdin lines shared between the command loop and prompts
pub type InputLines = Arc<Mutex<Lines<BufReader<Stdin>>>>;

pub struct PromptConfirm {
    input: InputLines,
}

impl PromptConfirm {
    pub fn new(input: InputLines) -> Self {
        Self { input }
    }
}

/// Only an explicit yes counts
pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Confirm for PromptConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let mut stdout = tokio::io::stdout();
        if let Err(e) = stdout
            .write_all(format!("{} [y/N] ", prompt).as_bytes())
            .await
        {
            tracing::warn!(error = %e, "Failed to write prompt");
        }
        let _ = stdout.flush().await;

        let answer = self.input.lock().await.next_line().await;
        match answer {
            Ok(Some(line)) => is_affirmative(&line),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}
