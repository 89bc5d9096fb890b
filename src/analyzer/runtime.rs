//! Executes analyzer commands on tokio tasks.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use super::client::CatalogApi;
use super::messages::{Command, Message};
use super::state::AnalyzerState;
use super::update::update;

/// Runs commands against a [`CatalogApi`] and reports results as messages.
///
/// Issuing a command aborts the still-running task of the same kind.
pub struct Runtime {
    api: Arc<dyn CatalogApi>,
    tx: mpsc::UnboundedSender<Message>,
    search_task: Option<AbortHandle>,
    analysis_task: Option<AbortHandle>,
}

impl Runtime {
    pub fn new(api: Arc<dyn CatalogApi>) -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runtime = Self {
            api,
            tx,
            search_task: None,
            analysis_task: None,
        };
        (runtime, rx)
    }

    /// Applies a message and runs whatever command it produced.
    pub fn dispatch(&mut self, state: &mut AnalyzerState, message: Message) {
        if let Some(command) = update(state, message) {
            self.execute(command);
        }
    }

    pub fn execute(&mut self, command: Command) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        match command {
            Command::Search { generation, query } => {
                let handle = tokio::spawn(async move {
                    let result = api.search(&query).await;
                    let _ = tx.send(Message::SearchCompleted { generation, result });
                });
                if let Some(previous) = self.search_task.replace(handle.abort_handle()) {
                    previous.abort();
                }
            }
            Command::Analyze {
                generation,
                track_id,
            } => {
                let handle = tokio::spawn(async move {
                    let result = api.audio_features(&track_id).await;
                    let _ = tx.send(Message::FeaturesLoaded { generation, result });
                });
                if let Some(previous) = self.analysis_task.replace(handle.abort_handle()) {
                    previous.abort();
                }
            }
        }
    }
}
