use log::{debug, info};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::errors::PipelineError;
use super::orchestrator::{PipelineContext, PipelineOrchestrator};

// @module: Single-slot background execution of pipeline runs

/// Outcome of a submitted run
pub struct RunTicket {
    receiver: oneshot::Receiver<Result<PathBuf, PipelineError>>,
}

impl RunTicket {
    /// Wait for the run. `None` when it was cancelled or replaced before finishing.
    pub async fn wait(self) -> Option<Result<PathBuf, PipelineError>> {
        self.receiver.await.ok()
    }
}

/// Runs at most one pipeline at a time; a new submission aborts the previous one
#[derive(Default)]
pub struct PipelineWorker {
    current: Mutex<Option<JoinHandle<()>>>,
}

impl PipelineWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run on the tokio runtime, cancelling any run still in flight
    pub fn submit(&self, orchestrator: Arc<PipelineOrchestrator>, context: PipelineContext) -> RunTicket {
        let (sender, receiver) = oneshot::channel();

        let mut current = self.current.lock();
        if let Some(previous) = current.take() {
            if !previous.is_finished() {
                info!("Replacing the pipeline run in progress");
                previous.abort();
            }
        }

        debug!("Submitting pipeline run for {}", context.input_video.display());
        *current = Some(tokio::spawn(async move {
            let result = orchestrator.run(context).await;
            let _ = sender.send(result);
        }));

        RunTicket { receiver }
    }

    /// Abort the active run, if any. Returns whether something was cancelled.
    pub fn cancel(&self) -> bool {
        match self.current.lock().take() {
            Some(handle) if !handle.is_finished() => {
                info!("Cancelling pipeline run");
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for PipelineWorker {
    fn drop(&mut self) {
        if let Some(handle) = self.current.get_mut().take() {
            handle.abort();
        }
    }
}
