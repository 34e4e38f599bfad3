use log::{error, info};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

use super::state::PipelineState;

// @module: Progress and error reporting for pipeline runs

/// Receives progress updates. Implementations must not block.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: f64, message: &str);

    /// Called on every state change; ignored by default
    fn state_changed(&self, _state: PipelineState) {}
}

/// Receives the user-facing description of a failed run
pub trait ErrorSink: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Sink that writes everything to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report(&self, progress: f64, message: &str) {
        info!("[{:>3.0}%] {}", progress * 100.0, message);
    }

    fn state_changed(&self, state: PipelineState) {
        info!("{}", state.status());
    }
}

impl ErrorSink for LogSink {
    fn report_error(&self, message: &str) {
        error!("{}", message);
    }
}

/// Event delivered through a [`ChannelProgressSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Progress { value: f64, message: String },
    StateChanged(PipelineState),
    Failed(String),
    Finished(PathBuf),
}

/// Forwards reports to an unbounded channel so a separate task can render them
#[derive(Debug, Clone)]
pub struct ChannelProgressSink {
    sender: UnboundedSender<PipelineEvent>,
}

impl ChannelProgressSink {
    pub fn new(sender: UnboundedSender<PipelineEvent>) -> Self {
        Self { sender }
    }

    /// Announce the output of a successful run
    pub fn finished(&self, output: PathBuf) {
        let _ = self.sender.send(PipelineEvent::Finished(output));
    }

    // A closed receiver only means nobody is watching anymore
    fn send(&self, event: PipelineEvent) {
        let _ = self.sender.send(event);
    }
}

impl ProgressSink for ChannelProgressSink {
    fn report(&self, progress: f64, message: &str) {
        self.send(PipelineEvent::Progress {
            value: progress,
            message: message.to_string(),
        });
    }

    fn state_changed(&self, state: PipelineState) {
        self.send(PipelineEvent::StateChanged(state));
    }
}

impl ErrorSink for ChannelProgressSink {
    fn report_error(&self, message: &str) {
        self.send(PipelineEvent::Failed(message.to_string()));
    }
}
