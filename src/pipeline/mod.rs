/*!
 * Pipeline orchestration.
 *
 * - `state`: run states and progress milestones
 * - `progress`: progress/error sinks
 * - `orchestrator`: executes one run
 * - `worker`: keeps at most one run active
 */

pub mod orchestrator;
pub mod progress;
pub mod state;
pub mod worker;

pub use self::orchestrator::{Collaborators, PipelineContext, PipelineOrchestrator};
pub use self::progress::{ChannelProgressSink, ErrorSink, LogSink, PipelineEvent, ProgressSink};
pub use self::state::{Milestone, PipelineState};
pub use self::worker::{PipelineWorker, RunTicket};
