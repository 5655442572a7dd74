//! Opsdeck core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, FileNode, Panel, ProgressState, Record, RunState, Source, SyncPhase, Task, TaskId,
    TaskOutcome, TaskStatus,
};
pub use update::update;
pub use view_model::{AppViewModel, SourceView, TaskRowView, UploadView, PROGRESS_MAX};
