use crate::state::{FileNode, Panel, Record, Source, TaskId, TaskOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Seed fixture data (initial tasks, sources, mock tree) at startup.
    FixturesLoaded {
        tasks: Vec<String>,
        sources: Vec<Source>,
        tree: FileNode,
    },
    /// User switched the visible feature panel.
    PanelSelected(Panel),
    /// User edited the new-task input box.
    InputChanged(String),
    /// User submitted the current input as a new task.
    TaskSubmitted,
    /// User asked for a simulated run over all non-successful tasks.
    RunAllClicked,
    /// User reset every task back to pending.
    ResetClicked,
    /// User deleted a task from the list.
    TaskRemoved { task_id: TaskId },
    SelectNextTask,
    SelectPrevTask,
    /// Scheduler: a task entered the running state.
    TaskStarted { task_id: TaskId },
    /// Scheduler: a task resolved with a synthetic output string.
    TaskResolved {
        task_id: TaskId,
        outcome: TaskOutcome,
        output: String,
    },
    /// Scheduler: the last resolution of the run has fired.
    RunFinished,
    /// User triggered a simulated bookmark sync.
    SyncClicked,
    /// Engine: merge finished with the deduplicated set and counts.
    MergeCompleted {
        merged: Vec<Record>,
        total: usize,
        unique: usize,
    },
    /// Engine: the post-merge settle delay elapsed.
    SyncSettled,
    /// User picked the (simulated) local folder to upload.
    SelectFolderClicked,
    /// User started a simulated upload.
    UploadClicked,
    /// Ticker: bounded progress advanced.
    UploadProgress { percent: u8 },
    /// Ticker: progress reached the upper bound.
    UploadCompleted,
    /// Ticker: the transient complete banner expired.
    UploadBannerExpired,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
