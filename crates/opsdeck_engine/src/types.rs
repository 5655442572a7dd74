pub type TaskId = u64;

/// Upper bound of the simulated upload progress.
pub const PROGRESS_MAX: u8 = 100;

/// Terminal outcome of one simulated task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Error,
}

/// Bookmark-like entity deduplicated by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub title: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A scheduled task reached its start offset.
    TaskStarted { task_id: TaskId },
    /// A scheduled task reached its resolve offset.
    TaskResolved {
        task_id: TaskId,
        outcome: TaskOutcome,
        output: String,
    },
    /// The last resolve offset of the run elapsed.
    RunFinished,
    /// The merge delay elapsed and the deduplicated set is ready.
    MergeCompleted {
        merged: Vec<Record>,
        total: usize,
        unique: usize,
    },
    /// The post-merge settle delay elapsed.
    SyncSettled,
    /// The upload ticker advanced.
    UploadProgress { percent: u8 },
    /// The upload ticker reached the upper bound and stopped.
    UploadCompleted,
    /// The transient complete banner expired.
    UploadBannerExpired,
}
