use crate::state::{
    FileNode, Panel, Record, RunState, SyncPhase, TaskId, TaskStatus,
};

/// Upper bound of the simulated upload progress.
pub const PROGRESS_MAX: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub panel: Panel,
    pub run_state: RunState,
    pub task_input: String,
    pub tasks: Vec<TaskRowView>,
    pub selected_task: Option<TaskId>,
    /// Output strings of resolved tasks, in task id order.
    pub output_log: Vec<String>,
    pub sources: Vec<SourceView>,
    pub sync_phase: SyncPhase,
    pub sync_log: Vec<String>,
    pub folder_selected: bool,
    pub file_tree: FileNode,
    pub upload: UploadView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub id: TaskId,
    pub text: String,
    pub status: TaskStatus,
    pub output: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceView {
    pub name: String,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadView {
    pub percent: u8,
    pub running: bool,
    pub complete_visible: bool,
}
