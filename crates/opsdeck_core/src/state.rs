use std::collections::BTreeMap;

use crate::view_model::{AppViewModel, SourceView, TaskRowView, UploadView};

pub type TaskId = u64;

/// Lifecycle of a simulated task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Success,
    Error,
}

/// Terminal outcome reported by the scheduler for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub status: TaskStatus,
    pub output: Option<String>,
}

/// Bookmark-like entity identified by a unique key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub title: String,
    pub location: String,
}

/// A named bookmark source (browser profile, local store, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub records: Vec<Record>,
}

/// Read-only mock directory tree shown by the upload panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNode {
    File { name: String },
    Folder { name: String, children: Vec<FileNode> },
}

impl Default for FileNode {
    fn default() -> Self {
        FileNode::Folder {
            name: String::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Commands,
    Upload,
    Bookmarks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Merging,
    Settling,
}

/// Bounded upload progress. `percent` never decreases while `running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    pub percent: u8,
    pub running: bool,
    pub complete_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    panel: Panel,
    // Command runner
    tasks: BTreeMap<TaskId, Task>,
    next_task_id: TaskId,
    task_input: String,
    run_state: RunState,
    selected_task: Option<TaskId>,
    // Bookmark sync
    sources: Vec<Source>,
    sync_phase: SyncPhase,
    sync_log: Vec<String>,
    // Upload
    folder_selected: bool,
    file_tree: FileNode,
    upload: ProgressState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let tasks: Vec<TaskRowView> = self
            .tasks
            .values()
            .map(|task| TaskRowView {
                id: task.id,
                text: task.text.clone(),
                status: task.status,
                output: task.output.clone(),
                selected: self.selected_task == Some(task.id),
            })
            .collect();

        let output_log: Vec<String> = self
            .tasks
            .values()
            .filter_map(|task| task.output.clone())
            .collect();

        AppViewModel {
            panel: self.panel,
            run_state: self.run_state,
            task_input: self.task_input.clone(),
            tasks,
            selected_task: self.selected_task,
            output_log,
            sources: self
                .sources
                .iter()
                .map(|source| SourceView {
                    name: source.name.clone(),
                    records: source.records.clone(),
                })
                .collect(),
            sync_phase: self.sync_phase,
            sync_log: self.sync_log.clone(),
            folder_selected: self.folder_selected,
            file_tree: self.file_tree.clone(),
            upload: UploadView {
                percent: self.upload.percent,
                running: self.upload.running,
                complete_visible: self.upload.complete_visible,
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is needed and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub(crate) fn set_panel(&mut self, panel: Panel) {
        self.panel = panel;
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub(crate) fn set_run_state(&mut self, run_state: RunState) {
        self.run_state = run_state;
    }

    pub fn sync_phase(&self) -> SyncPhase {
        self.sync_phase
    }

    pub(crate) fn set_sync_phase(&mut self, phase: SyncPhase) {
        self.sync_phase = phase;
    }

    pub fn upload(&self) -> ProgressState {
        self.upload
    }

    pub fn folder_selected(&self) -> bool {
        self.folder_selected
    }

    pub(crate) fn set_folder_selected(&mut self) {
        self.folder_selected = true;
    }

    pub(crate) fn set_task_input(&mut self, text: String) {
        self.task_input = text;
    }

    pub(crate) fn task_input(&self) -> &str {
        &self.task_input
    }

    /// Adds a pending task and returns its freshly assigned id.
    ///
    /// Ids are a monotonic counter, so they stay unique within the active
    /// task set even under fast successive adds.
    pub(crate) fn add_task(&mut self, text: String) -> TaskId {
        self.next_task_id += 1;
        let id = self.next_task_id;
        self.tasks.insert(
            id,
            Task {
                id,
                text,
                status: TaskStatus::Pending,
                output: None,
            },
        );
        id
    }

    pub(crate) fn remove_task(&mut self, task_id: TaskId) -> bool {
        let removed = self.tasks.remove(&task_id).is_some();
        if removed && self.selected_task == Some(task_id) {
            // Move selection to the next task after the removed id, else the
            // previous one, else nothing.
            self.selected_task = self
                .tasks
                .range(task_id..)
                .map(|(id, _)| *id)
                .next()
                .or_else(|| self.tasks.range(..task_id).map(|(id, _)| *id).next_back());
        }
        removed
    }

    /// Tasks eligible for a simulated run, in ascending id order.
    /// Tasks already in a terminal `Success` state are skipped; failed tasks
    /// are retried.
    pub(crate) fn schedulable_tasks(&self) -> Vec<(TaskId, String)> {
        self.tasks
            .values()
            .filter(|task| task.status != TaskStatus::Success)
            .map(|task| (task.id, task.text.clone()))
            .collect()
    }

    /// Marks a task running. Events for ids removed mid-run are ignored.
    pub(crate) fn apply_task_started(&mut self, task_id: TaskId) -> bool {
        match self.tasks.get_mut(&task_id) {
            Some(task) => {
                task.status = TaskStatus::Running;
                true
            }
            None => false,
        }
    }

    pub(crate) fn apply_task_resolved(
        &mut self,
        task_id: TaskId,
        outcome: TaskOutcome,
        output: String,
    ) -> bool {
        match self.tasks.get_mut(&task_id) {
            Some(task) => {
                task.status = match outcome {
                    TaskOutcome::Success => TaskStatus::Success,
                    TaskOutcome::Error => TaskStatus::Error,
                };
                task.output = Some(output);
                true
            }
            None => false,
        }
    }

    /// Returns every task to `Pending` with its output cleared.
    pub(crate) fn reset_tasks(&mut self) {
        for task in self.tasks.values_mut() {
            task.status = TaskStatus::Pending;
            task.output = None;
        }
    }

    pub(crate) fn select_next_task(&mut self) {
        let next = match self.selected_task {
            Some(current) => self
                .tasks
                .range(current + 1..)
                .map(|(id, _)| *id)
                .next()
                .or(Some(current)),
            None => self.tasks.keys().next().copied(),
        };
        self.selected_task = next.filter(|id| self.tasks.contains_key(id));
    }

    pub(crate) fn select_prev_task(&mut self) {
        let prev = match self.selected_task {
            Some(current) => self
                .tasks
                .range(..current)
                .map(|(id, _)| *id)
                .next_back()
                .or(Some(current)),
            None => self.tasks.keys().next().copied(),
        };
        self.selected_task = prev.filter(|id| self.tasks.contains_key(id));
    }

    pub fn selected_task(&self) -> Option<TaskId> {
        self.selected_task
    }

    pub(crate) fn set_sources(&mut self, sources: Vec<Source>) {
        self.sources = sources;
    }

    pub(crate) fn source_snapshot(&self) -> Vec<Vec<Record>> {
        self.sources
            .iter()
            .map(|source| source.records.clone())
            .collect()
    }

    /// After a merge, every source shows the identical merged set.
    pub(crate) fn apply_merged(&mut self, merged: Vec<Record>) {
        for source in &mut self.sources {
            source.records = merged.clone();
        }
    }

    pub(crate) fn set_sync_log(&mut self, lines: Vec<String>) {
        self.sync_log = lines;
    }

    pub(crate) fn push_sync_log(&mut self, line: String) {
        self.sync_log.push(line);
    }

    pub(crate) fn set_file_tree(&mut self, tree: FileNode) {
        self.file_tree = tree;
    }

    pub(crate) fn upload_mut(&mut self) -> &mut ProgressState {
        &mut self.upload
    }
}
