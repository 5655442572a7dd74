use crate::view_model::PROGRESS_MAX;
use crate::{AppState, Effect, Msg, RunState, SyncPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FixturesLoaded {
            tasks,
            sources,
            tree,
        } => {
            for text in tasks {
                state.add_task(text);
            }
            state.set_sources(sources);
            state.set_file_tree(tree);
            state.mark_dirty();
            Vec::new()
        }
        Msg::PanelSelected(panel) => {
            if state.panel() != panel {
                state.set_panel(panel);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::InputChanged(text) => {
            state.set_task_input(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::TaskSubmitted => {
            let text = state.task_input().trim().to_owned();
            if text.is_empty() {
                return (state, Vec::new());
            }
            state.add_task(text);
            state.set_task_input(String::new());
            state.mark_dirty();
            Vec::new()
        }
        Msg::RunAllClicked => {
            // In-progress guard: a second run while timers are pending would
            // interleave unsynchronized writes into task state.
            if state.run_state() != RunState::Idle {
                return (state, Vec::new());
            }
            let tasks = state.schedulable_tasks();
            if tasks.is_empty() {
                return (state, Vec::new());
            }
            state.set_run_state(RunState::Running);
            state.mark_dirty();
            vec![Effect::ScheduleRun { tasks }]
        }
        Msg::ResetClicked => {
            if state.run_state() != RunState::Idle {
                return (state, Vec::new());
            }
            state.reset_tasks();
            state.mark_dirty();
            Vec::new()
        }
        Msg::TaskRemoved { task_id } => {
            if state.remove_task(task_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SelectNextTask => {
            let before = state.selected_task();
            state.select_next_task();
            if state.selected_task() != before {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SelectPrevTask => {
            let before = state.selected_task();
            state.select_prev_task();
            if state.selected_task() != before {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TaskStarted { task_id } => {
            if state.apply_task_started(task_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TaskResolved {
            task_id,
            outcome,
            output,
        } => {
            if state.apply_task_resolved(task_id, outcome, output) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RunFinished => {
            if state.run_state() == RunState::Running {
                state.set_run_state(RunState::Idle);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SyncClicked => {
            if state.sync_phase() != SyncPhase::Idle {
                return (state, Vec::new());
            }
            state.set_sync_phase(SyncPhase::Merging);
            state.set_sync_log(vec!["Starting sync...".to_owned()]);
            state.mark_dirty();
            vec![Effect::MergeSources {
                sources: state.source_snapshot(),
            }]
        }
        Msg::MergeCompleted {
            merged,
            total,
            unique,
        } => {
            if state.sync_phase() != SyncPhase::Merging {
                return (state, Vec::new());
            }
            state.apply_merged(merged);
            state.set_sync_log(vec![
                "Syncing...".to_owned(),
                format!("Found {total} total bookmarks."),
                format!("Identified {unique} unique bookmarks."),
                "Distributing merged set to all sources...".to_owned(),
            ]);
            state.set_sync_phase(SyncPhase::Settling);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SyncSettled => {
            if state.sync_phase() != SyncPhase::Settling {
                return (state, Vec::new());
            }
            state.push_sync_log("Sync complete!".to_owned());
            state.set_sync_phase(SyncPhase::Idle);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SelectFolderClicked => {
            if !state.folder_selected() {
                state.set_folder_selected();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadClicked => {
            if !state.folder_selected() || state.upload().running {
                return (state, Vec::new());
            }
            let upload = state.upload_mut();
            upload.percent = 0;
            upload.running = true;
            upload.complete_visible = false;
            state.mark_dirty();
            vec![Effect::StartUpload]
        }
        Msg::UploadProgress { percent } => {
            let upload = state.upload_mut();
            if upload.running {
                let clamped = percent.min(PROGRESS_MAX);
                // Monotonic while running: late or duplicated ticks never
                // move the bar backwards.
                if clamped > upload.percent {
                    upload.percent = clamped;
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::UploadCompleted => {
            let upload = state.upload_mut();
            if upload.running {
                upload.percent = PROGRESS_MAX;
                upload.running = false;
                upload.complete_visible = true;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadBannerExpired => {
            let upload = state.upload_mut();
            if upload.complete_visible {
                upload.complete_visible = false;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
