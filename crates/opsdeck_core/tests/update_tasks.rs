use std::sync::Once;

use opsdeck_core::{
    update, AppState, Effect, FileNode, Msg, RunState, Source, TaskOutcome, TaskStatus,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(deck_logging::initialize_for_tests);
}

fn seeded(tasks: &[&str]) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::FixturesLoaded {
            tasks: tasks.iter().map(|text| text.to_string()).collect(),
            sources: Vec::<Source>::new(),
            tree: FileNode::default(),
        },
    );
    state
}

fn submit_task(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(text.to_string()));
    update(state, Msg::TaskSubmitted)
}

#[test]
fn submitted_input_is_trimmed_and_cleared() {
    init_logging();
    let state = seeded(&[]);
    let (mut state, effects) = submit_task(state, "  npm install  ");

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].text, "npm install");
    assert_eq!(view.tasks[0].status, TaskStatus::Pending);
    assert_eq!(view.task_input, "");
    assert!(state.consume_dirty());
}

#[test]
fn blank_input_is_ignored() {
    init_logging();
    let state = seeded(&[]);
    let (mut state, effects) = submit_task(state, "   \t ");

    assert!(effects.is_empty());
    assert!(state.view().tasks.is_empty());
    // The InputChanged itself dirtied the view; the submit added nothing.
    assert!(state.consume_dirty());
    assert_eq!(state.view().task_input, "   \t ");
}

#[test]
fn task_ids_are_unique_and_ascending() {
    init_logging();
    let state = seeded(&["a", "b"]);
    let (state, _) = submit_task(state, "c");

    let ids: Vec<_> = state.view().tasks.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn run_all_schedules_every_non_successful_task() {
    init_logging();
    let state = seeded(&["ls", "pwd"]);
    let (state, effects) = update(state, Msg::RunAllClicked);

    assert_eq!(
        effects,
        vec![Effect::ScheduleRun {
            tasks: vec![(1, "ls".to_string()), (2, "pwd".to_string())],
        }]
    );
    assert_eq!(state.view().run_state, RunState::Running);
}

#[test]
fn run_all_is_guarded_while_running() {
    init_logging();
    let state = seeded(&["ls"]);
    let (state, _) = update(state, Msg::RunAllClicked);
    let (state, effects) = update(state, Msg::RunAllClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view().run_state, RunState::Running);
}

#[test]
fn run_all_with_no_tasks_is_a_noop() {
    init_logging();
    let state = seeded(&[]);
    let (state, effects) = update(state, Msg::RunAllClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view().run_state, RunState::Idle);
}

#[test]
fn successful_tasks_are_skipped_but_failed_ones_retry() {
    init_logging();
    let state = seeded(&["ok-task", "bad-task"]);
    let (state, _) = update(state, Msg::RunAllClicked);
    let (state, _) = update(
        state,
        Msg::TaskResolved {
            task_id: 1,
            outcome: TaskOutcome::Success,
            output: "done".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::TaskResolved {
            task_id: 2,
            outcome: TaskOutcome::Error,
            output: "boom".to_string(),
        },
    );
    let (state, _) = update(state, Msg::RunFinished);

    let (_state, effects) = update(state, Msg::RunAllClicked);
    assert_eq!(
        effects,
        vec![Effect::ScheduleRun {
            tasks: vec![(2, "bad-task".to_string())],
        }]
    );
}

#[test]
fn scheduler_events_drive_the_status_lifecycle() {
    init_logging();
    let state = seeded(&["deploy"]);
    let (state, _) = update(state, Msg::RunAllClicked);

    let (mut state, _) = update(state, Msg::TaskStarted { task_id: 1 });
    assert_eq!(state.view().tasks[0].status, TaskStatus::Running);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::TaskResolved {
            task_id: 1,
            outcome: TaskOutcome::Error,
            output: "[ERROR] simulated".to_string(),
        },
    );
    let view = state.view();
    assert_eq!(view.tasks[0].status, TaskStatus::Error);
    assert_eq!(view.tasks[0].output.as_deref(), Some("[ERROR] simulated"));
    assert_eq!(view.output_log, vec!["[ERROR] simulated".to_string()]);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::RunFinished);
    assert_eq!(state.view().run_state, RunState::Idle);
    assert!(state.consume_dirty());
}

#[test]
fn events_for_removed_tasks_are_ignored() {
    init_logging();
    let state = seeded(&["a"]);
    let (mut state, _) = update(state, Msg::TaskRemoved { task_id: 1 });
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::TaskStarted { task_id: 1 });
    assert!(state.view().tasks.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn reset_returns_tasks_to_pending_when_idle() {
    init_logging();
    let state = seeded(&["a"]);
    let (state, _) = update(state, Msg::RunAllClicked);
    let (state, _) = update(
        state,
        Msg::TaskResolved {
            task_id: 1,
            outcome: TaskOutcome::Success,
            output: "out".to_string(),
        },
    );

    // Reset is a no-op while timers may still fire.
    let (state, _) = update(state, Msg::ResetClicked);
    assert_eq!(state.view().tasks[0].status, TaskStatus::Success);

    let (state, _) = update(state, Msg::RunFinished);
    let (state, _) = update(state, Msg::ResetClicked);
    let view = state.view();
    assert_eq!(view.tasks[0].status, TaskStatus::Pending);
    assert_eq!(view.tasks[0].output, None);
    assert!(view.output_log.is_empty());
}

#[test]
fn selection_moves_and_follows_removal() {
    init_logging();
    let state = seeded(&["a", "b", "c"]);

    let (state, _) = update(state, Msg::SelectNextTask);
    assert_eq!(state.selected_task(), Some(1));
    let (state, _) = update(state, Msg::SelectNextTask);
    assert_eq!(state.selected_task(), Some(2));

    let (state, _) = update(state, Msg::TaskRemoved { task_id: 2 });
    assert_eq!(state.selected_task(), Some(3));

    let (state, _) = update(state, Msg::SelectPrevTask);
    assert_eq!(state.selected_task(), Some(1));
    // Already at the first task; selection saturates.
    let (state, _) = update(state, Msg::SelectPrevTask);
    assert_eq!(state.selected_task(), Some(1));
}

#[test]
fn selection_on_empty_list_stays_empty() {
    init_logging();
    let state = seeded(&[]);
    let (state, _) = update(state, Msg::SelectNextTask);
    assert_eq!(state.selected_task(), None);
}

#[test]
fn tasks_can_be_added_while_a_run_is_in_flight() {
    init_logging();
    let state = seeded(&["a"]);
    let (state, _) = update(state, Msg::RunAllClicked);
    let (state, _) = submit_task(state, "late arrival");

    let view = state.view();
    assert_eq!(view.tasks.len(), 2);
    assert_eq!(view.run_state, RunState::Running);
    assert_eq!(view.tasks[1].status, TaskStatus::Pending);
}
