use std::sync::mpsc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use crate::{EngineEvent, SimSettings, TaskId, TaskOutcome};

/// One planned pair of status transitions for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTask {
    pub task_id: TaskId,
    pub start_at: Duration,
    pub resolve_at: Duration,
    pub outcome: TaskOutcome,
    /// Synthetic output body; the wall-clock stamp is applied at emit time.
    pub output: String,
}

/// A fully planned simulated run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunPlan {
    pub tasks: Vec<PlannedTask>,
    /// Offset after which the run as a whole is finished.
    pub finished_at: Duration,
}

/// Plans a simulated run over the given tasks.
///
/// A cumulative offset starts at zero; each task starts at the current
/// offset, the offset advances by a random stagger drawn from
/// `[stagger_min, stagger_max)`, and the task resolves at the new offset.
/// The first task therefore starts immediately and each resolve coincides
/// with the next task's start. All randomness comes from `rng`, so planning
/// is deterministic for a given seed.
pub fn plan_run(tasks: &[(TaskId, String)], settings: &SimSettings, rng: &mut StdRng) -> RunPlan {
    let mut cursor = Duration::ZERO;
    let mut planned = Vec::with_capacity(tasks.len());
    for (task_id, text) in tasks {
        let start_at = cursor;
        cursor += stagger(settings, rng);
        let outcome = if rng.gen_bool(settings.success_probability) {
            TaskOutcome::Success
        } else {
            TaskOutcome::Error
        };
        planned.push(PlannedTask {
            task_id: *task_id,
            start_at,
            resolve_at: cursor,
            outcome,
            output: render_output(outcome, text),
        });
    }
    RunPlan {
        tasks: planned,
        finished_at: cursor,
    }
}

fn stagger(settings: &SimSettings, rng: &mut StdRng) -> Duration {
    let min = settings.stagger_min.as_millis() as u64;
    let max = settings.stagger_max.as_millis() as u64;
    if max <= min {
        return settings.stagger_min;
    }
    Duration::from_millis(rng.gen_range(min..max))
}

fn render_output(outcome: TaskOutcome, text: &str) -> String {
    match outcome {
        TaskOutcome::Success => format!("[SUCCESS] Simulated output for \"{text}\""),
        TaskOutcome::Error => format!("[ERROR] Simulated failure running \"{text}\""),
    }
}

fn stamp_output(stamp: &str, body: &str) -> String {
    if stamp.is_empty() {
        body.to_owned()
    } else {
        format!("[{stamp}] {body}")
    }
}

/// Replays a plan against the tokio clock, emitting transition events.
///
/// Transitions are purely time-scheduled; nothing here reflects real work.
pub(crate) async fn run_plan(
    plan: RunPlan,
    settings: SimSettings,
    events: mpsc::Sender<EngineEvent>,
) {
    let started = tokio::time::Instant::now();
    for task in plan.tasks {
        tokio::time::sleep_until(started + task.start_at).await;
        if events
            .send(EngineEvent::TaskStarted {
                task_id: task.task_id,
            })
            .is_err()
        {
            return;
        }
        tokio::time::sleep_until(started + task.resolve_at).await;
        let output = stamp_output(&(settings.now)(), &task.output);
        if events
            .send(EngineEvent::TaskResolved {
                task_id: task.task_id,
                outcome: task.outcome,
                output,
            })
            .is_err()
        {
            return;
        }
    }
    tokio::time::sleep_until(started + plan.finished_at).await;
    let _ = events.send(EngineEvent::RunFinished);
}
