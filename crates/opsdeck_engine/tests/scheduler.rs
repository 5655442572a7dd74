use std::time::Duration;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use opsdeck_engine::{plan_run, SimSettings, TaskOutcome};

fn tasks(texts: &[&str]) -> Vec<(u64, String)> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| (index as u64 + 1, text.to_string()))
        .collect()
}

#[test]
fn plan_covers_every_task_with_paired_transitions() {
    let settings = SimSettings::default();
    let mut rng = StdRng::seed_from_u64(1);
    let plan = plan_run(&tasks(&["a", "b", "c"]), &settings, &mut rng);

    assert_eq!(plan.tasks.len(), 3);
    assert_eq!(plan.tasks[0].start_at, Duration::ZERO);
    for task in &plan.tasks {
        assert!(task.start_at < task.resolve_at);
        assert!(!task.output.is_empty());
    }
    // The cumulative offset chains resolves into the next start.
    for pair in plan.tasks.windows(2) {
        assert_eq!(pair[0].resolve_at, pair[1].start_at);
    }
    assert_eq!(plan.finished_at, plan.tasks.last().unwrap().resolve_at);
}

#[test]
fn stagger_increments_stay_within_the_configured_range() {
    let settings = SimSettings::default();
    let mut rng = StdRng::seed_from_u64(99);
    let plan = plan_run(&tasks(&["a", "b", "c", "d", "e"]), &settings, &mut rng);

    for task in &plan.tasks {
        let increment = task.resolve_at - task.start_at;
        assert!(increment >= settings.stagger_min);
        assert!(increment < settings.stagger_max);
    }
}

#[test]
fn same_seed_replays_the_identical_plan() {
    let settings = SimSettings::default();
    let input = tasks(&["x", "y", "z"]);

    let mut first_rng = StdRng::seed_from_u64(7);
    let mut second_rng = StdRng::seed_from_u64(7);
    let first = plan_run(&input, &settings, &mut first_rng);
    let second = plan_run(&input, &settings, &mut second_rng);

    assert_eq!(first, second);
}

#[test]
fn outputs_are_tagged_with_the_outcome() {
    let settings = SimSettings::default();
    let mut rng = StdRng::seed_from_u64(3);
    let plan = plan_run(&tasks(&["a", "b", "c", "d", "e", "f"]), &settings, &mut rng);

    for task in &plan.tasks {
        match task.outcome {
            TaskOutcome::Success => assert!(task.output.starts_with("[SUCCESS]")),
            TaskOutcome::Error => assert!(task.output.starts_with("[ERROR]")),
        }
        assert!(task.output.contains('"'));
    }
}

#[test]
fn extreme_probabilities_force_the_outcome() {
    let mut settings = SimSettings::default();
    let input = tasks(&["a", "b"]);

    settings.success_probability = 1.0;
    let mut rng = StdRng::seed_from_u64(5);
    let plan = plan_run(&input, &settings, &mut rng);
    assert!(plan
        .tasks
        .iter()
        .all(|task| task.outcome == TaskOutcome::Success));

    settings.success_probability = 0.0;
    let mut rng = StdRng::seed_from_u64(5);
    let plan = plan_run(&input, &settings, &mut rng);
    assert!(plan
        .tasks
        .iter()
        .all(|task| task.outcome == TaskOutcome::Error));
}

#[test]
fn empty_task_list_plans_an_empty_run() {
    let settings = SimSettings::default();
    let mut rng = StdRng::seed_from_u64(0);
    let plan = plan_run(&[], &settings, &mut rng);

    assert!(plan.tasks.is_empty());
    assert_eq!(plan.finished_at, Duration::ZERO);
}
