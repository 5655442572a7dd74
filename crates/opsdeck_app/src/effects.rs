use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use deck_logging::deck_info;
use opsdeck_core::{Effect, Msg};
use opsdeck_engine::{EngineEvent, EngineHandle, SimSettings};

/// Bridges the pure core to the simulation engine: effects go out as engine
/// commands, engine events come back in as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: SimSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let engine = EngineHandle::new(settings);
        let runner = Self { engine };
        runner.spawn_event_pump(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleRun { tasks } => {
                    deck_info!("ScheduleRun with {} task(s)", tasks.len());
                    self.engine.schedule_run(tasks);
                }
                Effect::MergeSources { sources } => {
                    deck_info!("MergeSources over {} source(s)", sources.len());
                    self.engine.merge_sources(
                        sources
                            .into_iter()
                            .map(|records| records.into_iter().map(to_engine_record).collect())
                            .collect(),
                    );
                }
                Effect::StartUpload => {
                    deck_info!("StartUpload");
                    self.engine.start_upload();
                }
            }
        }
    }

    fn spawn_event_pump(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::TaskStarted { task_id } => Msg::TaskStarted { task_id },
        EngineEvent::TaskResolved {
            task_id,
            outcome,
            output,
        } => Msg::TaskResolved {
            task_id,
            outcome: map_outcome(outcome),
            output,
        },
        EngineEvent::RunFinished => Msg::RunFinished,
        EngineEvent::MergeCompleted {
            merged,
            total,
            unique,
        } => Msg::MergeCompleted {
            merged: merged.into_iter().map(to_core_record).collect(),
            total,
            unique,
        },
        EngineEvent::SyncSettled => Msg::SyncSettled,
        EngineEvent::UploadProgress { percent } => Msg::UploadProgress { percent },
        EngineEvent::UploadCompleted => Msg::UploadCompleted,
        EngineEvent::UploadBannerExpired => Msg::UploadBannerExpired,
    }
}

fn map_outcome(outcome: opsdeck_engine::TaskOutcome) -> opsdeck_core::TaskOutcome {
    match outcome {
        opsdeck_engine::TaskOutcome::Success => opsdeck_core::TaskOutcome::Success,
        opsdeck_engine::TaskOutcome::Error => opsdeck_core::TaskOutcome::Error,
    }
}

fn to_engine_record(record: opsdeck_core::Record) -> opsdeck_engine::Record {
    opsdeck_engine::Record {
        id: record.id,
        title: record.title,
        location: record.location,
    }
}

fn to_core_record(record: opsdeck_engine::Record) -> opsdeck_core::Record {
    opsdeck_core::Record {
        id: record.id,
        title: record.title,
        location: record.location,
    }
}
