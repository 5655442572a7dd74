use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use deck_logging::{deck_debug, deck_info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{merge_records, scheduler, ticker, EngineEvent, Record, SimSettings, TaskId};

enum EngineCommand {
    ScheduleRun { tasks: Vec<(TaskId, String)> },
    MergeSources { sources: Vec<Vec<Record>> },
    StartUpload,
}

/// Handle to the simulation engine.
///
/// Commands go in over a channel and are serviced by a dedicated thread
/// owning a tokio runtime; events come back over a second channel polled
/// with [`EngineHandle::try_recv`]. Dropping every handle shuts the engine
/// down and aborts a live upload ticker.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: SimSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut rng = StdRng::seed_from_u64(settings.seed);
            let mut upload_task: Option<tokio::task::JoinHandle<()>> = None;

            while let Ok(command) = cmd_rx.recv() {
                let event_tx = event_tx.clone();
                match command {
                    EngineCommand::ScheduleRun { tasks } => {
                        let plan = scheduler::plan_run(&tasks, &settings, &mut rng);
                        deck_info!(
                            "scheduling run of {} task(s), finishes at {:?}",
                            plan.tasks.len(),
                            plan.finished_at
                        );
                        runtime.spawn(scheduler::run_plan(plan, settings.clone(), event_tx));
                    }
                    EngineCommand::MergeSources { sources } => {
                        let settings = settings.clone();
                        runtime.spawn(async move {
                            tokio::time::sleep(settings.merge_delay).await;
                            let total: usize = sources.iter().map(Vec::len).sum();
                            let merged = merge_records(&sources);
                            let unique = merged.len();
                            deck_debug!("merged {total} record(s) down to {unique}");
                            if event_tx
                                .send(EngineEvent::MergeCompleted {
                                    merged,
                                    total,
                                    unique,
                                })
                                .is_err()
                            {
                                return;
                            }
                            tokio::time::sleep(settings.settle_delay).await;
                            let _ = event_tx.send(EngineEvent::SyncSettled);
                        });
                    }
                    EngineCommand::StartUpload => {
                        // A new upload supersedes a still-running ticker so a
                        // stale timer can never move the bar.
                        if let Some(task) = upload_task.take() {
                            task.abort();
                        }
                        upload_task =
                            Some(runtime.spawn(ticker::run_upload(settings.clone(), event_tx)));
                    }
                }
            }

            // Teardown: release the tick source; scheduler timers die with
            // the runtime.
            if let Some(task) = upload_task.take() {
                task.abort();
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn schedule_run(&self, tasks: Vec<(TaskId, String)>) {
        let _ = self.cmd_tx.send(EngineCommand::ScheduleRun { tasks });
    }

    pub fn merge_sources(&self, sources: Vec<Vec<Record>>) {
        let _ = self.cmd_tx.send(EngineCommand::MergeSources { sources });
    }

    pub fn start_upload(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StartUpload);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}
