use std::sync::mpsc;

use crate::types::PROGRESS_MAX;
use crate::{EngineEvent, SimSettings};

/// Drives the bounded upload progress on a fixed cadence.
///
/// Emits `UploadProgress` every tick, clamps at the upper bound, then emits
/// `UploadCompleted` followed by `UploadBannerExpired` after the banner
/// duration. The caller is responsible for aborting this future when the
/// upload is superseded or the engine is torn down.
pub(crate) async fn run_upload(settings: SimSettings, events: mpsc::Sender<EngineEvent>) {
    let mut percent: u8 = 0;
    let step = settings.tick_step.max(1);
    // interval() panics on a zero period.
    let period = settings.tick_period.max(std::time::Duration::from_millis(1));
    let mut interval = tokio::time::interval(period);
    // The first interval tick completes immediately; skip it so the first
    // progress event lands one period after start.
    interval.tick().await;
    loop {
        interval.tick().await;
        percent = percent.saturating_add(step).min(PROGRESS_MAX);
        if events
            .send(EngineEvent::UploadProgress { percent })
            .is_err()
        {
            return;
        }
        if percent >= PROGRESS_MAX {
            break;
        }
    }
    if events.send(EngineEvent::UploadCompleted).is_err() {
        return;
    }
    tokio::time::sleep(settings.banner_duration).await;
    let _ = events.send(EngineEvent::UploadBannerExpired);
}
