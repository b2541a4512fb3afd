//! Progress notifications for the analysis stages

use std::fmt;
use std::time::Duration;

/// One stage of the role pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Communities,
    WithinCommunityDegrees,
    ParticipationCoefficients,
    Roles,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Communities => "communities",
            Stage::WithinCommunityDegrees => "within community degrees",
            Stage::ParticipationCoefficients => "participation coefficients",
            Stage::Roles => "roles",
        };
        f.write_str(name)
    }
}

/// Receives a notification whenever a stage actually computes.
///
/// Cache hits never reach the observer. Both callbacks run while the stage's
/// cache slot is locked, so an observer must not call back into the
/// [`RoleGraph`](crate::RoleGraph) that notified it: asking for the same stage
/// again deadlocks.
pub trait ProgressObserver: Send + Sync {
    /// Called before a stage starts computing
    fn stage_started(&self, stage: Stage);

    /// Called after a stage has written its result; `entries` is the size of the result map
    fn stage_finished(&self, _stage: Stage, _entries: usize, _elapsed: Duration) {}
}

/// Writes stage progress through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn stage_started(&self, stage: Stage) {
        log::info!("Computing {}...", stage);
    }

    fn stage_finished(&self, stage: Stage, entries: usize, elapsed: Duration) {
        log::debug!("Computed {} for {} nodes in {:?}", stage, entries, elapsed);
    }
}

/// Discards all notifications
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl ProgressObserver for SilentObserver {
    fn stage_started(&self, _stage: Stage) {}
}
