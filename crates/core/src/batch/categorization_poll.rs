use log::info;
use std::time::Duration;

use crate::constants::{FAST_POLL_INTERVAL_MS, SLOW_POLL_INTERVAL_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollMode {
    /// No batch known to be running.
    #[default]
    Slow,
    /// A batch was started and the count is still above zero.
    Fast,
}

/// Decides how often to poll the uncategorized count.
///
/// Starting a batch switches to fast polling; seeing a count of zero or any
/// failure drops back to slow polling. Failures are never retried here.
#[derive(Debug, Clone, Default)]
pub struct CategorizationPoll {
    mode: PollMode,
    last_count: Option<u64>,
}

impl CategorizationPoll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> PollMode {
        self.mode
    }

    pub fn last_count(&self) -> Option<u64> {
        self.last_count
    }

    pub fn is_running(&self) -> bool {
        self.mode == PollMode::Fast
    }

    pub fn started(&mut self) {
        if self.mode != PollMode::Fast {
            info!("Batch categorization started, switching to fast polling");
        }
        self.mode = PollMode::Fast;
    }

    pub fn observed_count(&mut self, count: u64) {
        self.last_count = Some(count);
        if self.mode == PollMode::Fast && count == 0 {
            info!("Batch categorization finished");
            self.mode = PollMode::Slow;
        }
    }

    pub fn failed(&mut self) {
        if self.mode == PollMode::Fast {
            info!("Batch categorization polling failed, switching to slow polling");
        }
        self.mode = PollMode::Slow;
    }

    pub fn interval(&self) -> Duration {
        match self.mode {
            PollMode::Fast => Duration::from_millis(FAST_POLL_INTERVAL_MS),
            PollMode::Slow => Duration::from_millis(SLOW_POLL_INTERVAL_MS),
        }
    }
}
