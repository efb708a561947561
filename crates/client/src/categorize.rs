//! Progress monitor for batch AI categorization.

use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use sprout_core::agents::ProcessUncategorizedResult;
use sprout_core::batch::{CategorizationPoll, PollMode};

use crate::error::Result;
use crate::traits::CategorizationApiTrait;

/// Starts a categorization batch and follows the uncategorized count.
///
/// Failures drop back to slow polling and are returned to the caller; the
/// monitor never retries on its own.
pub struct CategorizationMonitor {
    api: Arc<dyn CategorizationApiTrait>,
    poll: CategorizationPoll,
    batch_limit: Option<u32>,
}

impl CategorizationMonitor {
    pub fn new(api: Arc<dyn CategorizationApiTrait>) -> Self {
        Self {
            api,
            poll: CategorizationPoll::new(),
            batch_limit: None,
        }
    }

    pub fn with_batch_limit(mut self, limit: u32) -> Self {
        self.batch_limit = Some(limit);
        self
    }

    pub fn mode(&self) -> PollMode {
        self.poll.mode()
    }

    pub fn interval(&self) -> Duration {
        self.poll.interval()
    }

    pub fn last_count(&self) -> Option<u64> {
        self.poll.last_count()
    }

    pub async fn start(&mut self) -> Result<ProcessUncategorizedResult> {
        match self.api.process_uncategorized(self.batch_limit).await {
            Ok(result) => {
                if result.started() {
                    info!("Queued {} transactions for categorization", result.queued_count());
                    self.poll.started();
                }
                Ok(result)
            }
            Err(err) => {
                self.poll.failed();
                Err(err)
            }
        }
    }

    /// Reads the uncategorized count once.
    pub async fn poll(&mut self) -> Result<u64> {
        match self.api.uncategorized_count().await {
            Ok(count) => {
                debug!("Uncategorized transactions remaining: {}", count.count);
                self.poll.observed_count(count.count);
                Ok(count.count)
            }
            Err(err) => {
                self.poll.failed();
                Err(err)
            }
        }
    }

    /// Polls at the current interval until the count reaches zero or
    /// `max_polls` reads have been made. Returns the last count seen.
    pub async fn watch<F>(&mut self, max_polls: usize, mut on_count: F) -> Result<u64>
    where
        F: FnMut(u64),
    {
        let mut last = self.poll.last_count().unwrap_or_default();
        for _ in 0..max_polls {
            tokio::time::sleep(self.poll.interval()).await;
            last = self.poll().await?;
            on_count(last);
            if last == 0 {
                break;
            }
        }
        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use sprout_core::agents::UncategorizedCount;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct MockCategorizationApi {
        queued: Option<u64>,
        counts: Mutex<VecDeque<Result<u64>>>,
    }

    impl MockCategorizationApi {
        fn new(queued: Option<u64>, counts: Vec<Result<u64>>) -> Arc<Self> {
            Arc::new(Self {
                queued,
                counts: Mutex::new(counts.into()),
            })
        }
    }

    #[async_trait]
    impl CategorizationApiTrait for MockCategorizationApi {
        async fn uncategorized_count(&self) -> Result<UncategorizedCount> {
            let next = self.counts.lock().unwrap().pop_front().unwrap_or(Ok(0));
            next.map(|count| UncategorizedCount { count })
        }

        async fn process_uncategorized(&self, _limit: Option<u32>) -> Result<ProcessUncategorizedResult> {
            Ok(ProcessUncategorizedResult {
                queued: self.queued,
                message: self.queued.is_none().then(|| "Nothing to process".to_string()),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_polling_until_done() {
        let api = MockCategorizationApi::new(Some(12), vec![Ok(9), Ok(4), Ok(0), Ok(7)]);
        let mut monitor = CategorizationMonitor::new(api);

        monitor.start().await.unwrap();
        assert_eq!(monitor.mode(), PollMode::Fast);

        let started = tokio::time::Instant::now();
        let mut seen = Vec::new();
        let last = monitor.watch(10, |count| seen.push(count)).await.unwrap();

        assert_eq!(last, 0);
        assert_eq!(seen, vec![9, 4, 0]);
        assert_eq!(started.elapsed(), Duration::from_secs(6));
        assert_eq!(monitor.mode(), PollMode::Slow);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_to_process_stays_slow() {
        let api = MockCategorizationApi::new(None, vec![]);
        let mut monitor = CategorizationMonitor::new(api);

        let result = monitor.start().await.unwrap();
        assert!(!result.started());
        assert_eq!(monitor.interval(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_stops_watch_and_reverts() {
        let api = MockCategorizationApi::new(
            Some(3),
            vec![Ok(3), Err(ApiError::Network("connection reset".to_string())), Ok(0)],
        );
        let mut monitor = CategorizationMonitor::new(api);
        monitor.start().await.unwrap();

        let err = monitor.watch(10, |_| {}).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(monitor.mode(), PollMode::Slow);
        assert_eq!(monitor.last_count(), Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_budget_is_respected() {
        let api = MockCategorizationApi::new(Some(50), vec![Ok(40), Ok(30), Ok(20)]);
        let mut monitor = CategorizationMonitor::new(api).with_batch_limit(50);
        monitor.start().await.unwrap();

        let last = monitor.watch(2, |_| {}).await.unwrap();
        assert_eq!(last, 30);
        assert_eq!(monitor.mode(), PollMode::Fast);
    }
}
