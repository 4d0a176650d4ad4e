//! Background status polling.
//!
//! The poller is the only periodic writer of the connection state. Each tick
//! runs the update in its own task so that a panic inside detection is
//! reported as a `JoinError` and polling continues on the same cadence.

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::{domain::UpdateOutcome, usecase::UpdateStatusUseCase};

pub struct StatusPoller {
    update_status_usecase: Arc<UpdateStatusUseCase>,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(update_status_usecase: Arc<UpdateStatusUseCase>, interval: Duration) -> Self {
        Self {
            update_status_usecase,
            interval,
        }
    }

    /// Run the polling loop on the current runtime
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Poll forever; the first tick fires immediately
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            "Status poller started"
        );
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// Run one update; `None` if it failed
    pub async fn poll_once(&self) -> Option<UpdateOutcome> {
        let usecase = self.update_status_usecase.clone();
        match tokio::spawn(async move { usecase.execute().await }).await {
            Ok(outcome) => {
                tracing::debug!(?outcome, "Status poll finished");
                Some(outcome)
            }
            Err(e) => {
                tracing::error!("Status poll failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rdpwatch_shared::time::FixedClock;

    use super::*;
    use crate::{
        domain::{ConnectionStateRepository, ConnectionStatus, EvidenceCollector, RemoteUser},
        infrastructure::repository::InMemoryConnectionStateRepository,
    };

    /// Collector that panics on the first call and then reports a connection
    #[derive(Default)]
    struct FlakyCollector {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EvidenceCollector for FlakyCollector {
        async fn detect(&self) -> bool {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("detection blew up");
            }
            true
        }

        async fn list_users(&self) -> Vec<RemoteUser> {
            Vec::new()
        }
    }

    fn create_poller(
        collector: Arc<dyn EvidenceCollector>,
        repository: Arc<InMemoryConnectionStateRepository>,
        interval: Duration,
    ) -> StatusPoller {
        let usecase = Arc::new(UpdateStatusUseCase::new(
            collector,
            repository,
            Arc::new(FixedClock::new(1)),
            Duration::ZERO,
        ));
        StatusPoller::new(usecase, interval)
    }

    #[tokio::test]
    async fn test_poll_once_survives_panic() {
        // テスト項目: 更新中に panic が起きても次のポーリングは継続できる
        // given (前提条件):
        let collector = Arc::new(FlakyCollector::default());
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let poller = create_poller(collector, repository.clone(), Duration::from_secs(10));

        // when (操作):
        let first = poller.poll_once().await;
        let second = poller.poll_once().await;

        // then (期待する結果):
        assert_eq!(first, None);
        assert_eq!(second, Some(UpdateOutcome::Committed(ConnectionStatus::Connected)));
        assert!(repository.get_state().await.is_connected());
    }

    #[tokio::test]
    async fn test_run_polls_repeatedly() {
        // テスト項目: 一定間隔で繰り返し更新が実行される
        // given (前提条件):
        let collector = Arc::new(FlakyCollector::default());
        let repository = Arc::new(InMemoryConnectionStateRepository::default());
        let poller = create_poller(collector.clone(), repository.clone(), Duration::from_millis(10));

        // when (操作):
        let handle = poller.spawn();
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        // then (期待する結果): panic 後もポーリングが続き、状態が確定している
        assert!(collector.calls.load(Ordering::SeqCst) >= 3);
        assert!(repository.get_state().await.last_checked_at.is_some());
        assert!(repository.get_state().await.is_connected());
    }
}
