//! Feed controller behavior tests.
//!
//! Exercises the end-to-end view over an in-memory mock transport:
//! ordering, clamping, caching, error banners, stale-while-revalidate
//! and last-request-wins commits.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use ledger_feed::{
    controller::{ISSUE_GETTING_LATEST_TRANSACTIONS, NO_TRANSACTIONS_FOUND},
    FeedConfig, FeedController, FeedError, FeedResult, LedgerReadApi, MultiGetOptions,
    ObjectListing, ObjectLookup, ObjectStatus, PollScheduler, QueryState,
};

/// Mock transport with canned, index-derived responses.
struct MockLedger {
    total_count: AtomicU64,
    fail_total: AtomicBool,
    fail_digests: AtomicBool,
    count_calls: AtomicUsize,
    digest_calls: AtomicUsize,
    /// Every `(start, end)` range requested, in call order.
    digest_ranges: Mutex<Vec<(u64, u64)>>,
    /// When set, the next digest fetch blocks until notified.
    digest_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockLedger {
    fn new(total_count: u64) -> Arc<Self> {
        Arc::new(Self {
            total_count: AtomicU64::new(total_count),
            fail_total: AtomicBool::new(false),
            fail_digests: AtomicBool::new(false),
            count_calls: AtomicUsize::new(0),
            digest_calls: AtomicUsize::new(0),
            digest_ranges: Mutex::new(Vec::new()),
            digest_gate: Mutex::new(None),
        })
    }

    fn gate_next_digest_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.digest_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl LedgerReadApi for MockLedger {
    async fn get_total_count(&self) -> FeedResult<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_total.load(Ordering::SeqCst) {
            return Err(FeedError::transport("count unavailable"));
        }
        Ok(self.total_count.load(Ordering::SeqCst))
    }

    async fn get_digests_in_range(&self, start: u64, end: u64) -> FeedResult<Vec<String>> {
        self.digest_calls.fetch_add(1, Ordering::SeqCst);
        self.digest_ranges.lock().unwrap().push((start, end));
        let gate = self.digest_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail_digests.load(Ordering::SeqCst) {
            return Err(FeedError::transport("range unavailable"));
        }
        Ok((start..end).map(|index| format!("tx-{index}")).collect())
    }

    async fn multi_get(
        &self,
        ids: &[String],
        _options: MultiGetOptions,
    ) -> FeedResult<Vec<ObjectLookup>> {
        Ok(ids
            .iter()
            .map(|digest| ObjectLookup {
                status: ObjectStatus::Exists,
                details: Some(json!({
                    "digest": digest,
                    "sender": "0xsender",
                    "amount": 100,
                    "gasUsed": 7,
                    "timestamp": 1_700_000_000_000u64
                })),
            })
            .collect())
    }

    async fn get_owned_objects(&self, _owner: &str) -> FeedResult<ObjectListing> {
        Err(FeedError::transport("not part of the feed surface"))
    }

    async fn get_dynamic_fields(&self, _parent: &str) -> FeedResult<ObjectListing> {
        Err(FeedError::transport("not part of the feed surface"))
    }
}

fn controller(transport: Arc<MockLedger>) -> FeedController {
    FeedController::new(transport, FeedConfig::default())
}

async fn expect_success(
    controller: &FeedController,
) -> (std::sync::Arc<ledger_feed::FeedPage>, bool) {
    match controller.state().await {
        QueryState::Success { data, stale } => (data, stale),
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn first_page_is_latest_first() {
    let ledger = MockLedger::new(45);
    let controller = controller(Arc::clone(&ledger));

    controller.refresh().await;

    let (page, stale) = expect_success(&controller).await;
    assert!(!stale);
    assert_eq!(page.page_index, 1);
    assert_eq!(page.records.len(), 20);
    assert_eq!(page.records[0].digest, "tx-44");
    assert_eq!(page.records[19].digest, "tx-25");
    assert_eq!(page.max_page(), 3);
}

#[tokio::test]
async fn empty_ledger_errors_without_page_fetch() {
    let ledger = MockLedger::new(0);
    let controller = controller(Arc::clone(&ledger));

    controller.refresh().await;

    match controller.state().await {
        QueryState::Error { message } => assert_eq!(message, NO_TRANSACTIONS_FOUND),
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(ledger.digest_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn count_failure_surfaces_structural_error() {
    let ledger = MockLedger::new(45);
    ledger.fail_total.store(true, Ordering::SeqCst);
    let controller = controller(Arc::clone(&ledger));

    controller.refresh().await;

    match controller.state().await {
        QueryState::Error { message } => assert_eq!(message, NO_TRANSACTIONS_FOUND),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn page_failure_keeps_pagination_chrome_usable() {
    let ledger = MockLedger::new(45);
    ledger.fail_digests.store(true, Ordering::SeqCst);
    let controller = controller(Arc::clone(&ledger));

    controller.refresh().await;

    match controller.state().await {
        QueryState::Error { message } => {
            assert_eq!(message, ISSUE_GETTING_LATEST_TRANSACTIONS);
        }
        other => panic!("expected error, got {other:?}"),
    }
    // The count arrived, so the chrome still knows the page range.
    assert_eq!(controller.total_count().await, Some(45));
    assert_eq!(controller.max_page().await, 3);
}

#[tokio::test]
async fn page_requests_are_clamped_to_max_page() {
    let ledger = MockLedger::new(45);
    let controller = controller(Arc::clone(&ledger));

    controller.refresh().await;
    controller.set_page(9).await;

    let (page, _) = expect_success(&controller).await;
    assert_eq!(page.page_index, 3);
    assert_eq!(page.records.len(), 5);
    assert_eq!(page.records[0].digest, "tx-4");
    assert_eq!(page.records[4].digest, "tx-0");
}

#[tokio::test]
async fn identical_keys_are_served_from_cache() {
    let ledger = MockLedger::new(45);
    let controller = controller(Arc::clone(&ledger));

    controller.refresh().await;
    assert_eq!(ledger.digest_calls.load(Ordering::SeqCst), 1);

    // Same page again, and a poll tick with an unchanged count: no refetch.
    controller.set_page(1).await;
    controller.refresh().await;
    assert_eq!(ledger.digest_calls.load(Ordering::SeqCst), 1);

    // Navigating away and back is also served from cache.
    controller.set_page(2).await;
    controller.set_page(1).await;
    assert_eq!(ledger.digest_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn grown_count_revalidates_while_showing_stale_page() {
    let ledger = MockLedger::new(45);
    let controller = Arc::new(controller(Arc::clone(&ledger)));

    controller.refresh().await;
    let (page, _) = expect_success(&controller).await;
    assert_eq!(page.total_count, 45);

    // The ledger grows; the next refresh fetches a new key, held at the
    // gate so the in-flight window is observable.
    ledger.total_count.store(46, Ordering::SeqCst);
    let gate = ledger.gate_next_digest_fetch();
    let refreshing = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.refresh().await }
    });
    while ledger.digest_calls.load(Ordering::SeqCst) < 2 {
        tokio::task::yield_now().await;
    }

    // Prior data stays visible, marked stale; never a blank loading state.
    let (page, stale) = expect_success(&controller).await;
    assert!(stale);
    assert_eq!(page.total_count, 45);

    gate.notify_one();
    refreshing.await.unwrap();

    let (page, stale) = expect_success(&controller).await;
    assert!(!stale);
    assert_eq!(page.total_count, 46);
    assert_eq!(page.records[0].digest, "tx-45");
}

#[tokio::test]
async fn navigating_back_to_a_pending_page_reuses_the_in_flight_fetch() {
    let ledger = MockLedger::new(100);
    let controller = Arc::new(controller(Arc::clone(&ledger)));

    // Page 1's fetch stalls at the gate...
    let gate = ledger.gate_next_digest_fetch();
    let stalled = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.refresh().await }
    });
    while ledger.digest_calls.load(Ordering::SeqCst) < 1 {
        tokio::task::yield_now().await;
    }

    // ...the user visits page 2 and returns while page 1 is still
    // pending. The pending key must be reused, not fetched again.
    controller.set_page(2).await;
    controller.set_page(1).await;

    gate.notify_one();
    stalled.await.unwrap();

    let (page, stale) = expect_success(&controller).await;
    assert!(!stale);
    assert_eq!(page.page_index, 1);
    assert_eq!(page.records[0].digest, "tx-99");

    // Exactly one fetch for page 1's window; one writer per key.
    let ranges = ledger.digest_ranges.lock().unwrap();
    assert_eq!(
        ranges.iter().filter(|range| **range == (80, 100)).count(),
        1
    );
}

#[tokio::test]
async fn late_result_for_superseded_parameters_is_discarded() {
    let ledger = MockLedger::new(100);
    let controller = Arc::new(controller(Arc::clone(&ledger)));

    controller.refresh().await;
    assert_eq!(ledger.digest_calls.load(Ordering::SeqCst), 1);

    // A refresh for the grown count stalls at the gate...
    ledger.total_count.store(120, Ordering::SeqCst);
    let gate = ledger.gate_next_digest_fetch();
    let stalled = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.refresh().await }
    });
    while ledger.digest_calls.load(Ordering::SeqCst) < 2 {
        tokio::task::yield_now().await;
    }

    // ...while the user navigates; that newer request completes first.
    controller.set_page(2).await;
    let (page, _) = expect_success(&controller).await;
    assert_eq!(page.page_index, 2);

    // The stalled result no longer matches the current parameters.
    gate.notify_one();
    stalled.await.unwrap();

    let (page, stale) = expect_success(&controller).await;
    assert!(!stale);
    assert_eq!(page.page_index, 2);
    assert_eq!(page.total_count, 120);
    assert_eq!(page.records[0].digest, "tx-99");
}

#[tokio::test(start_paused = true)]
async fn poll_ticks_drive_count_refreshes() {
    let ledger = MockLedger::new(45);
    let config = FeedConfig::default();
    let (mut scheduler, ticks) = PollScheduler::new(config.poll_interval());
    let controller = Arc::new(FeedController::new(
        Arc::clone(&ledger) as Arc<dyn LedgerReadApi>,
        config,
    ));
    tokio::spawn(Arc::clone(&controller).drive(ticks));

    // Initial refresh on startup.
    while ledger.count_calls.load(Ordering::SeqCst) < 1 {
        tokio::task::yield_now().await;
    }

    tokio::time::advance(Duration::from_secs(10)).await;
    while ledger.count_calls.load(Ordering::SeqCst) < 2 {
        tokio::task::yield_now().await;
    }

    // Paused: time passes, no refreshes.
    scheduler.pause();
    tokio::time::advance(Duration::from_secs(60)).await;
    tokio::task::yield_now().await;
    assert_eq!(ledger.count_calls.load(Ordering::SeqCst), 2);

    // Resume refreshes once immediately, without waiting a period.
    scheduler.resume();
    while ledger.count_calls.load(Ordering::SeqCst) < 3 {
        tokio::task::yield_now().await;
    }
    assert_eq!(ledger.count_calls.load(Ordering::SeqCst), 3);
}
