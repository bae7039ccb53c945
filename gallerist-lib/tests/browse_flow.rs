//! Integration tests for the browse-and-select flow.
//!
//! These drive the public API end-to-end against an in-memory record source
//! shaped like the artworks catalog: 100 records, 10 per page.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use gallerist_lib::browser::{Browser, BrowserEvent, BrowserObserver};
use gallerist_lib::error::Error;
use gallerist_lib::model::{Artwork, RecordKey};
use gallerist_lib::source::{PageSnapshot, RecordSource};

const TOTAL: usize = 100;
const PAGE_SIZE: usize = 10;

fn artwork(id: i64) -> Artwork {
    Artwork {
        id,
        title: Some(format!("Composition No. {id}")),
        place_of_origin: Some("France".to_string()),
        artist_display: None,
        inscriptions: None,
        date_start: Some(1900),
        date_end: Some(1901),
    }
}

/// In-memory catalog of `TOTAL` artworks with ids 1..=TOTAL, where fetches
/// can optionally be held open per page to script navigation races.
#[derive(Clone, Default)]
struct FakeCatalog {
    gates: Arc<Mutex<HashMap<u32, Arc<Notify>>>>,
}

impl FakeCatalog {
    fn gate(&self, page: u32) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(page, Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl RecordSource for FakeCatalog {
    type Record = Artwork;

    async fn fetch_page(&self, page: u32) -> Result<PageSnapshot<Artwork>, Error> {
        let gate = self.gates.lock().unwrap().get(&page).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let start = (page as usize - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(TOTAL);
        let records = (start..end).map(|i| artwork(i as i64 + 1)).collect();
        Ok(PageSnapshot::new(records, TOTAL))
    }

    fn page_size(&self) -> usize {
        PAGE_SIZE
    }
}

#[derive(Clone, Default)]
struct EventLog {
    events: Arc<Mutex<Vec<BrowserEvent>>>,
}

impl EventLog {
    fn events(&self) -> Vec<BrowserEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl BrowserObserver for EventLog {
    fn notify(&self, event: &BrowserEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn ids(records: &[Artwork]) -> Vec<i64> {
    records.iter().map(RecordKey::key).collect()
}

#[tokio::test]
async fn test_select_three_leave_and_return() {
    let log = EventLog::default();
    let browser = Browser::new(FakeCatalog::default());
    browser.subscribe(log.clone());

    // Fetch page 1: ten records, catalog total 100.
    browser.goto_page(1).await.unwrap();
    assert_eq!(browser.snapshot().len(), PAGE_SIZE);
    assert_eq!(browser.total_count(), TOTAL);
    assert_eq!(browser.total_pages(), TOTAL / PAGE_SIZE);

    // Select the first three rows of page 1.
    browser.select_first_n(3);
    assert_eq!(ids(&browser.active_selection()), vec![1, 2, 3]);

    // Page 2 was never touched: active selection goes empty.
    browser.goto_page(2).await.unwrap();
    assert!(browser.active_selection().is_empty());

    // Returning to page 1 restores the same three records by id.
    browser.goto_page(1).await.unwrap();
    assert_eq!(ids(&browser.active_selection()), vec![1, 2, 3]);

    assert_eq!(
        log.events(),
        vec![
            BrowserEvent::PageLoaded { page: 1 },
            BrowserEvent::SelectionChanged { page: 1 },
            BrowserEvent::BulkApplied {
                page: 1,
                selected: 3
            },
            BrowserEvent::PageLoaded { page: 2 },
            BrowserEvent::PageLoaded { page: 1 },
        ]
    );
}

#[tokio::test]
async fn test_snapshot_and_selection_are_consistent_inside_notify() {
    /// Asserts, from inside the notification, that the snapshot and the
    /// active selection it pairs with belong to the same page.
    struct ConsistencyProbe {
        browser: Browser<FakeCatalog>,
    }

    impl BrowserObserver for ConsistencyProbe {
        fn notify(&self, event: &BrowserEvent) {
            if let BrowserEvent::PageLoaded { page } = event {
                assert_eq!(self.browser.current_page(), Some(*page));
                let snapshot_ids = ids(self.browser.snapshot().records());
                for selected in ids(&self.browser.active_selection()) {
                    assert!(snapshot_ids.contains(&selected));
                }
            }
        }
    }

    let browser = Browser::new(FakeCatalog::default());
    browser.subscribe(ConsistencyProbe {
        browser: browser.clone(),
    });

    browser.goto_page(1).await.unwrap();
    browser.select_first_n(5);
    browser.goto_page(3).await.unwrap();
    browser.goto_page(1).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_navigation_latest_page_wins() {
    let catalog = FakeCatalog::default();
    let gate = catalog.gate(3);
    let browser = Browser::new(catalog);

    // Request page 3, then page 4 while 3 is still in flight. Page 3's
    // response arrives last and must be discarded.
    let (r3, r4) = tokio::join!(browser.goto_page(3), async {
        let r = browser.goto_page(4).await;
        gate.notify_one();
        r
    });
    r3.unwrap();
    r4.unwrap();

    assert_eq!(browser.current_page(), Some(4));
    assert_eq!(
        ids(browser.snapshot().records()),
        (31..=40).collect::<Vec<i64>>()
    );
}
