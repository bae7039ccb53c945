//! Page browser: navigation, selection restore, and bulk select.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use log::debug;
use log::warn;

use crate::error::Error;
use crate::selection::SelectionStore;
use crate::source::PageSnapshot;
use crate::source::RecordSource;

/// Notification emitted by the [`Browser`] after a state change.
///
/// Every event fires only once the state it describes is observable through
/// the browser's accessors, so a re-render inside
/// [`BrowserObserver::notify`] always sees a consistent snapshot/selection
/// pair.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEvent {
    /// A page fetch settled: the snapshot and its restored selection are live.
    PageLoaded {
        /// The page that finished loading.
        page: u32,
    },
    /// The active page's selection changed.
    SelectionChanged {
        /// The page whose selection changed.
        page: u32,
    },
    /// A bulk select-first-N completed; the input affordance can be dismissed.
    BulkApplied {
        /// The page the bulk selection was committed for.
        page: u32,
        /// Number of records selected after clamping.
        selected: usize,
    },
    /// A page fetch failed; prior state is untouched.
    FetchFailed {
        /// The page that failed to load.
        page: u32,
        /// Human-readable failure description.
        message: String,
    },
}

/// Observer of browser state changes.
///
/// The presentation surface subscribes one of these and re-renders (or
/// surfaces a notice) when notified.
pub trait BrowserObserver: Send + Sync {
    /// Called for every emitted [`BrowserEvent`].
    fn notify(&self, event: &BrowserEvent);
}

/// The page browser: owns the current page, its snapshot, and the selection
/// store, and sequences page transitions around the record source.
///
/// Cheap to clone (uses `Arc` internally). All mutation is serialized behind
/// one internal mutex, which is never held across the fetch await, so the
/// browser is safe to drive from concurrent tasks. When navigations race,
/// the most recently requested page wins: each fetch carries a
/// monotonically increasing token and a result is applied only while its
/// token is still the latest issued.
///
/// # Example
///
/// ```ignore
/// let browser = Browser::new(ArticClient::default());
/// browser.goto_page(1).await?;
/// browser.select_first_n(3);
/// browser.goto_page(2).await?;
/// browser.goto_page(1).await?; // the three rows are selected again
/// ```
pub struct Browser<S: RecordSource> {
    inner: Arc<BrowserInner<S>>,
}

impl<S: RecordSource> Clone for Browser<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct BrowserInner<S: RecordSource> {
    source: S,
    state: Mutex<BrowserState<S::Record>>,
    /// Token of the most recently issued fetch.
    latest_token: AtomicU64,
    /// Token of the most recent fetch that settled (applied or failed).
    /// A superseded fetch never settles its own token.
    settled_token: AtomicU64,
    observers: Mutex<Vec<Box<dyn BrowserObserver>>>,
}

struct BrowserState<R> {
    /// `None` until the first fetch settles successfully.
    current_page: Option<u32>,
    snapshot: PageSnapshot<R>,
    selection: SelectionStore<R>,
    active_selection: Vec<R>,
}

impl<S: RecordSource> Browser<S> {
    /// Creates a browser over the given record source. No fetch is issued
    /// until the first [`goto_page`](Self::goto_page).
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(BrowserInner {
                source,
                state: Mutex::new(BrowserState {
                    current_page: None,
                    snapshot: PageSnapshot::default(),
                    selection: SelectionStore::new(),
                    active_selection: Vec::new(),
                }),
                latest_token: AtomicU64::new(0),
                settled_token: AtomicU64::new(0),
                observers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Registers an observer for browser events.
    pub fn subscribe(&self, observer: impl BrowserObserver + 'static) {
        self.observers().push(Box::new(observer));
    }

    /// Navigates to a one-based page.
    ///
    /// Fetches the page's snapshot, then restores the selection previously
    /// committed for that page (empty if the page was never touched), then
    /// notifies observers with [`BrowserEvent::PageLoaded`]. The snapshot
    /// and selection become visible together, under one lock acquisition.
    ///
    /// On a fetch failure the browser stays on the previously active page
    /// with its snapshot and selection intact, emits
    /// [`BrowserEvent::FetchFailed`], and returns the error.
    ///
    /// `page == 0` is ignored. A call superseded by a newer `goto_page`
    /// discards its result (success or failure alike) and returns `Ok(())`:
    /// the navigation was cancelled, not failed.
    pub async fn goto_page(&self, page: u32) -> Result<(), Error> {
        if page < 1 {
            debug!("ignoring request for page {page}; pages are one-based");
            return Ok(());
        }

        let token = self.inner.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.inner.source.fetch_page(page).await;

        let mut state = self.state();
        if self.inner.latest_token.load(Ordering::SeqCst) != token {
            debug!("discarding stale fetch for page {page}; a newer navigation won");
            return Ok(());
        }

        match result {
            Ok(snapshot) => {
                state.snapshot = snapshot;
                state.current_page = Some(page);
                state.active_selection = state.selection.restore(page);
                self.inner.settled_token.store(token, Ordering::SeqCst);
                drop(state);
                self.emit(&BrowserEvent::PageLoaded { page });
                Ok(())
            }
            Err(e) => {
                self.inner.settled_token.store(token, Ordering::SeqCst);
                drop(state);
                warn!("fetch for page {page} failed: {e}");
                self.emit(&BrowserEvent::FetchFailed {
                    page,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Selects the first `n` records of the current page, in fetch order,
    /// and commits them as the page's selection.
    ///
    /// `n` is clamped to `[0, page length]`: negative values clear, values
    /// past the end select the whole page. `n == 0` commits an explicit
    /// empty entry, which is distinct from never having selected on the
    /// page. Emits [`BrowserEvent::SelectionChanged`] followed by
    /// [`BrowserEvent::BulkApplied`]; the latter tells the presentation
    /// surface to dismiss its count-input affordance.
    ///
    /// A no-op until the first page has loaded.
    pub fn select_first_n(&self, n: i64) {
        let (page, selected) = {
            let mut state = self.state();
            let Some(page) = state.current_page else {
                warn!("bulk select of {n} requested before any page loaded");
                return;
            };
            let count = n.clamp(0, state.snapshot.len() as i64) as usize;
            let records = state.snapshot.records()[..count].to_vec();
            state.active_selection = records.clone();
            state.selection.commit(page, records);
            (page, count)
        };
        self.emit(&BrowserEvent::SelectionChanged { page });
        self.emit(&BrowserEvent::BulkApplied { page, selected });
    }

    /// Commits a user-edited selection for the active page.
    ///
    /// `page` must be the current page; an edit targeting any other page is
    /// a caller contract violation and is ignored with a warning, leaving
    /// the selection map untouched. The caller guarantees `records` are
    /// unique by key and keeps them in display order.
    pub fn edit_selection(&self, page: u32, records: Vec<S::Record>) {
        let applied = {
            let mut state = self.state();
            if state.current_page != Some(page) {
                warn!(
                    "rejecting selection edit for page {page}; active page is {:?}",
                    state.current_page
                );
                false
            } else {
                state.active_selection = records.clone();
                state.selection.commit(page, records);
                true
            }
        };
        if applied {
            self.emit(&BrowserEvent::SelectionChanged { page });
        }
    }

    /// Returns the current page index, `None` before the first load.
    pub fn current_page(&self) -> Option<u32> {
        self.state().current_page
    }

    /// Returns the current page's snapshot (empty before the first load).
    pub fn snapshot(&self) -> PageSnapshot<S::Record> {
        self.state().snapshot.clone()
    }

    /// Returns the selection currently displayed for the page in view.
    pub fn active_selection(&self) -> Vec<S::Record> {
        self.state().active_selection.clone()
    }

    /// Returns the total record count across all pages.
    pub fn total_count(&self) -> usize {
        self.state().snapshot.total_count()
    }

    /// Returns the total number of pages, given the source's page size.
    pub fn total_pages(&self) -> usize {
        let page_size = self.inner.source.page_size();
        if page_size == 0 {
            return 0;
        }
        self.total_count().div_ceil(page_size)
    }

    /// Returns `true` if a selection (possibly empty) was ever committed
    /// for `page`.
    pub fn is_committed(&self, page: u32) -> bool {
        self.state().selection.is_committed(page)
    }

    /// Returns `true` while a fetch is outstanding.
    ///
    /// A hung fetch keeps this `true` indefinitely; sources should bound
    /// their requests with a timeout (see `ArticClientBuilder::timeout`).
    pub fn is_loading(&self) -> bool {
        self.inner.latest_token.load(Ordering::SeqCst)
            != self.inner.settled_token.load(Ordering::SeqCst)
    }

    fn emit(&self, event: &BrowserEvent) {
        for observer in self.observers().iter() {
            observer.notify(event);
        }
    }

    fn state(&self) -> MutexGuard<'_, BrowserState<S::Record>> {
        self.inner.state.lock().expect("browser state poisoned")
    }

    fn observers(&self) -> MutexGuard<'_, Vec<Box<dyn BrowserObserver>>> {
        self.inner.observers.lock().expect("observer list poisoned")
    }
}
