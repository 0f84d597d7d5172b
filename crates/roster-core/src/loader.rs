//! Incremental page loader.
//!
//! Owns the accumulated record list and the page cursor, and decides when a
//! fetch may be issued. The loader is an explicit state machine: the UI layer
//! asks `begin_fetch` for a request to dispatch and feeds the outcome back
//! through `apply_success` / `apply_failure`. All guards live here, so scroll
//! handlers may call `begin_fetch` redundantly and every duplicate collapses
//! into a no-op.
//!
//! The cursor is owned by this state machine, never by UI callbacks, so a
//! dispatched request always carries the page the loader expects next.

use roster_types::{User, UsersPage};

/// Loader execution phase.
///
/// `Fetching` is the sole mutual-exclusion mechanism: at most one request is
/// in flight, enforced by the `begin_fetch` guard. `Exhausted` is terminal.
/// `Errored` is retriable: the next trigger re-requests the same page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// No request in flight, more pages may exist.
    Idle,
    /// One page request in flight.
    Fetching,
    /// The server reported no further pages.
    Exhausted,
    /// The last request failed; state is unchanged and retriable.
    Errored,
}

/// A page request the caller should dispatch to the fetch client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

/// Loader state for one table session.
///
/// `accumulated` grows monotonically and is never truncated or reordered;
/// `next_page` equals 1 + the number of successfully fetched pages.
#[derive(Debug)]
pub struct LoaderState {
    accumulated: Vec<User>,
    next_page: u32,
    limit: u32,
    phase: LoaderPhase,
    initial_load_complete: bool,
    last_error: Option<String>,
    total_users: Option<u64>,
}

impl LoaderState {
    /// Creates a loader that will request pages of the given size.
    pub fn new(limit: u32) -> Self {
        Self {
            accumulated: Vec::new(),
            next_page: 1,
            limit,
            phase: LoaderPhase::Idle,
            initial_load_complete: false,
            last_error: None,
            total_users: None,
        }
    }

    /// Requests permission to fetch the next page.
    ///
    /// Returns `None` while a request is in flight or after the server
    /// reported the end of the data; callers treat that as a no-op. On
    /// `Some`, the loader has transitioned to `Fetching` and expects exactly
    /// one matching `apply_success` or `apply_failure`.
    pub fn begin_fetch(&mut self) -> Option<PageRequest> {
        match self.phase {
            LoaderPhase::Fetching | LoaderPhase::Exhausted => None,
            LoaderPhase::Idle | LoaderPhase::Errored => {
                self.phase = LoaderPhase::Fetching;
                Some(PageRequest {
                    page: self.next_page,
                    limit: self.limit,
                })
            }
        }
    }

    /// Applies a successful page response.
    ///
    /// Appends records in server order (no dedup, no sort), advances the
    /// cursor, and exhausts the loader once the cursor passes the last page.
    /// A response arriving outside `Fetching` is stale and ignored.
    pub fn apply_success(&mut self, page: UsersPage) {
        if self.phase != LoaderPhase::Fetching {
            return;
        }

        self.total_users = Some(page.total_users);
        self.accumulated.extend(page.users);
        self.next_page += 1;
        self.phase = if self.next_page > page.total_pages {
            LoaderPhase::Exhausted
        } else {
            LoaderPhase::Idle
        };
        self.initial_load_complete = true;
        self.last_error = None;
    }

    /// Applies a failed page response.
    ///
    /// Accumulated records and the cursor are untouched, so the next trigger
    /// retries the same page. The message is kept for display.
    pub fn apply_failure(&mut self, message: impl Into<String>) {
        if self.phase != LoaderPhase::Fetching {
            return;
        }

        self.phase = LoaderPhase::Errored;
        self.initial_load_complete = true;
        self.last_error = Some(message.into());
    }

    /// The records loaded so far, in server order.
    pub fn users(&self) -> &[User] {
        &self.accumulated
    }

    /// Number of records loaded so far.
    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty()
    }

    /// Whether additional pages remain to be fetched.
    ///
    /// Becomes false exactly once and never reverts.
    pub fn has_more(&self) -> bool {
        self.phase != LoaderPhase::Exhausted
    }

    /// Whether a request is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == LoaderPhase::Fetching
    }

    /// Whether the very first page has been resolved (success or failure).
    ///
    /// Gates scroll-triggered continuation so an empty table cannot fire a
    /// spurious second fetch before the first page lands.
    pub fn initial_load_complete(&self) -> bool {
        self.initial_load_complete
    }

    /// The page the loader will request next.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Total dataset size as reported by the most recent response.
    pub fn total_users(&self) -> Option<u64> {
        self.total_users
    }

    /// Item count presented to the windowed renderer: the loaded records plus
    /// one trailing placeholder slot while more data may exist.
    pub fn item_count(&self) -> usize {
        self.accumulated.len() + usize::from(self.has_more())
    }
}
