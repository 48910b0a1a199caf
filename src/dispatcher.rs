//! View dispatcher: the active view mode and the fetches it drives.
//!
//! The dispatcher owns the only mutable mode state in the application. Every
//! transition returns the [`FetchRequest`] the new state needs, stamped with
//! a fresh [`RequestTicket`]. Responses are applied only when their ticket is
//! the latest one issued for the active mode, so a slow response from an
//! abandoned view can never overwrite the current one.

use tracing::{debug, trace};

use crate::api::types::IssueQuery;
use crate::mode::ViewMode;

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    id: u64,
    mode: ViewMode,
}

impl RequestTicket {
    /// The sequence number of the request.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The mode the request was issued for.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }
}

/// Which fetch function a mode is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// A page of records.
    Collection,
    /// The first record of the default page.
    Single,
}

impl FetchKind {
    /// The fetch kind a mode uses.
    pub fn for_mode(mode: ViewMode) -> Self {
        match mode {
            ViewMode::List | ViewMode::Form => FetchKind::Collection,
            ViewMode::Descriptor => FetchKind::Single,
        }
    }
}

/// A fetch the event loop should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The ticket the response must carry.
    pub ticket: RequestTicket,
    /// Which fetch function to call.
    pub kind: FetchKind,
    /// The query parameters.
    pub query: IssueQuery,
}

/// Holds the active view mode and the current query.
#[derive(Debug)]
pub struct ViewDispatcher {
    /// The active mode.
    mode: ViewMode,
    /// The query for collection fetches.
    query: IssueQuery,
    /// Page size used to rebuild queries.
    page_size: u32,
    /// Sequence number of the next ticket.
    next_id: u64,
    /// The latest ticket that has not been answered yet.
    pending: Option<RequestTicket>,
}

impl ViewDispatcher {
    /// Create a dispatcher starting in `mode`.
    pub fn new(mode: ViewMode, page_size: u32) -> Self {
        Self {
            mode,
            query: IssueQuery::new(page_size),
            page_size,
            next_id: 1,
            pending: None,
        }
    }

    /// The active mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The current collection query.
    pub fn query(&self) -> &IssueQuery {
        &self.query
    }

    /// Whether a fetch for the active mode is outstanding.
    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Emit the fetch for the active mode (used on startup).
    pub fn activate(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Switch to `mode`.
    ///
    /// Selecting the active mode does nothing. Any other selection resets
    /// pagination and always issues a new fetch.
    pub fn select(&mut self, mode: ViewMode) -> Option<FetchRequest> {
        if mode == self.mode {
            trace!(mode = %mode, "Mode already active");
            return None;
        }
        debug!(from = %self.mode, to = %mode, "Switching view mode");
        self.mode = mode;
        self.query.current = 1;
        Some(self.issue())
    }

    /// Re-fetch the active mode's data.
    pub fn refresh(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Set the state filter and go back to the first page.
    pub fn set_state_filter(&mut self, value: &str) -> FetchRequest {
        debug!(state = %value, "Applying state filter");
        self.query.state = value.to_string();
        self.query.current = 1;
        self.issue()
    }

    /// Restore the initial query.
    pub fn reset_query(&mut self) -> FetchRequest {
        self.query = IssueQuery::new(self.page_size);
        self.issue()
    }

    /// Go to the next page if `total` records leave one.
    pub fn next_page(&mut self, total: u32) -> Option<FetchRequest> {
        if self.query.current >= self.query.page_count(total) {
            return None;
        }
        self.query.current += 1;
        Some(self.issue())
    }

    /// Go to the previous page unless on the first.
    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        if self.query.current <= 1 {
            return None;
        }
        self.query.current -= 1;
        Some(self.issue())
    }

    /// Decide whether the response for `ticket` may be applied.
    ///
    /// Only the latest ticket issued for the active mode is accepted;
    /// accepting it clears the outstanding request.
    pub fn accept(&mut self, ticket: RequestTicket) -> bool {
        if self.pending == Some(ticket) && ticket.mode == self.mode {
            self.pending = None;
            true
        } else {
            debug!(
                ticket = ticket.id,
                mode = %ticket.mode,
                "Dropping stale response"
            );
            false
        }
    }

    /// Stamp a new request for the active mode.
    fn issue(&mut self) -> FetchRequest {
        let ticket = RequestTicket {
            id: self.next_id,
            mode: self.mode,
        };
        self.next_id += 1;
        self.pending = Some(ticket);

        let kind = FetchKind::for_mode(self.mode);
        let query = match kind {
            FetchKind::Collection => self.query.clone(),
            FetchKind::Single => IssueQuery::new(self.page_size),
        };
        trace!(ticket = ticket.id, kind = ?kind, "Issuing fetch");
        FetchRequest {
            ticket,
            kind,
            query,
        }
    }
}
