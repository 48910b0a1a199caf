//! Async task management for non-blocking fetches.
//!
//! Fetches run in background tasks while the UI keeps rendering. Results
//! come back to the main loop through an unbounded channel:
//! 1. The app queues a [`FetchRequest`] after a state transition
//! 2. The main loop hands it to [`TaskSpawner::spawn_fetch`]
//! 3. The task sends an [`ApiMessage`] carrying the request's ticket
//! 4. The main loop polls the channel with `try_recv()` and passes the
//!    message to the app, which drops it if the ticket is stale

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, Instrument};

use crate::api::error::ApiError;
use crate::api::types::{Issue, IssueEnvelope};
use crate::api::IssuesClient;
use crate::dispatcher::{FetchKind, FetchRequest, RequestTicket};

/// Messages sent from background tasks to the main loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// A page of issues for the table or form view.
    IssuesFetched {
        ticket: RequestTicket,
        result: Result<IssueEnvelope, ApiError>,
    },

    /// The single record for the descriptions view.
    RecordFetched {
        ticket: RequestTicket,
        result: Result<Option<Issue>, ApiError>,
    },
}

impl ApiMessage {
    /// The ticket of the request this message answers.
    pub fn ticket(&self) -> RequestTicket {
        match self {
            ApiMessage::IssuesFetched { ticket, .. } | ApiMessage::RecordFetched { ticket, .. } => {
                *ticket
            }
        }
    }
}

/// Spawns background fetch tasks.
///
/// Only the latest fetch is of interest, so spawning a new one aborts the
/// previous task if it is still running.
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
    in_flight: Option<JoinHandle<()>>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self {
            tx,
            in_flight: None,
        }
    }

    /// Spawn the fetch described by `request`.
    pub fn spawn_fetch(&mut self, client: &IssuesClient, request: FetchRequest) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("Aborting superseded fetch");
                handle.abort();
            }
        }

        let tx = self.tx.clone();
        let client = client.clone();
        let FetchRequest {
            ticket,
            kind,
            query,
        } = request;
        let span = tracing::debug_span!("fetch", ticket = ticket.id(), mode = %ticket.mode());

        let handle = tokio::spawn(
            async move {
                let message = match kind {
                    FetchKind::Collection => ApiMessage::IssuesFetched {
                        ticket,
                        result: client.fetch_issues(&query).await,
                    },
                    FetchKind::Single => ApiMessage::RecordFetched {
                        ticket,
                        result: client.fetch_first(&query).await,
                    },
                };
                let _ = tx.send(message);
            }
            .instrument(span),
        );
        self.in_flight = Some(handle);
    }
}

/// Create a new task channel and spawner.
///
/// Returns the receiver for the main loop and the spawner for issuing tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
