//! Issue API request and response types.
//!
//! These types model the issue collection endpoint: the `{ data, ... }`
//! envelope, the GitHub-style issue records inside it, and the query
//! parameters that drive it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter value that matches every issue state.
pub const STATE_ALL: &str = "all";

/// Default number of issues per page.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// The state of an issue.
///
/// The server may send states this client does not know about; those are
/// kept verbatim in `Other` so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueState {
    /// The issue is open.
    Open,
    /// The issue has been closed.
    Closed,
    /// Any other state reported by the server.
    Other(String),
}

impl IssueState {
    /// Get the wire representation of this state.
    pub fn as_str(&self) -> &str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for IssueState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "open" => IssueState::Open,
            "closed" => IssueState::Closed,
            _ => IssueState::Other(value),
        }
    }
}

impl From<&str> for IssueState {
    fn from(value: &str) -> Self {
        IssueState::from(value.to_string())
    }
}

impl From<IssueState> for String {
    fn from(state: IssueState) -> Self {
        match state {
            IssueState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The label name.
    pub name: String,
    /// The label color (a color name, a status name or a hex code).
    #[serde(default)]
    pub color: String,
}

#[cfg(test)]
impl Label {
    /// Create a new label.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A GitHub-style issue.
///
/// Issues are read-only: they are created by the remote data source and
/// only ever held as transient copies of the last fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// The canonical URL of the issue.
    #[serde(default)]
    pub url: String,
    /// The unique issue ID.
    pub id: u64,
    /// The issue number within its repository.
    #[serde(default)]
    pub number: u64,
    /// The issue title.
    pub title: String,
    /// Labels attached to the issue, in server order.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// The issue state.
    pub state: IssueState,
    /// Number of comments.
    #[serde(default)]
    pub comments: u32,
    /// When the issue was created.
    pub created_at: DateTime<Utc>,
    /// When the issue was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the issue was closed, if it has been.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.number, self.title)
    }
}

/// The response envelope of the issue collection endpoint.
///
/// Only `data` is required; the pagination fields are optional because the
/// endpoint does not always send them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueEnvelope {
    /// The issues on this page.
    #[serde(default)]
    pub data: Vec<Issue>,
    /// Total number of matching issues.
    #[serde(default)]
    pub total: Option<u32>,
    /// Whether the server reported success.
    #[serde(default)]
    pub success: Option<bool>,
    /// The page number of this response.
    #[serde(default)]
    pub page: Option<u32>,
    /// The page size of this response.
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl IssueEnvelope {
    /// Total number of matching issues, falling back to the page length.
    pub fn total(&self) -> u32 {
        self.total.unwrap_or(self.data.len() as u32)
    }

    /// Consume the envelope and keep only its first record.
    pub fn into_first(self) -> Option<Issue> {
        self.data.into_iter().next()
    }
}

/// Query parameters for the issue collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// The state filter (`all`, `open` or `closed`).
    pub state: String,
    /// The 1-based page number.
    pub current: u32,
    /// The number of issues per page.
    pub page_size: u32,
}

impl IssueQuery {
    /// Create a query for the first page with the `all` state filter.
    pub fn new(page_size: u32) -> Self {
        Self {
            state: STATE_ALL.to_string(),
            current: 1,
            page_size,
        }
    }

    /// Build the query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        format!(
            "current={}&pageSize={}&state={}",
            self.current,
            self.page_size,
            urlencoding::encode(&self.state)
        )
    }

    /// Number of pages needed for `total` issues.
    pub fn page_count(&self, total: u32) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = (u64::from(total) + u64::from(self.page_size) - 1) / u64::from(self.page_size);
        pages.max(1) as u32
    }
}

impl Default for IssueQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build an issue with the given id and state for tests.
    pub fn issue(id: u64, state: &str, labels: Vec<Label>) -> Issue {
        let created = DateTime::parse_from_rfc3339("2020-05-26T09:42:56Z")
            .unwrap()
            .with_timezone(&Utc);
        Issue {
            url: format!("https://github.com/ant-design/ant-design/issues/{}", id),
            id,
            number: id + 1000,
            title: format!("Issue {}", id),
            labels,
            state: IssueState::from(state),
            comments: 2,
            created_at: created,
            updated_at: created,
            closed_at: None,
        }
    }
}
