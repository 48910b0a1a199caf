//! Value rendering: turning an issue attribute into a renderable value.
//!
//! The output is a plain description of what to show. Turning it into
//! terminal cells is the job of `ui::cells`.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::descriptor::{FieldDescriptor, FieldKey, RenderMode, StatusKind};
use crate::api::types::Issue;

/// Format used for timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A tag in a tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The tag text, unique within its list.
    pub name: String,
    /// The tag color as sent by the server.
    pub color: String,
}

/// An entry of the secondary row action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Copy,
    Delete,
}

impl MenuItem {
    /// All menu entries in display order.
    pub const ALL: [MenuItem; 2] = [MenuItem::Copy, MenuItem::Delete];

    /// The key reported when the entry is selected.
    pub fn key(&self) -> &'static str {
        match self {
            MenuItem::Copy => "copy",
            MenuItem::Delete => "delete",
        }
    }
}

/// An action attached to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// External link to the record's canonical URL.
    Show { url: String },
    /// Secondary action menu.
    Menu(Vec<MenuItem>),
}

/// A renderable field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedValue {
    /// Nothing to show.
    Empty,
    /// Plain text.
    Text(String),
    /// A 1-based row position.
    Index(usize),
    /// An enumerated value with its visual status.
    Status { text: String, status: StatusKind },
    /// Colored tags.
    Tags(Vec<Tag>),
    /// Row actions.
    Actions(Vec<RowAction>),
}

impl RenderedValue {
    /// Check whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        match self {
            RenderedValue::Empty => true,
            RenderedValue::Text(text) => text.is_empty(),
            RenderedValue::Tags(tags) => tags.is_empty(),
            RenderedValue::Actions(actions) => actions.is_empty(),
            RenderedValue::Index(_) | RenderedValue::Status { .. } => false,
        }
    }
}

/// Render one field of `issue`.
///
/// `position` is the 1-based row position used by index badges. Values
/// that cannot be interpreted never fail: an enumerated value missing from
/// the mapping is shown with the default status.
pub fn render_value(field: &FieldDescriptor, issue: &Issue, position: usize) -> RenderedValue {
    match field.render_mode {
        RenderMode::IndexBadge => RenderedValue::Index(position),
        RenderMode::Text => field
            .key
            .raw_value(issue)
            .map_or(RenderedValue::Empty, RenderedValue::Text),
        RenderMode::Status => render_status(field, issue),
        RenderMode::Tags => render_tags(field.key, issue),
        RenderMode::Timestamp => render_timestamp(field.key, issue),
        RenderMode::Actions => RenderedValue::Actions(vec![
            RowAction::Show {
                url: issue.url.clone(),
            },
            RowAction::Menu(MenuItem::ALL.to_vec()),
        ]),
    }
}

fn render_status(field: &FieldDescriptor, issue: &Issue) -> RenderedValue {
    let Some(raw) = field.key.raw_value(issue) else {
        return RenderedValue::Status {
            text: StatusKind::Default.name().to_string(),
            status: StatusKind::Default,
        };
    };

    match field.lookup(&raw) {
        Some(entry) => RenderedValue::Status {
            text: entry.text.to_string(),
            status: entry.status,
        },
        None => RenderedValue::Status {
            text: raw,
            status: StatusKind::Default,
        },
    }
}

fn render_tags(key: FieldKey, issue: &Issue) -> RenderedValue {
    if key != FieldKey::Labels {
        return RenderedValue::Empty;
    }

    let mut seen = HashSet::new();
    let tags = issue
        .labels
        .iter()
        .filter(|label| seen.insert(label.name.as_str()))
        .map(|label| Tag {
            name: label.name.clone(),
            color: label.color.clone(),
        })
        .collect();
    RenderedValue::Tags(tags)
}

fn render_timestamp(key: FieldKey, issue: &Issue) -> RenderedValue {
    let timestamp: Option<DateTime<Utc>> = match key {
        FieldKey::CreatedAt => Some(issue.created_at),
        FieldKey::ClosedAt => issue.closed_at,
        _ => None,
    };
    timestamp.map_or(RenderedValue::Empty, |t| {
        RenderedValue::Text(t.format(TIMESTAMP_FORMAT).to_string())
    })
}
