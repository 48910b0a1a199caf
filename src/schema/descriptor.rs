//! Field descriptor types.
//!
//! A [`FieldDescriptor`] states *what* is shown for one issue attribute:
//! its label, where it is visible, how its value is interpreted and how it
//! takes part in filtering. How a value is drawn is left to the UI layer.

use crate::api::types::{Issue, STATE_ALL};
use crate::mode::{ModeSet, ViewMode};

/// How a field's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The value as plain text.
    Text,
    /// The row position as a badge.
    IndexBadge,
    /// An enumerated value shown with a status color.
    Status,
    /// A list of colored tags.
    Tags,
    /// Row action links.
    Actions,
    /// A timestamp.
    Timestamp,
}

/// Visual status of an enumerated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Default,
    Success,
    Error,
    Processing,
    Warning,
}

impl StatusKind {
    /// Get the status name.
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Default => "Default",
            StatusKind::Success => "Success",
            StatusKind::Error => "Error",
            StatusKind::Processing => "Processing",
            StatusKind::Warning => "Warning",
        }
    }

    /// Parse a status name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(StatusKind::Default),
            "success" => Some(StatusKind::Success),
            "error" => Some(StatusKind::Error),
            "processing" => Some(StatusKind::Processing),
            "warning" => Some(StatusKind::Warning),
            _ => None,
        }
    }
}

/// One entry of an enumerated field's value mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueEntry {
    /// The raw value as sent by the server.
    pub value: &'static str,
    /// The text shown for the value.
    pub text: &'static str,
    /// The visual status of the value.
    pub status: StatusKind,
}

impl ValueEntry {
    /// Create a mapping entry.
    pub const fn new(value: &'static str, text: &'static str, status: StatusKind) -> Self {
        Self {
            value,
            text,
            status,
        }
    }
}

/// A field label, optionally different in the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLabel {
    /// The same label in every mode.
    Fixed(&'static str),
    /// One label for the table view and another for the other views.
    PerMode {
        list: &'static str,
        other: &'static str,
    },
}

/// The issue attribute a field reads.
///
/// Every key resolves to an attribute of [`Issue`] or to a value derived
/// from the row (its position, its actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Index,
    Title,
    State,
    Labels,
    Comments,
    CreatedAt,
    ClosedAt,
    Actions,
}

impl FieldKey {
    /// The data key name of this field.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKey::Index => "index",
            FieldKey::Title => "title",
            FieldKey::State => "state",
            FieldKey::Labels => "labels",
            FieldKey::Comments => "comments",
            FieldKey::CreatedAt => "created_at",
            FieldKey::ClosedAt => "closed_at",
            FieldKey::Actions => "option",
        }
    }

    /// The scalar value of this key on `issue`, as text.
    ///
    /// Returns `None` for derived keys, list-valued keys and absent
    /// optional attributes.
    pub fn raw_value(&self, issue: &Issue) -> Option<String> {
        match self {
            FieldKey::Title => Some(issue.title.clone()),
            FieldKey::State => Some(issue.state.as_str().to_string()),
            FieldKey::Comments => Some(issue.comments.to_string()),
            FieldKey::CreatedAt => Some(issue.created_at.to_rfc3339()),
            FieldKey::ClosedAt => issue.closed_at.map(|t| t.to_rfc3339()),
            FieldKey::Index | FieldKey::Labels | FieldKey::Actions => None,
        }
    }
}

/// A declarative rule describing how one issue attribute is labeled,
/// filtered and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field label.
    pub label: FieldLabel,
    /// The attribute this field reads.
    pub key: FieldKey,
    /// How the value is interpreted.
    pub render_mode: RenderMode,
    /// Whether the field appears in the query form.
    pub searchable: bool,
    /// Whether the field has a filter control in the table view.
    pub filterable: bool,
    /// The views this field is visible in.
    pub visible_in: ModeSet,
    /// Value table for enumerated fields, in option order.
    pub value_mapping: Option<&'static [ValueEntry]>,
    /// The initial filter value.
    pub initial_value: Option<&'static str>,
    /// Fixed column width in cells.
    pub width: Option<u16>,
    /// Whether long values are truncated with an ellipsis.
    pub ellipsis: bool,
    /// Whether the value can be copied to the clipboard.
    pub copyable: bool,
}

impl FieldDescriptor {
    /// Create a descriptor visible everywhere with no search or filter.
    pub const fn new(label: &'static str, key: FieldKey, render_mode: RenderMode) -> Self {
        Self {
            label: FieldLabel::Fixed(label),
            key,
            render_mode,
            searchable: false,
            filterable: false,
            visible_in: ModeSet::ALL,
            value_mapping: None,
            initial_value: None,
            width: None,
            ellipsis: false,
            copyable: false,
        }
    }

    pub const fn label_per_mode(self, list: &'static str, other: &'static str) -> Self {
        Self {
            label: FieldLabel::PerMode { list, other },
            ..self
        }
    }

    pub const fn searchable(self) -> Self {
        Self {
            searchable: true,
            ..self
        }
    }

    pub const fn filterable(self) -> Self {
        Self {
            filterable: true,
            ..self
        }
    }

    pub const fn visible_in(self, visible_in: ModeSet) -> Self {
        Self { visible_in, ..self }
    }

    pub const fn mapping(self, mapping: &'static [ValueEntry]) -> Self {
        Self {
            value_mapping: Some(mapping),
            ..self
        }
    }

    pub const fn initial(self, value: &'static str) -> Self {
        Self {
            initial_value: Some(value),
            ..self
        }
    }

    pub const fn width(self, width: u16) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    pub const fn ellipsis(self) -> Self {
        Self {
            ellipsis: true,
            ..self
        }
    }

    pub const fn copyable(self) -> Self {
        Self {
            copyable: true,
            ..self
        }
    }

    /// The label shown for this field in `mode`.
    pub fn label_for(&self, mode: ViewMode) -> &'static str {
        match self.label {
            FieldLabel::Fixed(label) => label,
            FieldLabel::PerMode { list, other } => {
                if mode == ViewMode::List {
                    list
                } else {
                    other
                }
            }
        }
    }

    /// Check whether the field is visible in `mode`.
    pub fn is_visible_in(&self, mode: ViewMode) -> bool {
        self.visible_in.contains(mode)
    }

    /// Look up the mapping entry for a raw value.
    pub fn lookup(&self, value: &str) -> Option<&'static ValueEntry> {
        self.value_mapping?.iter().find(|entry| entry.value == value)
    }

    /// The options offered by this field's filter control.
    pub fn filter_options(&self) -> &'static [ValueEntry] {
        self.value_mapping.unwrap_or(&[])
    }

    /// Check whether `issue` passes this field's filter set to `selected`.
    ///
    /// The `all` value, and any value on a field without a scalar value,
    /// matches every issue.
    pub fn matches_filter(&self, issue: &Issue, selected: &str) -> bool {
        if selected == STATE_ALL {
            return true;
        }
        match self.key.raw_value(issue) {
            Some(value) => value == selected,
            None => true,
        }
    }
}
