//! The issue schema and field resolution.

use thiserror::Error;

use super::descriptor::{FieldDescriptor, FieldKey, RenderMode, StatusKind, ValueEntry};
use crate::api::types::{Issue, STATE_ALL};
use crate::mode::{ModeSet, ViewMode};

/// Value mapping of the issue state field.
///
/// Also the fixed option set of the state filter.
pub const STATE_MAPPING: &[ValueEntry] = &[
    ValueEntry::new(STATE_ALL, "Default", StatusKind::Default),
    ValueEntry::new("open", "Error", StatusKind::Error),
    ValueEntry::new("closed", "Success", StatusKind::Success),
];

/// Field descriptors of the issue schema, in display order.
pub static ISSUE_FIELDS: [FieldDescriptor; 8] = [
    FieldDescriptor::new("index", FieldKey::Index, RenderMode::IndexBadge).width(5),
    FieldDescriptor::new("title", FieldKey::Title, RenderMode::Text)
        .ellipsis()
        .copyable(),
    FieldDescriptor::new("state", FieldKey::State, RenderMode::Status)
        .label_per_mode("status", "list status")
        .searchable()
        .filterable()
        .mapping(STATE_MAPPING)
        .initial(STATE_ALL)
        .width(12),
    FieldDescriptor::new("labels", FieldKey::Labels, RenderMode::Tags).width(24),
    FieldDescriptor::new("comments", FieldKey::Comments, RenderMode::Text)
        .visible_in(ModeSet::DESCRIPTOR),
    FieldDescriptor::new("created at", FieldKey::CreatedAt, RenderMode::Timestamp)
        .visible_in(ModeSet::DESCRIPTOR),
    FieldDescriptor::new("closed at", FieldKey::ClosedAt, RenderMode::Timestamp)
        .visible_in(ModeSet::DESCRIPTOR),
    FieldDescriptor::new("option", FieldKey::Actions, RenderMode::Actions)
        .visible_in(ModeSet::COLLECTION)
        .width(16),
];

/// A descriptor list that breaks a schema invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A status field cannot display one of the known issue states.
    #[error("field '{field}' has no mapping for '{state}'")]
    MissingStateMapping {
        field: &'static str,
        state: &'static str,
    },

    /// A filterable field has nothing to offer in its filter control.
    #[error("filterable field '{0}' has no options")]
    NoFilterOptions(&'static str),

    /// The initial filter value is not one of the field's options.
    #[error("field '{field}' has initial value '{value}' outside its mapping")]
    UnknownInitialValue {
        field: &'static str,
        value: &'static str,
    },
}

/// The single source of truth mapping issue attributes to presentation
/// rules, shared by every view.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldDescriptor],
}

impl Schema {
    /// The issue schema.
    pub fn issues() -> Self {
        Self::new(&ISSUE_FIELDS)
    }

    /// Create a schema over an arbitrary descriptor list.
    pub fn new(fields: &'static [FieldDescriptor]) -> Self {
        Self { fields }
    }

    /// All descriptors in declaration order.
    #[cfg(test)]
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// The descriptors visible in `mode`, in declaration order.
    pub fn resolve_fields(&self, mode: ViewMode) -> Vec<&'static FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.is_visible_in(mode))
            .collect()
    }

    /// The descriptors that get a filter control in `mode`.
    pub fn filterable_fields(&self, mode: ViewMode) -> Vec<&'static FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.filterable && field.is_visible_in(mode))
            .collect()
    }

    /// The descriptors that make up the query form.
    pub fn search_fields(&self) -> Vec<&'static FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.searchable && field.is_visible_in(ViewMode::Form))
            .collect()
    }

    /// Find the descriptor for `key`.
    pub fn field(&self, key: FieldKey) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// The text copied for `issue` in `mode`: the value of the first
    /// copyable field visible there.
    pub fn copy_text(&self, mode: ViewMode, issue: &Issue) -> Option<String> {
        self.resolve_fields(mode)
            .into_iter()
            .find(|field| field.copyable)
            .and_then(|field| field.key.raw_value(issue))
    }

    /// Check whether `issue` passes every filter in `selected`.
    pub fn matches(&self, issue: &Issue, selected: &[(FieldKey, String)]) -> bool {
        selected.iter().all(|(key, value)| {
            self.field(*key)
                .map_or(true, |field| field.matches_filter(issue, value))
        })
    }

    /// Check the schema's invariants.
    ///
    /// Status fields need a value mapping that covers the `open` and
    /// `closed` states, and filterable fields need options to offer.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for field in self.fields {
            let name = field.key.name();
            if field.render_mode == RenderMode::Status {
                for state in ["open", "closed"] {
                    if field.lookup(state).is_none() {
                        return Err(SchemaError::MissingStateMapping { field: name, state });
                    }
                }
            }
            if field.filterable && field.filter_options().is_empty() {
                return Err(SchemaError::NoFilterOptions(name));
            }
            if let Some(initial) = field.initial_value {
                if field.lookup(initial).is_none() {
                    return Err(SchemaError::UnknownInitialValue {
                        field: name,
                        value: initial,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::issues()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::fixtures;

    fn keys(fields: &[&FieldDescriptor]) -> Vec<FieldKey> {
        fields.iter().map(|f| f.key).collect()
    }

    #[test]
    fn test_issue_schema_is_valid() {
        assert!(Schema::issues().validate().is_ok());
    }

    #[test]
    fn test_resolve_list_fields() {
        let fields = Schema::issues().resolve_fields(ViewMode::List);
        assert_eq!(
            keys(&fields),
            vec![
                FieldKey::Index,
                FieldKey::Title,
                FieldKey::State,
                FieldKey::Labels,
                FieldKey::Actions
            ]
        );
    }

    #[test]
    fn test_resolve_descriptor_fields() {
        let fields = Schema::issues().resolve_fields(ViewMode::Descriptor);
        assert_eq!(
            keys(&fields),
            vec![
                FieldKey::Index,
                FieldKey::Title,
                FieldKey::State,
                FieldKey::Labels,
                FieldKey::Comments,
                FieldKey::CreatedAt,
                FieldKey::ClosedAt
            ]
        );
    }

    #[test]
    fn test_resolve_never_includes_hidden_fields() {
        let schema = Schema::issues();
        for mode in ViewMode::ALL {
            for field in schema.resolve_fields(mode) {
                assert!(field.visible_in.contains(mode));
            }
            let hidden = schema
                .fields()
                .iter()
                .filter(|f| !f.visible_in.contains(mode))
                .count();
            assert_eq!(schema.resolve_fields(mode).len() + hidden, schema.fields().len());
        }
    }

    #[test]
    fn test_resolve_preserves_declaration_order() {
        let schema = Schema::issues();
        let positions: Vec<usize> = schema
            .resolve_fields(ViewMode::Form)
            .iter()
            .map(|f| schema.fields().iter().position(|g| g.key == f.key).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_state_filter_options_fixed() {
        let schema = Schema::issues();
        let filters = schema.filterable_fields(ViewMode::List);
        assert_eq!(filters.len(), 1);
        let values: Vec<&str> = filters[0].filter_options().iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["all", "open", "closed"]);
        assert_eq!(filters[0].initial_value, Some("all"));
    }

    #[test]
    fn test_search_fields() {
        let fields = Schema::issues().search_fields();
        assert_eq!(keys(&fields), vec![FieldKey::State]);
    }

    #[test]
    fn test_matches_selected_filters() {
        let schema = Schema::issues();
        let open = fixtures::issue(1, "open", vec![]);
        let closed = fixtures::issue(2, "closed", vec![]);
        let selected = vec![(FieldKey::State, "open".to_string())];

        assert!(schema.matches(&open, &selected));
        assert!(!schema.matches(&closed, &selected));
        assert!(schema.matches(&closed, &[]));
    }

    #[test]
    fn test_title_is_the_only_copyable_field() {
        let schema = Schema::issues();
        let copyable: Vec<FieldKey> = schema
            .fields()
            .iter()
            .filter(|f| f.copyable)
            .map(|f| f.key)
            .collect();
        assert_eq!(copyable, vec![FieldKey::Title]);
    }

    #[test]
    fn test_copy_text_uses_copyable_field() {
        let schema = Schema::issues();
        let issue = fixtures::issue(4, "open", vec![]);
        assert_eq!(
            schema.copy_text(ViewMode::List, &issue).as_deref(),
            Some("Issue 4")
        );

        static NOTHING_COPYABLE: [FieldDescriptor; 1] =
            [FieldDescriptor::new("title", FieldKey::Title, RenderMode::Text)];
        assert!(Schema::new(&NOTHING_COPYABLE)
            .copy_text(ViewMode::List, &issue)
            .is_none());
    }

    #[test]
    fn test_validate_rejects_incomplete_mapping() {
        const OPEN_ONLY: &[ValueEntry] = &[ValueEntry::new("open", "Error", StatusKind::Error)];
        static BROKEN: [FieldDescriptor; 1] =
            [FieldDescriptor::new("state", FieldKey::State, RenderMode::Status).mapping(OPEN_ONLY)];

        let err = Schema::new(&BROKEN).validate().unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingStateMapping {
                field: "state",
                state: "closed"
            }
        );
        assert_eq!(err.to_string(), "field 'state' has no mapping for 'closed'");
    }

    #[test]
    fn test_validate_rejects_filter_without_options() {
        static NO_OPTIONS: [FieldDescriptor; 1] =
            [FieldDescriptor::new("title", FieldKey::Title, RenderMode::Text).filterable()];

        assert_eq!(
            Schema::new(&NO_OPTIONS).validate(),
            Err(SchemaError::NoFilterOptions("title"))
        );
    }

    #[test]
    fn test_validate_rejects_unknown_initial_value() {
        static BAD_INITIAL: [FieldDescriptor; 1] = [FieldDescriptor::new(
            "state",
            FieldKey::State,
            RenderMode::Status,
        )
        .mapping(STATE_MAPPING)
        .initial("merged")];

        assert_eq!(
            Schema::new(&BAD_INITIAL).validate(),
            Err(SchemaError::UnknownInitialValue {
                field: "state",
                value: "merged"
            })
        );
    }
}
