//! View modes and sets of view modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three mutually exclusive presentation styles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Records as table rows.
    #[default]
    List,
    /// A query form above the records table.
    Form,
    /// A single record as labeled fields.
    Descriptor,
}

impl ViewMode {
    /// All modes in tab order.
    pub const ALL: [ViewMode; 3] = [ViewMode::List, ViewMode::Form, ViewMode::Descriptor];

    /// The tab title for this mode.
    pub fn tab_title(&self) -> &'static str {
        match self {
            ViewMode::List => "table",
            ViewMode::Form => "form",
            ViewMode::Descriptor => "descriptions",
        }
    }

    /// Position of this mode in tab order.
    pub fn index(&self) -> usize {
        match self {
            ViewMode::List => 0,
            ViewMode::Form => 1,
            ViewMode::Descriptor => 2,
        }
    }

    /// The next mode in tab order, wrapping around.
    pub fn next(&self) -> ViewMode {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous mode in tab order, wrapping around.
    pub fn previous(&self) -> ViewMode {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tab_title())
    }
}

/// A set of view modes a field is visible in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSet {
    list: bool,
    form: bool,
    descriptor: bool,
}

impl ModeSet {
    /// Visible everywhere.
    pub const ALL: ModeSet = ModeSet::new(true, true, true);
    /// Visible in the table and form views.
    pub const COLLECTION: ModeSet = ModeSet::new(true, true, false);
    /// Visible only in the descriptions view.
    pub const DESCRIPTOR: ModeSet = ModeSet::new(false, false, true);

    /// Create a set from per-mode flags.
    pub const fn new(list: bool, form: bool, descriptor: bool) -> Self {
        Self {
            list,
            form,
            descriptor,
        }
    }

    /// Check whether `mode` is in the set.
    pub fn contains(&self, mode: ViewMode) -> bool {
        match mode {
            ViewMode::List => self.list,
            ViewMode::Form => self.form,
            ViewMode::Descriptor => self.descriptor,
        }
    }
}
