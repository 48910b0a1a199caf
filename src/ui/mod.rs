//! User interface components and views.
//!
//! Everything that draws lives here. Views receive schema descriptors and
//! rendered values and decide how they look on the terminal.

pub mod cells;
mod components;
pub mod theme;
mod views;

pub use components::{
    render_context_help, render_tabs, ActionMenu, ActionMenuAction, LoadingIndicator,
    NotificationManager,
};
#[cfg(test)]
pub use components::NotificationType;
pub use theme::Theme;
pub use views::{
    render_descriptions, QueryFormAction, QueryFormView, TableAction, TableContext, TableView,
};
