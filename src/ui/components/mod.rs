//! Reusable UI components.

mod action_menu;
mod help_bar;
mod loading;
mod notification;
mod tabs;

pub use action_menu::{ActionMenu, ActionMenuAction};
pub use help_bar::render_context_help;
pub use loading::LoadingIndicator;
pub use notification::NotificationManager;
#[cfg(test)]
pub use notification::NotificationType;
pub use tabs::render_tabs;
