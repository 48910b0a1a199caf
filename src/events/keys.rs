//! Key contexts and their hint lines.

/// The input context that decides which keys are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// The table view.
    Table,
    /// The query form has focus.
    QueryForm,
    /// The descriptions view.
    Descriptions,
    /// The row action menu is open.
    ActionMenu,
}

/// Get the hint line for a context.
///
/// Keys are in brackets so the help bar can highlight them.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Table => {
            "[Tab] view  [j/k] move  [f] filter  [n/p] page  [Enter] show  [y] copy  [m] more  [r] refresh  [q] quit"
        }
        KeyContext::QueryForm => {
            "[Tab] view  [←/→] change  [Enter] search  [x] reset  [Esc] results  [q] quit"
        }
        KeyContext::Descriptions => "[Tab] view  [r] refresh  [q] quit",
        KeyContext::ActionMenu => "[j/k] move  [Enter] select  [Esc] close",
    }
}
