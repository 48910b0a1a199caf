//! Main application state.
//!
//! This module implements The Elm Architecture (TEA): [`App`] is the model,
//! [`App::update`] and [`App::handle_api_message`] are the update functions
//! and [`App::view`] draws the model. Side effects (network fetches, opening
//! links, clipboard writes) are queued on the model and carried out by the
//! main loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::api::types::{Issue, IssueQuery};
use crate::dispatcher::{FetchRequest, ViewDispatcher};
use crate::error::AppError;
use crate::events::{Event, KeyContext};
use crate::mode::ViewMode;
use crate::schema::{FieldKey, Schema};
use crate::tasks::ApiMessage;
use crate::ui::{
    render_context_help, render_descriptions, render_tabs, ActionMenu, ActionMenuAction,
    LoadingIndicator, NotificationManager, QueryFormAction, QueryFormView, TableAction,
    TableContext, TableView, Theme,
};

/// The main application struct that holds all state.
pub struct App {
    /// Active mode, current query and request tickets.
    dispatcher: ViewDispatcher,
    /// The field schema shared by every view.
    schema: Schema,
    theme: Theme,
    /// The last accepted page of issues.
    issues: Vec<Issue>,
    /// Total reported with the last accepted page.
    total: u32,
    /// The last accepted single record.
    record: Option<Issue>,
    table_view: TableView,
    query_form: QueryFormView,
    /// Whether the query form (rather than the table) has focus in form mode.
    form_focus: bool,
    action_menu: ActionMenu,
    notifications: NotificationManager,
    loading: LoadingIndicator,
    /// Whether the last accepted fetch failed.
    fetch_failed: bool,
    /// The fetch the main loop should start next.
    pending_fetch: Option<FetchRequest>,
    /// A URL the main loop should open in the browser.
    pending_open: Option<String>,
    /// Text the main loop should put on the clipboard.
    pending_copy: Option<String>,
    should_quit: bool,
}

impl App {
    /// Create the application in `mode` and queue its first fetch.
    pub fn new(mode: ViewMode, page_size: u32) -> Self {
        debug!(mode = %mode, page_size, "Creating application");
        let schema = Schema::issues();
        let mut app = Self {
            dispatcher: ViewDispatcher::new(mode, page_size),
            query_form: QueryFormView::new(&schema),
            schema,
            theme: Theme::default(),
            issues: Vec::new(),
            total: 0,
            record: None,
            table_view: TableView::new(),
            form_focus: mode == ViewMode::Form,
            action_menu: ActionMenu::new(),
            notifications: NotificationManager::new(),
            loading: LoadingIndicator::new(),
            fetch_failed: false,
            pending_fetch: None,
            pending_open: None,
            pending_copy: None,
            should_quit: false,
        };
        let request = app.dispatcher.activate();
        app.queue(request);
        app
    }

    /// The active view mode.
    pub fn mode(&self) -> ViewMode {
        self.dispatcher.mode()
    }

    /// The current collection query.
    #[cfg(test)]
    pub fn query(&self) -> &IssueQuery {
        self.dispatcher.query()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The issues currently shown in the table.
    pub fn displayed_issues(&self) -> Vec<&Issue> {
        visible_issues(&self.schema, self.dispatcher.query(), &self.issues)
    }

    /// The record shown in the descriptions view.
    #[cfg(test)]
    pub fn record(&self) -> Option<&Issue> {
        self.record.as_ref()
    }

    /// Total reported with the last accepted page.
    #[cfg(test)]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[cfg(test)]
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Check if a fetch for the active mode is outstanding.
    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    /// Take the fetch queued by the last state transition.
    pub fn take_pending_fetch(&mut self) -> Option<FetchRequest> {
        self.pending_fetch.take()
    }

    /// Take the URL queued by a `show` action.
    pub fn take_pending_open(&mut self) -> Option<String> {
        self.pending_open.take()
    }

    /// Take the text queued by a copy key.
    pub fn take_pending_copy(&mut self) -> Option<String> {
        self.pending_copy.take()
    }

    /// Report the outcome of a clipboard write.
    pub fn copy_finished(&mut self, result: Result<(), AppError>) {
        match result {
            Ok(()) => self.notifications.success("Copied to clipboard"),
            Err(e) => self.handle_error(&e),
        }
    }

    /// Report an error as a transient notice.
    ///
    /// Errors that may clear up on retry are shown as warnings.
    pub fn handle_error(&mut self, error: &AppError) {
        let recoverable = error.is_recoverable();
        warn!(error = %error, recoverable, "Reporting error");
        if recoverable {
            self.notifications.warning(error.user_message());
        } else {
            self.notifications.error(error.user_message());
        }
        if let Some(action) = error.suggested_action() {
            self.notifications.info(action);
        }
    }

    /// Record the outcome of an accepted fetch.
    fn fetch_succeeded(&mut self) {
        if std::mem::take(&mut self.fetch_failed) {
            self.notifications.success("Connection restored");
        }
    }

    fn queue(&mut self, request: FetchRequest) {
        trace!(ticket = request.ticket.id(), "Queueing fetch");
        self.pending_fetch = Some(request);
        self.loading.start();
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
                self.notifications.tick();
            }
        }
    }

    /// Apply a fetch result from a background task.
    ///
    /// Responses for an outdated request or another mode are dropped. A
    /// failed fetch raises a notice and keeps the data already on screen.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        if !self.dispatcher.accept(message.ticket()) {
            return;
        }
        self.loading.stop();

        match message {
            ApiMessage::IssuesFetched {
                result: Ok(envelope),
                ..
            } => {
                debug!(count = envelope.data.len(), "Issues loaded");
                self.fetch_succeeded();
                self.total = envelope.total();
                self.issues = envelope.data;
                let shown = self.displayed_issues().len();
                self.table_view.clamp(shown);
            }
            ApiMessage::RecordFetched {
                result: Ok(record), ..
            } => {
                debug!(found = record.is_some(), "Record loaded");
                self.fetch_succeeded();
                self.record = record;
            }
            ApiMessage::IssuesFetched { result: Err(e), .. }
            | ApiMessage::RecordFetched { result: Err(e), .. } => {
                self.fetch_failed = true;
                self.handle_error(&AppError::from(e));
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // The menu captures every key while open
        if self.action_menu.is_visible() {
            if let Some(ActionMenuAction::Select { item, number }) =
                self.action_menu.handle_input(key)
            {
                info!(action = item.key(), number, "Row menu action");
                self.notifications.info(format!("{}: #{}", item.key(), number));
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Tab, _) => {
                self.select_mode(self.mode().next());
                return;
            }
            (KeyCode::BackTab, _) => {
                self.select_mode(self.mode().previous());
                return;
            }
            _ => {}
        }

        match self.mode() {
            ViewMode::Form if self.form_focus => self.handle_form_key(key),
            ViewMode::List | ViewMode::Form => self.handle_table_key(key),
            ViewMode::Descriptor => {
                if let (KeyCode::Char('r'), KeyModifiers::NONE) = (key.code, key.modifiers) {
                    let request = self.dispatcher.refresh();
                    self.queue(request);
                }
            }
        }
    }

    fn select_mode(&mut self, mode: ViewMode) {
        let Some(request) = self.dispatcher.select(mode) else {
            return;
        };
        // The page was reset; rows from the old page would sit under a page 1 toolbar
        self.issues.clear();
        self.total = 0;
        self.table_view.clamp(0);
        if mode == ViewMode::Form {
            self.form_focus = true;
            let state = self.dispatcher.query().state.clone();
            self.query_form.set_value(FieldKey::State, &state);
        }
        self.queue(request);
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.form_focus = false;
            return;
        }
        match self.query_form.handle_input(key) {
            Some(QueryFormAction::Submit(values)) => {
                for (field, value) in values {
                    if field == FieldKey::State {
                        let request = self.dispatcher.set_state_filter(&value);
                        self.queue(request);
                    }
                }
            }
            Some(QueryFormAction::Reset) => {
                let request = self.dispatcher.reset_query();
                self.queue(request);
            }
            None => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) if self.mode() == ViewMode::Form => {
                self.form_focus = true;
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                let request = self.dispatcher.refresh();
                self.queue(request);
            }
            (KeyCode::Char('f'), KeyModifiers::NONE) => self.cycle_filter(),
            (KeyCode::Char('n'), KeyModifiers::NONE) => {
                if let Some(request) = self.dispatcher.next_page(self.total) {
                    self.queue(request);
                }
            }
            (KeyCode::Char('p'), KeyModifiers::NONE) => {
                if let Some(request) = self.dispatcher.prev_page() {
                    self.queue(request);
                }
            }
            (KeyCode::Char('y'), KeyModifiers::NONE) => self.copy_selected(),
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                debug!("Add pressed; creating issues is not supported");
            }
            _ => {
                let rows = visible_issues(&self.schema, self.dispatcher.query(), &self.issues);
                match self.table_view.handle_input(key, &rows) {
                    Some(TableAction::Show(url)) => {
                        debug!(url = %url, "Opening issue");
                        self.pending_open = Some(url);
                    }
                    Some(TableAction::OpenMenu { number, items }) => {
                        self.action_menu.show(number, items);
                    }
                    None => {}
                }
            }
        }
    }

    /// Queue the copyable value of the selected row.
    fn copy_selected(&mut self) {
        let rows = visible_issues(&self.schema, self.dispatcher.query(), &self.issues);
        let text = self
            .table_view
            .selected_issue(&rows)
            .and_then(|issue| self.schema.copy_text(self.dispatcher.mode(), issue));
        match text {
            Some(text) => {
                debug!(chars = text.chars().count(), "Copying selected row");
                self.pending_copy = Some(text);
            }
            None => trace!("Nothing to copy"),
        }
    }

    /// Move the state filter to its next option.
    fn cycle_filter(&mut self) {
        let Some(field) = self.schema.filterable_fields(self.mode()).first().copied() else {
            return;
        };
        let options = field.filter_options();
        if options.is_empty() {
            return;
        }
        let current = &self.dispatcher.query().state;
        let next = options
            .iter()
            .position(|entry| entry.value == current)
            .map_or(0, |i| (i + 1) % options.len());
        let request = self.dispatcher.set_state_filter(options[next].value);
        self.queue(request);
    }

    fn key_context(&self) -> KeyContext {
        if self.action_menu.is_visible() {
            return KeyContext::ActionMenu;
        }
        match self.mode() {
            ViewMode::Form if self.form_focus => KeyContext::QueryForm,
            ViewMode::List | ViewMode::Form => KeyContext::Table,
            ViewMode::Descriptor => KeyContext::Descriptions,
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Tabs
                Constraint::Min(5),    // Content
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        render_tabs(frame, chunks[0], self.mode(), &self.theme);
        self.render_content(frame, chunks[1]);
        render_context_help(frame, chunks[2], self.key_context(), &self.theme);

        self.notifications.render(frame, area);
        self.action_menu.render(frame, area, &self.theme);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        let mode = self.mode();
        if mode == ViewMode::Descriptor {
            render_descriptions(
                frame,
                area,
                &self.schema,
                self.record.as_ref(),
                &self.loading,
                &self.theme,
            );
            return;
        }

        let table_area = if mode == ViewMode::Form {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(self.query_form.height()),
                    Constraint::Min(3),
                ])
                .split(area);
            self.query_form
                .render(frame, chunks[0], self.form_focus, &self.theme);
            chunks[1]
        } else {
            area
        };

        let rows = visible_issues(&self.schema, self.dispatcher.query(), &self.issues);
        let ctx = TableContext {
            schema: &self.schema,
            mode,
            issues: &rows,
            total: self.total,
            query: self.dispatcher.query(),
            loading: &self.loading,
            focused: !(mode == ViewMode::Form && self.form_focus),
        };
        self.table_view.render(frame, table_area, &ctx, &self.theme);
    }
}

/// The issues in `issues` that pass the active query's filters.
fn visible_issues<'a>(schema: &Schema, query: &IssueQuery, issues: &'a [Issue]) -> Vec<&'a Issue> {
    let filters = [(FieldKey::State, query.state.clone())];
    issues
        .iter()
        .filter(|issue| schema.matches(issue, &filters))
        .collect()
}
