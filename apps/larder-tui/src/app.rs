//! Application state and transitions
//!
//! The item list and the editing target are explicit state here: the list
//! is replaced wholesale on every fetch (no diffing), and every mutation is
//! followed by a full re-fetch, so the store stays the sole source of
//! truth. One outbound request per transition; a failed request leaves the
//! form and table as they were.

use crossterm::event::{KeyCode, KeyModifiers};

use larder_core::{count_expiring, FormState, Item, EXPIRY_WINDOW_DAYS};

use crate::client::ApiClient;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Form,
}

/// The form's five inputs, in tab order
pub const FIELD_LABELS: [&str; 5] = [
    "Name",
    "Description",
    "Storage type",
    "Date stored (YYYY-MM-DD)",
    "Use by (YYYY-MM-DD)",
];

/// Main application state
pub struct App {
    client: ApiClient,
    /// Current item list, rebuilt from the server after every mutation
    pub items: Vec<Item>,
    /// Add/edit form controller
    pub form: FormState,
    pub focus: Focus,
    /// Index into [`FIELD_LABELS`] of the focused form input
    pub field_index: usize,
    /// Selected table row
    pub selected: usize,
    /// Status line message
    pub status: Option<String>,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            form: FormState::new(),
            focus: Focus::Table,
            field_index: 0,
            selected: 0,
            status: None,
        }
    }

    /// Handle a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match self.focus {
            Focus::Table => match code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('j') | KeyCode::Down => self.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
                KeyCode::Char('r') => self.refresh(),
                KeyCode::Char('a') => self.begin_add(),
                KeyCode::Char('e') | KeyCode::Enter => self.begin_edit(),
                KeyCode::Char('d') => self.delete_selected(),
                KeyCode::Esc => self.cancel(),
                _ => {}
            },
            Focus::Form => match code {
                KeyCode::Esc => self.cancel(),
                KeyCode::Enter => self.submit(),
                KeyCode::Tab | KeyCode::Down => self.next_field(),
                KeyCode::BackTab | KeyCode::Up => self.prev_field(),
                KeyCode::Backspace => {
                    self.current_field_mut().pop();
                }
                KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                    self.current_field_mut().push(c);
                }
                _ => {}
            },
        }
        false
    }

    /// Fetch the full list from the server and replace client state.
    pub fn refresh(&mut self) {
        match self.client.list_items() {
            Ok(items) => self.apply_items(items),
            Err(err) => {
                tracing::error!("error fetching items: {err}");
                self.status = Some(format!("Error fetching items: {err}"));
            }
        }
    }

    /// Replace the item list and surface the expiring-soon count.
    pub fn apply_items(&mut self, items: Vec<Item>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        let expiring = count_expiring(&self.items, EXPIRY_WINDOW_DAYS);
        tracing::info!("{expiring} items expiring soon");
        self.status = Some(format!("{expiring} items expiring soon"));
    }

    /// Submit the form: create when adding, full-field update when editing.
    pub fn submit(&mut self) {
        let draft = match self.form.draft() {
            Ok(draft) => draft,
            Err(err) => {
                self.status = Some(err.to_string());
                return;
            }
        };

        let result = match self.form.editing() {
            Some(id) => self.client.update_item(id, &draft),
            None => self.client.create_item(&draft),
        };

        match result {
            Ok(item) => {
                tracing::info!("item saved: {}", item.id);
                self.form.complete_submit();
                self.focus = Focus::Table;
                self.field_index = 0;
                self.refresh();
            }
            Err(err) => {
                tracing::error!("error saving item: {err}");
                self.status = Some(format!("Error saving item: {err}"));
            }
        }
    }

    /// Open the form empty, in adding state.
    pub fn begin_add(&mut self) {
        self.form.cancel();
        self.focus = Focus::Form;
        self.field_index = 0;
    }

    /// Load the selected item into the form and switch to editing it.
    pub fn begin_edit(&mut self) {
        if let Some(item) = self.items.get(self.selected) {
            self.form.begin_edit(item);
            self.focus = Focus::Form;
            self.field_index = 0;
        }
    }

    /// Discard form contents, clear any editing target, return to the table.
    pub fn cancel(&mut self) {
        self.form.cancel();
        self.focus = Focus::Table;
        self.field_index = 0;
    }

    /// Delete the selected item and re-fetch the list.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.items.get(self.selected).map(|item| item.id) else {
            return;
        };

        match self.client.delete_item(id) {
            Ok(item) => {
                tracing::info!("item deleted: {}", item.id);
                // Deleting the item being edited clears the edit target
                self.form.item_deleted(id);
                self.refresh();
            }
            Err(err) => {
                tracing::error!("error deleting item: {err}");
                self.status = Some(format!("Error deleting item: {err}"));
                // The row may be gone server-side regardless
                self.refresh();
            }
        }
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() && self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn next_field(&mut self) {
        self.field_index = (self.field_index + 1) % FIELD_LABELS.len();
    }

    pub fn prev_field(&mut self) {
        self.field_index = (self.field_index + FIELD_LABELS.len() - 1) % FIELD_LABELS.len();
    }

    /// The form input currently receiving text, by tab order.
    pub fn current_field_mut(&mut self) -> &mut String {
        let fields = &mut self.form.fields;
        match self.field_index {
            0 => &mut fields.name,
            1 => &mut fields.description,
            2 => &mut fields.storage_type,
            3 => &mut fields.date_stored,
            _ => &mut fields.use_by_date,
        }
    }

    pub fn field_value(&self, index: usize) -> &str {
        let fields = &self.form.fields;
        match index {
            0 => &fields.name,
            1 => &fields.description,
            2 => &fields.storage_type,
            3 => &fields.date_stored,
            _ => &fields.use_by_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn app() -> App {
        // No request is issued in these tests
        App::new(ApiClient::new("http://127.0.0.1:0"))
    }

    fn item(id: i64, days_left: i64) -> Item {
        Item {
            id,
            name: format!("item-{id}"),
            description: None,
            storage_type: "fridge".to_string(),
            date_stored: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            use_by_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            days_left: Some(days_left),
        }
    }

    #[test]
    fn test_apply_items_replaces_list_and_counts_expiring() {
        let mut app = app();
        app.apply_items(vec![item(1, -1), item(2, 0), item(3, 3), item(4, 7), item(5, 8)]);

        assert_eq!(app.items.len(), 5);
        assert_eq!(app.status.as_deref(), Some("3 items expiring soon"));
    }

    #[test]
    fn test_apply_items_clamps_selection() {
        let mut app = app();
        app.apply_items(vec![item(1, 1), item(2, 2), item(3, 3)]);
        app.selected = 2;

        app.apply_items(vec![item(1, 1)]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_begin_edit_targets_selected_item() {
        let mut app = app();
        app.apply_items(vec![item(1, 1), item(2, 2)]);
        app.selected = 1;

        app.begin_edit();
        assert_eq!(app.focus, Focus::Form);
        assert_eq!(app.form.editing(), Some(2));
        assert_eq!(app.form.fields.name, "item-2");
    }

    #[test]
    fn test_cancel_returns_to_adding() {
        let mut app = app();
        app.apply_items(vec![item(1, 1)]);
        app.begin_edit();

        app.cancel();
        assert_eq!(app.focus, Focus::Table);
        assert!(!app.form.is_editing());
        assert!(app.form.fields.name.is_empty());
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut app = app();
        app.begin_add();

        for c in "Milk".chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('x'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);

        assert_eq!(app.form.fields.name, "Milk");
        assert_eq!(app.form.fields.description, "");
    }

    #[test]
    fn test_field_cycling_wraps() {
        let mut app = app();
        app.begin_add();

        for _ in 0..FIELD_LABELS.len() {
            app.next_field();
        }
        assert_eq!(app.field_index, 0);

        app.prev_field();
        assert_eq!(app.field_index, FIELD_LABELS.len() - 1);
    }

    #[test]
    fn test_quit_from_table() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE));
        // 'q' types into the form instead of quitting while it has focus
        app.begin_add();
        assert!(!app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(app.form.fields.name, "q");
    }
}
