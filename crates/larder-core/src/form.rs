//! Form controller state for the add/edit flow
//!
//! The form is in one of two states: **Adding** (no item targeted) or
//! **Editing** (a store id is targeted). The state and the five field
//! buffers are explicit here rather than ambient UI state, so every
//! transition is a plain method call the client wires to its inputs.

use chrono::NaiveDate;

use crate::error::{LarderError, Result};
use crate::item::{Item, ItemDraft};

/// The five text inputs of the item form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub description: String,
    pub storage_type: String,
    /// Entered as `YYYY-MM-DD`.
    pub date_stored: String,
    /// Entered as `YYYY-MM-DD`.
    pub use_by_date: String,
}

/// Form controller: Adding while `editing` is `None`, Editing otherwise.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub fields: FormFields,
    editing: Option<i64>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the item currently loaded for modification, if any.
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Label for the submit affordance.
    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update Item"
        } else {
            "Add Item"
        }
    }

    /// Load an item into the form and switch to editing it.
    pub fn begin_edit(&mut self, item: &Item) {
        self.editing = Some(item.id);
        self.fields = FormFields {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            storage_type: item.storage_type.clone(),
            date_stored: item.date_stored.to_string(),
            use_by_date: item.use_by_date.to_string(),
        };
    }

    /// Discard form contents and revert to adding.
    pub fn cancel(&mut self) {
        self.editing = None;
        self.fields = FormFields::default();
    }

    /// Package the form fields into a request payload.
    ///
    /// The form is left untouched; the caller clears it with
    /// `complete_submit` once the request succeeds, so a failed request
    /// keeps the user's input.
    pub fn draft(&self) -> Result<ItemDraft> {
        Ok(ItemDraft {
            name: self.fields.name.clone(),
            description: if self.fields.description.is_empty() {
                None
            } else {
                Some(self.fields.description.clone())
            },
            storage_type: self.fields.storage_type.clone(),
            date_stored: parse_date(&self.fields.date_stored)?,
            use_by_date: parse_date(&self.fields.use_by_date)?,
        })
    }

    /// Clear the fields and editing target after a successful submit.
    pub fn complete_submit(&mut self) {
        self.editing = None;
        self.fields = FormFields::default();
    }

    /// Note that an item was deleted. Clears the editing target when it was
    /// the deleted item, so a later submit cannot target a missing row.
    pub fn item_deleted(&mut self, id: i64) {
        if self.editing == Some(id) {
            self.cancel();
        }
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    text.parse()
        .map_err(|_| LarderError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Item {
        Item {
            id: 42,
            name: "Milk".to_string(),
            description: None,
            storage_type: "fridge".to_string(),
            date_stored: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            use_by_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            days_left: Some(3),
        }
    }

    #[test]
    fn test_starts_adding() {
        let form = FormState::new();
        assert!(!form.is_editing());
        assert_eq!(form.submit_label(), "Add Item");
    }

    #[test]
    fn test_begin_edit_populates_fields() {
        let mut form = FormState::new();
        form.begin_edit(&milk());

        assert_eq!(form.editing(), Some(42));
        assert_eq!(form.submit_label(), "Update Item");
        assert_eq!(form.fields.name, "Milk");
        assert_eq!(form.fields.date_stored, "2024-01-01");
        assert_eq!(form.fields.use_by_date, "2024-01-10");
    }

    #[test]
    fn test_cancel_reverts_to_adding() {
        let mut form = FormState::new();
        form.begin_edit(&milk());
        form.cancel();

        assert!(!form.is_editing());
        assert_eq!(form.fields, FormFields::default());
        assert_eq!(form.submit_label(), "Add Item");
    }

    #[test]
    fn test_submit_clears_editing_target() {
        let mut form = FormState::new();
        form.begin_edit(&milk());
        form.fields.name = "Oat milk".to_string();

        let draft = form.draft().unwrap();
        assert_eq!(draft.name, "Oat milk");
        assert_eq!(draft.description, None);

        form.complete_submit();
        assert!(!form.is_editing());
        assert_eq!(form.fields, FormFields::default());
    }

    #[test]
    fn test_draft_rejects_bad_date() {
        let mut form = FormState::new();
        form.fields.name = "Eggs".to_string();
        form.fields.storage_type = "fridge".to_string();
        form.fields.date_stored = "01/01/2024".to_string();
        form.fields.use_by_date = "2024-01-10".to_string();

        assert!(matches!(form.draft(), Err(LarderError::InvalidDate(_))));
        // A failed submit leaves the form as typed
        assert_eq!(form.fields.name, "Eggs");
    }

    #[test]
    fn test_delete_of_edited_item_clears_target() {
        let mut form = FormState::new();
        form.begin_edit(&milk());

        form.item_deleted(42);
        assert!(!form.is_editing());
        assert_eq!(form.fields, FormFields::default());
    }

    #[test]
    fn test_delete_of_other_item_keeps_target() {
        let mut form = FormState::new();
        form.begin_edit(&milk());

        form.item_deleted(7);
        assert_eq!(form.editing(), Some(42));
        assert_eq!(form.fields.name, "Milk");
    }
}
