//! Inline form state for adding and editing duties.
//!
//! Both forms check for an empty name before calling out, so an empty value
//! never reaches the server.

use std::future::Future;

use duties_core::duty::Duty;

/// Inline message shown when saving an empty name.
pub const EMPTY_NAME_MESSAGE: &str = "Name cannot be empty";

/// The "Add" row at the bottom of the list.
#[derive(Debug, Default)]
pub struct AddDutyForm {
    editing: bool,
    saving: bool,
    value: String,
    validation_error: Option<String>,
}

impl AddDutyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// Whether the Add button is enabled while the list is (or isn't) busy.
    pub fn can_open(&self, list_loading: bool) -> bool {
        !list_loading && !self.editing
    }

    /// Click on Add: show the input.
    pub fn open(&mut self) {
        self.editing = true;
    }

    /// Cancel (or Escape): hide the input, keeping the typed value.
    pub fn cancel(&mut self) {
        self.editing = false;
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Save the typed name through `on_add`.
    ///
    /// An empty value sets [`EMPTY_NAME_MESSAGE`] and returns `false` without
    /// calling `on_add`. When `on_add` reports success the form clears and
    /// closes.
    pub async fn save<F, Fut>(&mut self, on_add: F) -> bool
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = bool>,
    {
        if self.value.is_empty() {
            self.validation_error = Some(EMPTY_NAME_MESSAGE.to_string());
            return false;
        }
        self.validation_error = None;

        self.saving = true;
        let done = on_add(self.value.clone()).await;
        self.saving = false;

        if done {
            self.value.clear();
            self.editing = false;
        }
        done
    }
}

/// One editable row of the list.
#[derive(Debug)]
pub struct DutyEditor {
    duty: Duty,
    editing: bool,
    saving: bool,
    value: String,
    validation_error: Option<String>,
}

impl DutyEditor {
    pub fn new(duty: Duty) -> Self {
        let value = duty.name.clone();
        Self {
            duty,
            editing: false,
            saving: false,
            value,
            validation_error: None,
        }
    }

    pub fn duty(&self) -> &Duty {
        &self.duty
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// The Edit / Cancel button.
    pub fn toggle(&mut self) {
        self.editing = !self.editing;
    }

    /// Escape: leave edit mode.
    pub fn cancel(&mut self) {
        self.editing = false;
    }

    /// Typing a non-empty value clears a pending validation message.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if !self.value.is_empty() {
            self.validation_error = None;
        }
    }

    /// Save the edited name through `on_update`, which receives the duty with
    /// its id unchanged.
    ///
    /// An empty value sets [`EMPTY_NAME_MESSAGE`] and returns `false` without
    /// calling `on_update`. On success the editor closes.
    pub async fn save<F, Fut>(&mut self, on_update: F) -> bool
    where
        F: FnOnce(Duty) -> Fut,
        Fut: Future<Output = bool>,
    {
        if self.value.is_empty() {
            self.validation_error = Some(EMPTY_NAME_MESSAGE.to_string());
            return false;
        }
        self.validation_error = None;

        let edited = Duty {
            id: self.duty.id.clone(),
            name: self.value.clone(),
        };
        self.saving = true;
        let done = on_update(edited.clone()).await;
        self.saving = false;

        if done {
            self.duty = edited;
            self.editing = false;
        }
        done
    }
}
