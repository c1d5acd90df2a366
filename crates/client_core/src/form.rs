//! Headless form model owned by the UI thread.
//!
//! Async work never touches a [`FormState`] directly. Completed requests send
//! [`UiUpdate`]s over a channel and the owning thread applies them.

use std::collections::{HashMap, HashSet};

use crossbeam_channel::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    State,
    Splitter,
    OriginalText,
    FifthChar,
    Palindrome,
    Reversed,
    SplitState,
    PropOne,
    PropTwo,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::State,
        FormField::Splitter,
        FormField::OriginalText,
        FormField::FifthChar,
        FormField::Palindrome,
        FormField::Reversed,
        FormField::SplitState,
        FormField::PropOne,
        FormField::PropTwo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Splitter => "splitter",
            Self::OriginalText => "original",
            Self::FifthChar => "fifth char",
            Self::Palindrome => "palindrome",
            Self::Reversed => "reversed",
            Self::SplitState => "split state",
            Self::PropOne => "prop1",
            Self::PropTwo => "prop2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    SetText { field: FormField, text: String },
    Notify(String),
}

/// Snapshot of the editable fields, read when a request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub state: String,
    pub splitter: String,
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    texts: HashMap<FormField, String>,
    invalid: HashSet<FormField>,
    notifications: Vec<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, field: FormField) -> &str {
        self.texts.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn set_text(&mut self, field: FormField, text: impl Into<String>) {
        self.texts.insert(field, text.into());
    }

    pub fn is_invalid(&self, field: FormField) -> bool {
        self.invalid.contains(&field)
    }

    pub fn set_invalid(&mut self, field: FormField, invalid: bool) {
        if invalid {
            self.invalid.insert(field);
        } else {
            self.invalid.remove(&field);
        }
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    pub fn inputs(&self) -> FormInputs {
        FormInputs {
            state: self.text(FormField::State).to_string(),
            splitter: self.text(FormField::Splitter).to_string(),
        }
    }

    pub fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::SetText { field, text } => self.set_text(field, text),
            UiUpdate::Notify(message) => self.notifications.push(message),
        }
    }

    /// Applies every update already queued without blocking. Returns how many were applied.
    pub fn drain(&mut self, ui_rx: &Receiver<UiUpdate>) -> usize {
        let mut applied = 0;
        while let Ok(update) = ui_rx.try_recv() {
            self.apply(update);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn unset_fields_read_as_empty() {
        let form = FormState::new();
        assert_eq!(form.text(FormField::State), "");
        assert_eq!(form.inputs(), FormInputs::default());
    }

    #[test]
    fn invalid_flag_toggles_per_field() {
        let mut form = FormState::new();
        form.set_invalid(FormField::Splitter, true);
        assert!(form.is_invalid(FormField::Splitter));
        assert!(!form.is_invalid(FormField::State));
        form.set_invalid(FormField::Splitter, false);
        assert!(!form.is_invalid(FormField::Splitter));
    }

    #[test]
    fn drain_applies_queued_updates_in_order() {
        let (ui_tx, ui_rx) = unbounded();
        ui_tx
            .send(UiUpdate::SetText {
                field: FormField::Reversed,
                text: "first".to_string(),
            })
            .expect("send");
        ui_tx
            .send(UiUpdate::SetText {
                field: FormField::Reversed,
                text: "second".to_string(),
            })
            .expect("send");
        ui_tx
            .send(UiUpdate::Notify("Failed to get state!".to_string()))
            .expect("send");

        let mut form = FormState::new();
        assert_eq!(form.drain(&ui_rx), 3);
        assert_eq!(form.text(FormField::Reversed), "second");
        assert_eq!(form.take_notifications(), vec!["Failed to get state!"]);
        assert!(form.notifications().is_empty());
        assert_eq!(form.drain(&ui_rx), 0);
    }
}
