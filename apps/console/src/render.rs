//! Plain-text rendering of the form for the terminal.

use client_core::{FormField, FormState, UiUpdate};

pub fn render_form(form: &FormState) -> String {
    let width = FormField::ALL
        .iter()
        .map(|field| field.label().len())
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    for field in FormField::ALL {
        let marker = if form.is_invalid(field) { "  <- invalid" } else { "" };
        out.push_str(&format!(
            "{:>width$}: {}{marker}\n",
            field.label(),
            form.text(field)
        ));
    }
    out
}

pub fn render_update(update: &UiUpdate) -> String {
    match update {
        UiUpdate::SetText { field, text } => format!("{}: {text}", field.label()),
        UiUpdate::Notify(message) => format!("! {message}"),
    }
}
