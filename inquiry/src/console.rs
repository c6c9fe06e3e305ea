//! Terminal front end for the contact form.

use std::io::Write;

use anyhow::Context;
use inquiry_core_form_contracts::{FormView, SubmitState};
use inquiry_models::form::{FieldFeedback, FieldName};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

/// Renders form feedback as lines of text.
#[derive(Debug)]
pub struct ConsoleView<W> {
    out: W,
}

impl ConsoleView<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: std::fmt::Arguments) {
        // nowhere left to report a broken terminal
        let _ = writeln!(self.out, "{line}");
    }
}

impl<W: Write + Send> FormView for ConsoleView<W> {
    fn render_field(&mut self, field: FieldName, feedback: FieldFeedback) {
        if let FieldFeedback::Invalid(message) = feedback {
            self.line(format_args!("  {}: {message}", field.label()));
        }
    }

    fn set_submit_state(&mut self, state: SubmitState) {
        debug!(?state, "submit state changed");
        if state == SubmitState::Pending {
            self.line(format_args!("Sending..."));
        }
    }

    fn focus(&mut self, field: FieldName) {
        debug!(%field, "focus");
    }

    fn show_success(&mut self, message: &str) {
        self.line(format_args!("{message}"));
    }

    fn hide_success(&mut self) {}

    fn alert(&mut self, message: &str) {
        self.line(format_args!("Error: {message}"));
    }

    fn clear_inputs(&mut self) {}
}

/// Reads field values line by line from stdin.
#[derive(Debug)]
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn read(&mut self, field: FieldName) -> anyhow::Result<String> {
        let mut stderr = std::io::stderr();
        write!(stderr, "{}: ", field.label())?;
        stderr.flush()?;

        self.lines
            .next_line()
            .await?
            .with_context(|| format!("No value entered for {}", field.label()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn output(view: ConsoleView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn renders_only_invalid_fields() {
        let mut view = ConsoleView::new(Vec::new());

        view.render_field(FieldName::Name, FieldFeedback::Neutral);
        view.render_field(FieldName::Email, FieldFeedback::Valid);
        view.render_field(
            FieldName::Phone,
            FieldFeedback::Invalid("Phone number is required".into()),
        );

        assert_eq!(output(view), "  Phone number: Phone number is required\n");
    }

    #[test]
    fn submission_messages() {
        let mut view = ConsoleView::new(Vec::new());

        view.set_submit_state(SubmitState::Enabled);
        view.set_submit_state(SubmitState::Pending);
        view.alert("mailbox full");
        view.show_success("Thanks!");

        assert_eq!(output(view), "Sending...\nError: mailbox full\nThanks!\n");
    }
}
