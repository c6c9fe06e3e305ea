use std::future::Future;

use inquiry_models::form::{FieldFeedback, FieldName, FormState};

/// The contact form as seen by the code that receives user interaction events.
pub trait ContactFormService: Send {
    /// The user changed the value of `field`.
    fn on_field_input(&mut self, field: FieldName, value: String);

    /// The user left `field`.
    fn on_field_blur(&mut self, field: FieldName);

    /// Revalidate every field and return whether the whole form is valid.
    ///
    /// This overwrites the stored errors of all fields.
    fn is_form_valid(&mut self) -> bool;

    /// Validate the form and, if it is valid, hand it to the mail relay.
    ///
    /// Exactly one attempt is made. On failure the entered values are kept.
    fn on_submit(&mut self) -> impl Future<Output = SubmitOutcome> + Send;

    /// Discard everything the user entered.
    fn on_clear(&mut self);

    fn state(&self) -> &FormState;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form did not validate, nothing was sent.
    Invalid { focus: FieldName },
    /// The relay accepted the inquiry and the form has been reset.
    Sent,
    /// The relay rejected the inquiry or could not be reached.
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Disabled,
    Enabled,
    Pending,
}

/// Renders the form. Implementations only display what they are told and
/// never change the form state themselves.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FormView: Send {
    fn render_field(&mut self, field: FieldName, feedback: FieldFeedback);

    fn set_submit_state(&mut self, state: SubmitState);

    fn focus(&mut self, field: FieldName);

    fn show_success(&mut self, message: &str);

    fn hide_success(&mut self);

    fn alert(&mut self, message: &str);

    /// Empty all input elements.
    fn clear_inputs(&mut self);
}
