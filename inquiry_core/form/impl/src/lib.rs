use inquiry_core_form_contracts::{ContactFormService, FormView, SubmitOutcome, SubmitState};
use inquiry_extern_contracts::relay::MailRelayApiService;
use inquiry_models::form::{FieldName, FormState, SubmissionResult};
use tracing::{debug, info, warn};

pub mod validator;


pub const SUCCESS_MESSAGE: &str = "Thank you for your message! We will get back to you soon.";
pub const REJECTED_FALLBACK_MESSAGE: &str =
    "Something went wrong while sending your message. Please try again.";
pub const TRANSPORT_ERROR_MESSAGE: &str =
    "Unable to send your message right now. Please check your connection and try again.";

/// Coordinates one contact form editing session.
///
/// The coordinator owns the form state and the view. `on_submit` borrows it
/// mutably until the relay has answered, so a second submission cannot start
/// while one is in flight.
#[derive(Debug)]
pub struct ContactFormServiceImpl<Relay, View> {
    relay: Relay,
    view: View,
    state: FormState,
    submit: SubmitState,
}

impl<Relay, View> ContactFormServiceImpl<Relay, View>
where
    Relay: MailRelayApiService,
    View: FormView,
{
    pub fn new(relay: Relay, view: View) -> Self {
        let mut form = Self {
            relay,
            view,
            state: FormState::default(),
            submit: SubmitState::Disabled,
        };
        form.update_submit_state();
        form
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    fn validate_field(&mut self, field: FieldName) {
        self.state.errors[field] = validator::validate_field(field, &self.state.data[field]).err();
    }

    fn render_field(&mut self, field: FieldName) {
        let feedback = self.state.feedback(field);
        self.view.render_field(field, feedback);
    }

    fn set_submit_state(&mut self, state: SubmitState) {
        self.submit = state;
        self.view.set_submit_state(state);
    }

    fn update_submit_state(&mut self) {
        let state = if self.is_form_valid() {
            SubmitState::Enabled
        } else {
            SubmitState::Disabled
        };
        self.set_submit_state(state);
    }

    fn reset(&mut self) {
        self.state = FormState::default();
        self.view.clear_inputs();
        for field in FieldName::ALL {
            self.render_field(field);
        }
        self.view.hide_success();
        self.update_submit_state();
    }

    fn fail_submission(&mut self, message: String) -> SubmitOutcome {
        self.view.alert(&message);
        self.update_submit_state();
        SubmitOutcome::Failed { message }
    }
}

impl<Relay, View> ContactFormService for ContactFormServiceImpl<Relay, View>
where
    Relay: MailRelayApiService,
    View: FormView,
{
    fn on_field_input(&mut self, field: FieldName, value: String) {
        debug!(%field, "field input");
        self.state.data[field] = value;
        self.validate_field(field);
        self.render_field(field);
        self.update_submit_state();
    }

    fn on_field_blur(&mut self, field: FieldName) {
        debug!(%field, "field blur");
        self.state.touched[field] = true;
        self.validate_field(field);
        self.render_field(field);
    }

    fn is_form_valid(&mut self) -> bool {
        for field in FieldName::ALL {
            self.validate_field(field);
        }
        self.state.errors.is_empty()
    }

    async fn on_submit(&mut self) -> SubmitOutcome {
        for field in FieldName::ALL {
            self.state.touched[field] = true;
        }

        let valid = self.is_form_valid();
        for field in FieldName::ALL {
            self.render_field(field);
        }

        if !valid {
            // `is_form_valid` returned false, so at least one field has an error
            let focus = self.state.errors.first().unwrap_or(FieldName::Name);
            debug!(%focus, "form is invalid, not submitting");
            self.view.focus(focus);
            return SubmitOutcome::Invalid { focus };
        }

        self.set_submit_state(SubmitState::Pending);
        let payload = self.state.payload();
        info!("submitting contact inquiry");

        match self.relay.submit(payload).await {
            Ok(SubmissionResult { ok: true, .. }) => {
                info!("contact inquiry sent");
                self.reset();
                self.view.show_success(SUCCESS_MESSAGE);
                SubmitOutcome::Sent
            }
            Ok(SubmissionResult { ok: false, error }) => {
                warn!(?error, "mail relay rejected contact inquiry");
                let message = error
                    .filter(|error| !error.trim().is_empty())
                    .unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.into());
                self.fail_submission(message)
            }
            Err(err) => {
                warn!("failed to submit contact inquiry: {err:#}");
                self.fail_submission(TRANSPORT_ERROR_MESSAGE.into())
            }
        }
    }

    fn on_clear(&mut self) {
        debug!("clearing form");
        self.reset();
    }

    fn state(&self) -> &FormState {
        &self.state
    }
}
