use crate::domain::SubscriberEmail;
use crate::relay_client::RelayClient;
use crate::relay_client::SubmitError;

/// Shown in place of the form once a submission went through.
pub const ACKNOWLEDGMENT: &str = "Success! Check your email for the download link 🚀";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Input editable, submit enabled. An error message may be attached.
    Idle,
    /// A request to the relay is in flight.
    Submitting,
    /// Terminal; a new form is needed to subscribe again.
    Submitted,
}

/// The email capture form.
///
/// `submit` holds `&mut self` until the relay answers, so the same form can
/// never have two submissions in flight.
#[derive(Debug)]
pub struct SubscribeForm {
    state: FormState,
    email: String,
    error: Option<String>,
}

impl Default for SubscribeForm {
    fn default() -> Self { Self::new() }
}

impl SubscribeForm {
    pub fn new() -> Self {
        Self {
            state: FormState::Idle,
            email: String::new(),
            error: None,
        }
    }

    pub fn state(&self) -> FormState { self.state }

    /// Current contents of the input
    pub fn email(&self) -> &str { &self.email }

    /// Message from the last failed attempt, if it hasn't been dismissed yet
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }

    pub fn acknowledgment(&self) -> Option<&'static str> {
        (self.state == FormState::Submitted).then_some(ACKNOWLEDGMENT)
    }

    /// The acknowledgment once `Submitted`, otherwise the message explaining
    /// why not.
    pub fn outcome(&self) -> Result<&'static str, String> {
        match self.acknowledgment() {
            Some(ack) => Ok(ack),
            None => Err(self
                .error
                .clone()
                .unwrap_or_else(|| "Subscription was not submitted".to_string())),
        }
    }

    /// Replace the input. Dismisses any error; ignored unless `Idle`.
    pub fn edit(
        &mut self,
        input: impl Into<String>,
    ) {
        if self.state != FormState::Idle {
            return;
        }
        self.email = input.into();
        self.error = None;
    }

    /// Try to subscribe the current input and return the resulting state.
    ///
    /// On success the input is cleared and the form becomes `Submitted`. On
    /// any failure it goes back to `Idle` with the input untouched and
    /// `error()` set. Nothing is retried.
    #[tracing::instrument(name = "Submitting subscription form", skip_all)]
    pub async fn submit(
        &mut self,
        relay: &RelayClient,
    ) -> FormState {
        if self.state != FormState::Idle {
            return self.state;
        }
        self.error = None;

        // same check the browser's email input does before letting a submit through
        let email = match SubscriberEmail::parse(self.email.clone()) {
            Ok(email) => email,
            Err(e) => return self.fail(SubmitError::InvalidEmail(e)),
        };

        self.state = FormState::Submitting;
        match relay.subscribe(&email).await {
            Ok(()) => {
                self.email.clear();
                self.state = FormState::Submitted;
            }
            Err(e) => {
                self.fail(e);
            }
        }
        self.state
    }

    fn fail(
        &mut self,
        e: SubmitError,
    ) -> FormState {
        tracing::warn!(error.cause_chain = ?e, error.message = %e, "subscription failed");
        self.error = Some(e.to_string());
        self.state = FormState::Idle;
        self.state
    }
}
