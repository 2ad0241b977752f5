//! # Contact form submission
//!
//! The write side of the data layer. A [`ContactSubmission`] validates the form
//! locally, posts it to `/contact` and publishes a [`ContactFormState`].
//!
//! - An invalid form never reaches the transport; its per-field messages land in
//!   [`ContactFormState::field_errors`].
//! - A failed request sets the generic [`CONTACT_FAILURE_MESSAGE`] and the
//!   underlying [`ApiError`](crate::errors::ApiError) is returned to the caller.
//! - Fields are never cleared here. Clearing after success is the caller's job
//!   (see [`ContactFormFields::clear`]) so a failed submission keeps the input.

use std::{str::FromStr, sync::Arc};

use email_address::EmailAddress;
use tokio::sync::watch;

use crate::{
    errors::{ContactError, ContactField, ValidationErrors},
    models::{ContactFormFields, ContactResponse},
    mutation::MutationState,
    runtime::request::submit_contact,
    state::AsyncState,
    transport::SharedTransport,
};

/// Path of the contact endpoint
pub const CONTACT_ENDPOINT: &str = "/contact";

/// User-facing message for any failed submission
pub const CONTACT_FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";

/// Minimum message length, in characters, after trimming
pub const MIN_MESSAGE_LEN: usize = 10;

impl ContactFormFields {
    /// Check the form and produce a payload that may be sent
    ///
    /// Leading and trailing whitespace is trimmed from every field; every failing
    /// field is reported, not just the first.
    pub fn validate(&self) -> Result<ValidContact, ValidationErrors> {
        let fields = ContactFormFields {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        let mut errors = ValidationErrors::default();
        if fields.name.is_empty() {
            errors.push(ContactField::Name, "Name is required");
        }
        if !is_deliverable_email(&fields.email) {
            errors.push(ContactField::Email, "Invalid email");
        }
        if fields.subject.is_empty() {
            errors.push(ContactField::Subject, "Subject is required");
        }
        if fields.message.chars().count() < MIN_MESSAGE_LEN {
            errors.push(ContactField::Message, "Message is too short");
        }

        if errors.is_empty() {
            Ok(ValidContact { fields })
        } else {
            Err(errors)
        }
    }

    /// Reset every field to its empty default
    pub fn clear(&mut self) {
        *self = ContactFormFields::default();
    }
}

/// RFC 5322 syntax plus a dotted domain name and a plain local part
fn is_deliverable_email(email: &str) -> bool {
    let Ok(address) = EmailAddress::from_str(email) else {
        return false;
    };
    let domain = address.domain();
    let local = address.local_part();
    !local.starts_with('"')
        && !domain.starts_with('[')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// A contact form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    fields: ContactFormFields,
}

impl ValidContact {
    /// The trimmed fields that will be sent
    pub fn fields(&self) -> &ContactFormFields {
        &self.fields
    }
}

/// Observable state of a contact submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFormState {
    /// Outcome of the last submission; the error is the user-facing message
    pub status: MutationState<ContactResponse, String>,
    /// Per-field messages of the last rejected form
    pub field_errors: Option<ValidationErrors>,
}

impl ContactFormState {
    pub fn submitting(&self) -> bool {
        self.status.is_loading()
    }

    /// User-facing error message of the last failed submission
    pub fn error(&self) -> Option<&str> {
        self.status.error().map(String::as_str)
    }

    pub fn succeeded(&self) -> bool {
        self.status.is_success()
    }

    pub fn field_error(&self, field: ContactField) -> Option<&'static str> {
        self.field_errors
            .as_ref()
            .and_then(|errors| errors.message_for(field))
    }
}

/// Puts an abandoned submission back to idle
struct InFlight<'a> {
    state: &'a watch::Sender<ContactFormState>,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        crate::debug_log!("📝 [CONTACT] Submission dropped before it settled");
        self.state.send_if_modified(|state| {
            if state.status.is_loading() {
                state.status = MutationState::Idle;
                true
            } else {
                false
            }
        });
    }
}

/// Headless contact mutation
///
/// Clones share the same state. Only one submission should be in flight at a
/// time; callers disable their submit control while [`ContactSubmission::submitting`]
/// is true.
#[derive(Clone)]
pub struct ContactSubmission {
    transport: SharedTransport,
    state: Arc<watch::Sender<ContactFormState>>,
}

impl ContactSubmission {
    pub fn new(transport: SharedTransport) -> Self {
        let (state, _) = watch::channel(ContactFormState::default());
        Self {
            transport,
            state: Arc::new(state),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> ContactFormState {
        self.state.borrow().clone()
    }

    /// Subscribe to state transitions
    pub fn subscribe(&self) -> watch::Receiver<ContactFormState> {
        self.state.subscribe()
    }

    pub fn submitting(&self) -> bool {
        self.state.borrow().submitting()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(str::to_string)
    }

    /// Validate and send the form
    ///
    /// A validation failure records per-field messages and returns
    /// [`ContactError::Validation`] without touching the network or the
    /// submission status.
    pub async fn submit(
        &self,
        fields: &ContactFormFields,
    ) -> Result<ContactResponse, ContactError> {
        let contact = match fields.validate() {
            Ok(contact) => contact,
            Err(errors) => {
                crate::debug_log!("📝 [CONTACT] Form rejected locally: {}", errors);
                self.state.send_modify(|state| {
                    state.field_errors = Some(errors.clone());
                });
                return Err(ContactError::Validation(errors));
            }
        };

        self.state.send_modify(|state| {
            state.status = MutationState::Loading;
            state.field_errors = None;
        });
        crate::log_mutation_start!("POST {}", CONTACT_ENDPOINT);
        let mut in_flight = InFlight {
            state: &self.state,
            settled: false,
        };

        let outcome = submit_contact(self.transport.as_ref(), &contact).await;
        in_flight.settled = true;
        match outcome {
            Ok(response) => {
                crate::log_mutation_success!("POST {} -> {:?}", CONTACT_ENDPOINT, response.id);
                self.state.send_modify(|state| {
                    state.status = MutationState::Success(response.clone());
                });
                Ok(response)
            }
            Err(error) => {
                crate::log_mutation_error!("POST {} failed: {}", CONTACT_ENDPOINT, error);
                self.state.send_modify(|state| {
                    state.status = MutationState::Error(CONTACT_FAILURE_MESSAGE.to_string());
                });
                Err(ContactError::Api(error))
            }
        }
    }

    /// Clear prior success, error and field messages
    pub fn reset(&self) {
        self.state.send_if_modified(|state| {
            if *state == ContactFormState::default() {
                false
            } else {
                *state = ContactFormState::default();
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::{
        errors::ApiError,
        mock::{Method, ScriptedTransport},
    };

    fn valid_fields() -> ContactFormFields {
        ContactFormFields {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            subject: "Project enquiry".into(),
            message: "I would like to talk about an app.".into(),
        }
    }

    fn submission(transport: &ScriptedTransport) -> ContactSubmission {
        ContactSubmission::new(Arc::new(transport.clone()))
    }

    #[test]
    fn validation_reports_every_failing_field() {
        let fields = ContactFormFields {
            name: "  ".into(),
            email: "not-an-email".into(),
            subject: String::new(),
            message: "short".into(),
        };

        let errors = fields.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.message_for(ContactField::Name), Some("Name is required"));
        assert_eq!(errors.message_for(ContactField::Email), Some("Invalid email"));
        assert_eq!(
            errors.message_for(ContactField::Subject),
            Some("Subject is required")
        );
        assert_eq!(
            errors.message_for(ContactField::Message),
            Some("Message is too short")
        );
    }

    #[test]
    fn message_length_is_counted_after_trimming() {
        let mut fields = valid_fields();
        fields.message = "   123456789   ".into();
        assert!(fields.validate().is_err());

        fields.message = "1234567890".into();
        let contact = fields.validate().unwrap();
        assert_eq!(contact.fields().message, "1234567890");
    }

    #[test]
    fn email_needs_a_dotted_domain_and_plain_local_part() {
        let mut fields = valid_fields();
        for email in ["a@localhost", "ada@localhost", "\"a b\"@example.com", "ada@[127.0.0.1]"] {
            fields.email = email.into();
            let errors = fields.validate().unwrap_err();
            assert_eq!(
                errors.message_for(ContactField::Email),
                Some("Invalid email"),
                "{email} should be rejected"
            );
        }

        fields.email = " ada.lovelace+notes@mail.example.co.uk ".into();
        let contact = fields.validate().unwrap();
        assert_eq!(contact.fields().email, "ada.lovelace+notes@mail.example.co.uk");
    }

    #[test]
    fn clear_restores_empty_defaults() {
        let mut fields = valid_fields();
        fields.clear();
        assert_eq!(fields, ContactFormFields::default());
    }

    #[tokio::test]
    async fn short_message_never_reaches_the_network() {
        let transport = ScriptedTransport::new();
        let contact = submission(&transport);

        let mut fields = valid_fields();
        fields.message = "Hi there".into();
        let err = contact.submit(&fields).await.unwrap_err();

        assert!(err.validation().is_some());
        assert!(transport.calls().is_empty());
        let state = contact.state();
        assert!(state.status.is_idle());
        assert_eq!(
            state.field_error(ContactField::Message),
            Some("Message is too short")
        );
    }

    #[tokio::test]
    async fn valid_form_posts_once_and_tracks_submitting() {
        let transport = ScriptedTransport::new();
        let gate = transport.hold(Method::Post, CONTACT_ENDPOINT);
        let contact = submission(&transport);

        let pending = tokio::spawn({
            let contact = contact.clone();
            async move { contact.submit(&valid_fields()).await }
        });

        let mut updates = contact.subscribe();
        tokio::time::timeout(Duration::from_secs(1), updates.wait_for(|s| s.submitting()))
            .await
            .unwrap()
            .unwrap();
        assert!(contact.submitting());

        assert!(gate.succeed(json!({ "success": true, "id": "m-1" })));
        let response = pending.await.unwrap().unwrap();

        assert_eq!(response.id.as_deref(), Some("m-1"));
        assert!(!contact.submitting());
        assert_eq!(contact.error(), None);
        assert!(contact.state().succeeded());

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].path, CONTACT_ENDPOINT);
        assert_eq!(
            calls[0].body.as_ref().and_then(|body| body.get("email")),
            Some(&json!("grace@example.com"))
        );
    }

    #[tokio::test]
    async fn backend_failure_sets_generic_message_and_returns_cause() {
        let transport = ScriptedTransport::new();
        transport.fail_post(
            CONTACT_ENDPOINT,
            ApiError::Status {
                status: 502,
                body: "bad gateway".into(),
            },
        );
        let contact = submission(&transport);

        let err = contact.submit(&valid_fields()).await.unwrap_err();
        assert!(matches!(
            err,
            ContactError::Api(ApiError::Status { status: 502, .. })
        ));
        assert!(!contact.submitting());
        assert_eq!(contact.error().as_deref(), Some(CONTACT_FAILURE_MESSAGE));

        contact.reset();
        assert_eq!(contact.state(), ContactFormState::default());
    }

    #[tokio::test]
    async fn unsuccessful_answer_is_a_rejection() {
        let transport = ScriptedTransport::new();
        transport.respond_post(CONTACT_ENDPOINT, json!({ "success": false }));
        let contact = submission(&transport);

        let err = contact.submit(&valid_fields()).await.unwrap_err();
        assert_eq!(err.api(), Some(&ApiError::Rejected));
        assert_eq!(contact.error().as_deref(), Some(CONTACT_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn dropped_submission_returns_to_idle() {
        let transport = ScriptedTransport::new();
        let _gate = transport.hold(Method::Post, CONTACT_ENDPOINT);
        let contact = submission(&transport);

        let pending = tokio::spawn({
            let contact = contact.clone();
            async move { contact.submit(&valid_fields()).await }
        });

        let mut updates = contact.subscribe();
        tokio::time::timeout(Duration::from_secs(1), updates.wait_for(|s| s.submitting()))
            .await
            .unwrap()
            .unwrap();

        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());
        assert!(!contact.submitting());
        assert!(contact.state().status.is_idle());
        assert_eq!(contact.error(), None);
        assert_eq!(transport.aborted(), 1);
    }
}
