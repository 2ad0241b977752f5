//! # Contact Form Hook
//!
//! ```rust,no_run
//! use dioxus::prelude::*;
//! use portfolio_provider::prelude::*;
//!
//! #[component]
//! fn ContactForm() -> Element {
//!     let form = use_contact_form();
//!     let toasts = use_notifications();
//!     let mut fields = use_signal(ContactFormFields::default);
//!
//!     let handle = form.clone();
//!     let send = move |_: MouseEvent| {
//!         let form = handle.clone();
//!         let toasts = toasts.clone();
//!         async move {
//!             let current = fields.peek().clone();
//!             match form.submit(&current).await {
//!                 Ok(_) => {
//!                     toasts.center().success("Message sent!", "I'll get back to you soon.");
//!                     fields.write().clear();
//!                 }
//!                 Err(ContactError::Api(_)) => {
//!                     toasts.center().error("Error", CONTACT_FAILURE_MESSAGE);
//!                 }
//!                 Err(ContactError::Validation(_)) => {}
//!             }
//!         }
//!     };
//!
//!     rsx! {
//!         button { disabled: form.submitting(), onclick: send, "Send" }
//!     }
//! }
//! ```

use dioxus::prelude::*;

use crate::{
    contact::{ContactFormState, ContactSubmission},
    errors::{ContactError, ContactField},
    hooks::internal::{use_transport, use_watch_signal},
    models::{ContactFormFields, ContactResponse},
};

/// Handle returned by [`use_contact_form`]
#[derive(Clone)]
pub struct UseContactForm {
    submission: ContactSubmission,
    state: Signal<ContactFormState>,
}

impl PartialEq for UseContactForm {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl UseContactForm {
    pub fn state(&self) -> Signal<ContactFormState> {
        self.state
    }

    pub fn submitting(&self) -> bool {
        self.state.read().submitting()
    }

    /// Generic failure message of the last submission
    pub fn error(&self) -> Option<String> {
        self.state.read().error().map(str::to_string)
    }

    pub fn field_error(&self, field: ContactField) -> Option<&'static str> {
        self.state.read().field_error(field)
    }

    pub fn succeeded(&self) -> bool {
        self.state.read().succeeded()
    }

    /// Validate and post the form; see [`ContactSubmission::submit`]
    pub async fn submit(
        &self,
        fields: &ContactFormFields,
    ) -> Result<ContactResponse, ContactError> {
        self.submission.submit(fields).await
    }

    pub fn reset(&self) {
        self.submission.reset();
    }
}

/// Contact mutation scoped to this component
pub fn use_contact_form() -> UseContactForm {
    let transport = use_transport();
    let submission = use_hook(move || ContactSubmission::new(transport));
    let state = use_watch_signal({
        let submission = submission.clone();
        move || submission.subscribe()
    });

    UseContactForm { submission, state }
}
