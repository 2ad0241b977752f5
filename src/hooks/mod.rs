//! Dioxus hooks over the headless data layer
//!
//! Every hook owns a headless handle ([`Resource`](crate::resource::Resource),
//! [`ContactSubmission`](crate::contact::ContactSubmission),
//! [`NotificationCenter`](crate::notifications::NotificationCenter)) and mirrors
//! its watch channel into a `Signal`. The mirroring task is spawned on the
//! component scope, so it stops with the component and never writes a signal
//! after unmount.

mod activation;
mod contact;
mod internal;
mod notifications;
mod resource;

pub use activation::{UseLazyActivation, use_lazy_activation, use_lazy_resource};
pub use contact::{UseContactForm, use_contact_form};
pub use internal::{use_transport, use_transport_provider};
pub use notifications::{UseNotifications, use_notification_provider, use_notifications};
pub use resource::{
    UseApi, use_api, use_api_resource, use_developer_info, use_experiences, use_projects,
    use_skills, use_testimonials,
};
