#![doc = include_str!("../README.md")]

// Core modules
pub mod activation;
pub mod config;
pub mod contact;
pub mod errors;
pub mod global;
pub mod hooks;
mod log_utils;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod models;
pub mod mutation;
pub mod notifications;
pub mod param_utils;
pub mod resource;
pub mod resources;
pub mod runtime;
pub mod selectors;
pub mod state;
pub mod transport;
pub mod types;

// Re-export commonly used items at crate root for convenience
pub use config::ClientConfig;
pub use global::{init, init_with, init_with_transport};

pub mod prelude {
    //! The prelude exports the types and hooks a portfolio component needs.

    // Read hooks
    pub use crate::hooks::{
        UseApi, use_api, use_api_resource, use_developer_info, use_experiences, use_projects,
        use_skills, use_testimonials,
    };

    // Lazy activation
    pub use crate::activation::{ActivationPhase, LazyActivation};
    pub use crate::hooks::{UseLazyActivation, use_lazy_activation, use_lazy_resource};

    // Contact form
    pub use crate::contact::{CONTACT_FAILURE_MESSAGE, ContactFormState};
    pub use crate::hooks::{UseContactForm, use_contact_form};

    // Notifications
    pub use crate::hooks::{UseNotifications, use_notification_provider, use_notifications};
    pub use crate::notifications::{NotificationCenter, Toast, ToastVariant};

    // Transport lookup
    pub use crate::hooks::{use_transport, use_transport_provider};
    pub use crate::transport::{SharedTransport, Transport};

    // The async state types, needed for matching
    pub use crate::mutation::MutationState;
    pub use crate::state::{AsyncState, State};

    // Data models
    pub use crate::models::{
        ContactFormFields, ContactResponse, DeveloperInfo, Experience, Project, ProjectStatus,
        Skill, SkillEntry, Testimonial,
    };

    // View helpers
    pub use crate::selectors::{
        ALL_CATEGORIES, filter_projects, format_metric, group_skills, project_categories,
        social_url, timeline,
    };

    // Error types
    pub use crate::errors::{ApiError, ContactError, ContactField};

    // Global initialization
    pub use crate::config::ClientConfig;
    pub use crate::global::init;

    // Endpoint utilities for custom types
    pub use crate::param_utils::IntoEndpoint;
}
