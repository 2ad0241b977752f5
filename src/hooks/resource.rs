//! # Resource Hooks
//!
//! `use_api` is the generic read hook; the named hooks pin it to one typed
//! resource each.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dioxus::prelude::*;
//! use portfolio_provider::prelude::*;
//!
//! #[component]
//! fn ProjectList() -> Element {
//!     let projects = use_projects();
//!
//!     match projects.snapshot() {
//!         State::Success(list) => rsx! {
//!             for project in list {
//!                 p { "{project.title}" }
//!             }
//!         },
//!         State::Error(_) => rsx! {
//!             button { onclick: move |_| projects.refetch(), "Try again" }
//!         },
//!         _ => rsx! { p { "Loading…" } },
//!     }
//! }
//! ```

use std::{cell::RefCell, rc::Rc};

use dioxus::prelude::*;

use crate::{
    errors::ApiError,
    hooks::internal::{use_transport, use_watch_signal},
    models::{DeveloperInfo, Experience, Project, Skill, Testimonial},
    param_utils::IntoEndpoint,
    resource::{Resource, ResourceState},
    resources::{ApiResource, DeveloperProfile, Experiences, Projects, Skills, Testimonials},
    types::ResourceBounds,
};

/// Handle returned by the resource hooks
///
/// Reading through this handle subscribes the component to state changes.
pub struct UseApi<T: 'static> {
    state: Signal<ResourceState<T>>,
    resource: Rc<RefCell<Resource<T>>>,
}

impl<T: 'static> Clone for UseApi<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            resource: self.resource.clone(),
        }
    }
}

impl<T: 'static> PartialEq for UseApi<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<T: ResourceBounds> UseApi<T> {
    /// The state signal itself, for passing to children or `use_memo`
    pub fn state(&self) -> Signal<ResourceState<T>> {
        self.state
    }

    /// Current state
    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading()
    }

    pub fn is_error(&self) -> bool {
        self.state.read().is_error()
    }

    /// Settled data, or the previous snapshot while reloading
    pub fn data(&self) -> Option<T> {
        self.state.read().data().cloned()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.state.read().error().cloned()
    }

    /// Start a new fetch cycle for the current endpoint
    pub fn refetch(&self) {
        self.resource.borrow_mut().refetch();
    }
}

/// Fetch `endpoint` while `enabled`, tracking its state
///
/// - the first render with an endpoint and an open gate issues one GET
/// - a new endpoint, or `enabled` going from false to true, issues one more and
///   aborts the previous request
/// - `enabled == false` or no endpoint keeps the hook idle without requesting
/// - unmounting aborts the in-flight request
///
/// ```rust,no_run
/// use dioxus::prelude::*;
/// use portfolio_provider::{models::Project, prelude::*};
///
/// #[component]
/// fn Featured(slug: Option<String>) -> Element {
///     let project = use_api::<Project>(slug.map(|slug| format!("/projects/{slug}")), true);
///     rsx! { "{project.is_loading()}" }
/// }
/// ```
pub fn use_api<T: ResourceBounds>(endpoint: impl IntoEndpoint, enabled: bool) -> UseApi<T> {
    let transport = use_transport();
    let endpoint = endpoint.into_endpoint();

    let resource = use_hook({
        let endpoint = endpoint.clone();
        move || Rc::new(RefCell::new(Resource::<T>::new(transport, endpoint, enabled)))
    });
    let state = use_watch_signal({
        let resource = resource.clone();
        move || resource.borrow().subscribe()
    });

    let for_effect = resource.clone();
    use_effect(use_reactive!(|(endpoint, enabled)| {
        let mut resource = for_effect.borrow_mut();
        resource.configure(endpoint, enabled);
        resource.mount();
    }));

    let for_drop = resource.clone();
    use_drop(move || for_drop.borrow_mut().unmount());

    UseApi { state, resource }
}

/// Fetch a typed resource while `enabled`
pub fn use_api_resource<R: ApiResource>(enabled: bool) -> UseApi<R::Output> {
    use_api(R::ENDPOINT, enabled)
}

/// The developer profile
pub fn use_developer_info() -> UseApi<DeveloperInfo> {
    use_api_resource::<DeveloperProfile>(true)
}

pub fn use_projects() -> UseApi<Vec<Project>> {
    use_api_resource::<Projects>(true)
}

pub fn use_skills() -> UseApi<Skill> {
    use_api_resource::<Skills>(true)
}

pub fn use_experiences() -> UseApi<Vec<Experience>> {
    use_api_resource::<Experiences>(true)
}

pub fn use_testimonials() -> UseApi<Vec<Testimonial>> {
    use_api_resource::<Testimonials>(true)
}
