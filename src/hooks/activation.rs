//! # Lazy Activation Hooks
//!
//! Defer a fetch until its section scrolls into view.
//!
//! ```rust,no_run
//! use dioxus::prelude::*;
//! use portfolio_provider::{prelude::*, resources::Testimonials};
//!
//! #[component]
//! fn TestimonialsSection() -> Element {
//!     let mut activation = use_lazy_activation(true);
//!     let testimonials = use_lazy_resource::<Testimonials>(activation);
//!
//!     rsx! {
//!         section {
//!             // Wire this to an intersection observer in a real page.
//!             onmouseenter: move |_| activation.observe(true),
//!             "{testimonials.data().map(|t| t.len()).unwrap_or(0)} testimonials"
//!         }
//!     }
//! }
//! ```

use dioxus::prelude::*;

use crate::{
    activation::{ActivationPhase, LazyActivation},
    hooks::resource::{UseApi, use_api},
    resources::ApiResource,
};

/// Reactive handle over a [`LazyActivation`]
#[derive(Clone, Copy, PartialEq)]
pub struct UseLazyActivation {
    activation: Signal<LazyActivation>,
}

impl UseLazyActivation {
    /// Feed a visibility observation, typically from an intersection event
    pub fn observe(&mut self, in_view: bool) {
        let current = *self.activation.peek();
        let mut next = current;
        next.observe(in_view);
        if next != current {
            self.activation.set(next);
        }
    }

    /// Feed a visible ratio, compared against the activation threshold
    pub fn observe_ratio(&mut self, ratio: f64) {
        let threshold = self.activation.peek().threshold();
        self.observe(ratio >= threshold);
    }

    pub fn is_enabled(&self) -> bool {
        self.activation.read().is_enabled()
    }

    pub fn phase(&self) -> ActivationPhase {
        self.activation.read().phase()
    }

    fn fetch_started(&mut self) {
        if self.activation.peek().phase() == ActivationPhase::Armed {
            self.activation.write().fetch_started();
        }
    }
}

/// Track viewport activation for this component
pub fn use_lazy_activation(trigger_once: bool) -> UseLazyActivation {
    let activation = use_signal(|| LazyActivation::new(trigger_once));
    UseLazyActivation { activation }
}

/// Fetch `R` once `activation` has opened its gate
pub fn use_lazy_resource<R: ApiResource>(activation: UseLazyActivation) -> UseApi<R::Output> {
    let enabled = activation.is_enabled();
    let api = use_api::<R::Output>(R::ENDPOINT, enabled);

    let mut activation = activation;
    use_effect(use_reactive!(|enabled| {
        if enabled {
            activation.fetch_started();
        }
    }));

    api
}
