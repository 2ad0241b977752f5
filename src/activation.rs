//! Lazy activation of resources on viewport visibility
//!
//! A section that fetches only once it scrolls into view holds a
//! [`LazyActivation`]. Visibility is observed by the host (an intersection
//! observer, a scroll handler) and fed in as a boolean or a visible ratio; the
//! machine decides when the enabled gate of a resource opens.
//!
//! ```text
//! Inactive ──in view──▶ Armed ──fetch started──▶ Fetching
//!    ▲                    │                          │
//!    └──── out of view (unless trigger_once) ────────┘
//! ```

use crate::{resource::Resource, types::ResourceBounds};

/// Share of an element that must be visible to count as in view
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivationPhase {
    /// Not yet in view; the gate is closed
    #[default]
    Inactive,
    /// In view; the gate is open but no fetch has started
    Armed,
    /// A fetch was started through the open gate
    Fetching,
}

/// Viewport-driven enabled gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LazyActivation {
    phase: ActivationPhase,
    trigger_once: bool,
    threshold: f64,
}

impl LazyActivation {
    /// With `trigger_once`, leaving the viewport after activation keeps the gate open
    pub fn new(trigger_once: bool) -> Self {
        Self {
            phase: ActivationPhase::Inactive,
            trigger_once,
            threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }

    /// Set the visible share needed by [`LazyActivation::observe_ratio`], clamped to `0.0..=1.0`
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn phase(&self) -> ActivationPhase {
        self.phase
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the enabled gate is open
    pub fn is_enabled(&self) -> bool {
        self.phase != ActivationPhase::Inactive
    }

    /// Feed one visibility observation
    pub fn observe(&mut self, in_view: bool) -> ActivationPhase {
        self.phase = match (self.phase, in_view) {
            (ActivationPhase::Inactive, true) => ActivationPhase::Armed,
            (_, false) if !self.trigger_once => ActivationPhase::Inactive,
            (phase, _) => phase,
        };
        self.phase
    }

    /// Feed a visible ratio; NaN counts as not visible
    pub fn observe_ratio(&mut self, ratio: f64) -> ActivationPhase {
        self.observe(ratio >= self.threshold)
    }

    /// Record that a fetch went out through the open gate
    pub fn fetch_started(&mut self) {
        if self.phase == ActivationPhase::Armed {
            self.phase = ActivationPhase::Fetching;
        }
    }

    /// Apply one observation to `resource`'s enabled gate
    pub fn drive<T: ResourceBounds>(&mut self, resource: &mut Resource<T>, in_view: bool) {
        self.observe(in_view);
        resource.set_enabled(self.is_enabled());
        if resource.is_mounted() && resource.is_active() {
            self.fetch_started();
        }
    }
}

impl Default for LazyActivation {
    fn default() -> Self {
        Self::new(true)
    }
}
