//! # Notification Hooks
//!
//! The app root provides one [`NotificationCenter`] through context; any
//! component below may raise toasts, and a toaster component observes them.

use dioxus::prelude::*;

use crate::notifications::{ActiveToast, NotificationCenter, ToastId};

/// Provide a fresh notification center to the subtree
pub fn use_notification_provider() -> NotificationCenter {
    use_context_provider(NotificationCenter::new)
}

/// Handle returned by [`use_notifications`]
#[derive(Clone)]
pub struct UseNotifications {
    center: NotificationCenter,
    toasts: Signal<Vec<ActiveToast>>,
}

impl PartialEq for UseNotifications {
    fn eq(&self, other: &Self) -> bool {
        self.toasts == other.toasts
    }
}

impl UseNotifications {
    /// The shared center, for raising toasts
    pub fn center(&self) -> &NotificationCenter {
        &self.center
    }

    /// Toasts currently listed, newest first
    pub fn toasts(&self) -> Vec<ActiveToast> {
        self.toasts.read().clone()
    }

    pub fn dismiss(&self, id: Option<ToastId>) {
        self.center.dismiss(id);
    }
}

/// Observe the notification center provided above this component
///
/// The component holds one subscription for its lifetime. When the
/// subscriber bound is reached the hook still returns the center, but its
/// toast list is not kept up to date.
///
/// # Panics
///
/// Panics if no ancestor called [`use_notification_provider`].
pub fn use_notifications() -> UseNotifications {
    let center = use_context::<NotificationCenter>();
    let toasts = use_hook({
        let center = center.clone();
        move || {
            let mut toasts = Signal::new(center.toasts());
            match center.subscribe() {
                Ok(mut subscription) => {
                    spawn(async move {
                        while subscription.changed().await {
                            let next = subscription.current();
                            if *toasts.peek() != next {
                                toasts.set(next);
                            }
                        }
                    });
                }
                Err(_err) => {
                    crate::debug_log!("🔔 [NOTIFY] Not subscribing: {}", _err);
                }
            }
            toasts
        }
    });

    UseNotifications { center, toasts }
}
