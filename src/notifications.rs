//! # Notification service
//!
//! An explicit, cloneable toast queue passed to components through context
//! instead of living in module-level state.
//!
//! - At most `limit` toasts are kept (default 1); the newest comes first.
//! - [`NotificationCenter::dismiss`] closes a toast right away and removes it
//!   after the removal delay, when a tokio runtime is available to run the timer.
//! - Observers register with [`NotificationCenter::subscribe`]. The list is
//!   bounded, and dropping the returned [`Subscription`] unregisters it.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, Weak},
    time::Duration,
};

use tokio::sync::watch;

use crate::errors::NotificationError;

/// Maximum number of toasts kept at once
pub const DEFAULT_TOAST_LIMIT: usize = 1;

/// Delay between dismissing a toast and removing it
pub const DEFAULT_REMOVE_DELAY: Duration = Duration::from_millis(1_000_000);

/// Maximum number of live subscriptions
pub const DEFAULT_MAX_SUBSCRIBERS: usize = 64;

/// Identifier of a toast, unique per [`NotificationCenter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToastVariant {
    #[default]
    Info,
    Success,
    Error,
}

/// Screen corner or edge a toast is anchored to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

/// Content of a toast
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    /// Auto-dismiss after this long; `None` keeps the toast until dismissed
    pub duration: Option<Duration>,
    pub position: ToastPosition,
}

impl Toast {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant: ToastVariant::Info,
            duration: None,
            position: ToastPosition::default(),
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title).with_variant(ToastVariant::Success)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title).with_variant(ToastVariant::Error)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }
}

/// A toast held by the center
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveToast {
    pub id: ToastId,
    pub toast: Toast,
    /// False once dismissed; the toast stays listed until removed
    pub open: bool,
}

struct Registry {
    next_id: u64,
    toasts: Vec<ActiveToast>,
    scheduled_removals: HashSet<ToastId>,
    subscribers: usize,
}

struct Shared {
    registry: Mutex<Registry>,
    published: watch::Sender<Vec<ActiveToast>>,
    limit: usize,
    remove_delay: Duration,
    max_subscribers: usize,
}

/// Handle to a toast queue; clones share the same queue
#[derive(Clone)]
pub struct NotificationCenter {
    shared: Arc<Shared>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_TOAST_LIMIT, DEFAULT_REMOVE_DELAY, DEFAULT_MAX_SUBSCRIBERS)
    }

    /// Create a center with a custom toast limit, removal delay and subscriber bound
    ///
    /// A limit of zero is raised to one.
    pub fn with_settings(limit: usize, remove_delay: Duration, max_subscribers: usize) -> Self {
        let (published, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                registry: Mutex::new(Registry {
                    next_id: 0,
                    toasts: Vec::new(),
                    scheduled_removals: HashSet::new(),
                    subscribers: 0,
                }),
                published,
                limit: limit.max(1),
                remove_delay,
                max_subscribers,
            }),
        }
    }

    /// Show a toast and return its id
    pub fn notify(&self, toast: Toast) -> ToastId {
        let duration = toast.duration;
        let id = self.mutate(|registry, limit| {
            registry.next_id = registry.next_id.wrapping_add(1);
            let id = ToastId(registry.next_id);
            registry.toasts.insert(
                0,
                ActiveToast {
                    id,
                    toast,
                    open: true,
                },
            );
            registry.toasts.truncate(limit);
            let toasts = &registry.toasts;
            registry
                .scheduled_removals
                .retain(|pending| toasts.iter().any(|active| active.id == *pending));
            id
        });
        crate::log_notify!("Added toast {:?}", id);

        if let Some(duration) = duration {
            self.schedule(duration, move |center| center.dismiss(Some(id)));
        }
        id
    }

    /// Shorthand for [`Toast::success`] with a description
    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) -> ToastId {
        self.notify(Toast::success(title).with_description(description))
    }

    /// Shorthand for [`Toast::error`] with a description
    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) -> ToastId {
        self.notify(Toast::error(title).with_description(description))
    }

    /// Edit a listed toast in place; returns false if it is gone
    pub fn update(&self, id: ToastId, edit: impl FnOnce(&mut Toast)) -> bool {
        self.mutate(|registry, _| {
            match registry.toasts.iter_mut().find(|active| active.id == id) {
                Some(active) => {
                    edit(&mut active.toast);
                    true
                }
                None => false,
            }
        })
    }

    /// Close one toast, or every toast with `None`, and schedule its removal
    pub fn dismiss(&self, id: Option<ToastId>) {
        let timers = Self::timer_handle();
        let to_schedule = self.mutate(|registry, _| {
            let mut newly_scheduled = Vec::new();
            for active in registry
                .toasts
                .iter_mut()
                .filter(|active| id.is_none_or(|id| active.id == id))
            {
                active.open = false;
                newly_scheduled.push(active.id);
            }
            if timers.is_some() {
                newly_scheduled.retain(|id| registry.scheduled_removals.insert(*id));
            }
            newly_scheduled
        });

        for id in to_schedule {
            crate::log_notify!("Dismissed toast {:?}", id);
            if let Some(handle) = &timers {
                self.schedule_on(handle, self.shared.remove_delay, move |center| {
                    center.remove(Some(id));
                });
            }
        }
    }

    /// Drop one toast, or every toast with `None`, immediately
    pub fn remove(&self, id: Option<ToastId>) {
        self.mutate(|registry, _| match id {
            Some(id) => {
                registry.toasts.retain(|active| active.id != id);
                registry.scheduled_removals.remove(&id);
            }
            None => {
                registry.toasts.clear();
                registry.scheduled_removals.clear();
            }
        });
    }

    /// Current toasts, newest first
    pub fn toasts(&self) -> Vec<ActiveToast> {
        self.shared.published.borrow().clone()
    }

    /// Register an observer of the toast list
    pub fn subscribe(&self) -> Result<Subscription, NotificationError> {
        let mut registry = match self.shared.registry.lock() {
            Ok(registry) => registry,
            Err(poisoned) => poisoned.into_inner(),
        };
        if registry.subscribers >= self.shared.max_subscribers {
            return Err(NotificationError::TooManySubscribers(
                self.shared.max_subscribers,
            ));
        }
        registry.subscribers += 1;
        crate::debug_log!("🔔 [NOTIFY] Subscriber registered ({})", registry.subscribers);
        Ok(Subscription {
            receiver: self.shared.published.subscribe(),
            shared: Arc::downgrade(&self.shared),
        })
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.shared
            .registry
            .lock()
            .map(|registry| registry.subscribers)
            .unwrap_or(0)
    }

    fn mutate<R>(&self, op: impl FnOnce(&mut Registry, usize) -> R) -> R {
        let mut registry = match self.shared.registry.lock() {
            Ok(registry) => registry,
            Err(poisoned) => poisoned.into_inner(),
        };
        let result = op(&mut registry, self.shared.limit);
        let snapshot = registry.toasts.clone();
        self.shared.published.send_if_modified(|published| {
            if *published == snapshot {
                false
            } else {
                *published = snapshot;
                true
            }
        });
        result
    }

    fn timer_handle() -> Option<tokio::runtime::Handle> {
        let handle = tokio::runtime::Handle::try_current().ok();
        if handle.is_none() {
            crate::debug_log!("🔔 [NOTIFY] No runtime, timer skipped");
        }
        handle
    }

    fn schedule(&self, delay: Duration, action: impl FnOnce(NotificationCenter) + Send + 'static) {
        if let Some(handle) = Self::timer_handle() {
            self.schedule_on(&handle, delay, action);
        }
    }

    fn schedule_on(
        &self,
        handle: &tokio::runtime::Handle,
        delay: Duration,
        action: impl FnOnce(NotificationCenter) + Send + 'static,
    ) {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = shared.upgrade() {
                action(NotificationCenter { shared });
            }
        });
    }
}

/// A registered observer; unregisters on drop
pub struct Subscription {
    receiver: watch::Receiver<Vec<ActiveToast>>,
    shared: Weak<Shared>,
}

impl Subscription {
    /// Latest toast list
    pub fn current(&self) -> Vec<ActiveToast> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change; false once the center is gone
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// A receiver following the same list
    pub fn receiver(&self) -> watch::Receiver<Vec<ActiveToast>> {
        self.receiver.clone()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let mut registry = match shared.registry.lock() {
            Ok(registry) => registry,
            Err(poisoned) => poisoned.into_inner(),
        };
        registry.subscribers = registry.subscribers.saturating_sub(1);
    }
}
