//! Internal helpers shared by the hooks
//!
//! Not part of the public API beyond the transport lookup hooks.

use dioxus::prelude::*;
use tokio::sync::watch;

use crate::{global::get_global_transport, transport::SharedTransport};

/// Provide a transport to every hook below this component
///
/// Hooks in the subtree use it instead of the global client, which is how
/// tests and previews swap in a scripted transport.
pub fn use_transport_provider(init: impl FnOnce() -> SharedTransport) -> SharedTransport {
    use_context_provider(init)
}

/// Resolve the transport for this component: context first, then the global client
///
/// # Panics
///
/// Panics if neither a context transport nor a global client is available.
pub fn use_transport() -> SharedTransport {
    use_hook(|| {
        try_consume_context::<SharedTransport>()
            .or_else(|| get_global_transport().ok())
            .unwrap_or_else(|| {
                panic!(
                    "No transport available. Call portfolio_provider::init() or provide one with use_transport_provider()."
                )
            })
    })
}

/// Mirror a watch channel into a signal owned by the current scope
///
/// The forwarding task is spawned on the scope and dropped with it.
pub(crate) fn use_watch_signal<S>(subscribe: impl FnOnce() -> watch::Receiver<S>) -> Signal<S>
where
    S: Clone + PartialEq + 'static,
{
    use_hook(|| {
        let mut receiver = subscribe();
        let mut signal = Signal::new(receiver.borrow_and_update().clone());
        spawn(async move {
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                if *signal.peek() != next {
                    signal.set(next);
                }
            }
        });
        signal
    })
}
