//! # Resource fetch instances
//!
//! A [`Resource`] is one instance of the generic read primitive: it fetches a
//! single endpoint, tracks `Idle → Loading → Success | Error`, and publishes
//! every transition through a `tokio::sync::watch` channel.
//!
//! ## Activation
//!
//! A resource is active when it is mounted, has an endpoint and is enabled.
//! Becoming active (mounting, enabling, or switching endpoints) starts exactly
//! one fetch cycle, aborting a cycle still in flight. Disabling aborts the
//! in-flight request and returns a loading resource to `Idle`; an abort is
//! never reported as an error. After [`Resource::unmount`] (or drop) no state
//! change is published at all.
//!
//! ## Example
//!
//! ```rust,no_run
//! use portfolio_provider::{
//!     config::ClientConfig, models::Project, resource::Resource, transport::ApiClient,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ApiClient::new(&ClientConfig::from_env()?)?.into_shared();
//! let mut projects = Resource::<Vec<Project>>::new(transport, "/projects", true);
//! let mut updates = projects.subscribe();
//! projects.mount();
//! updates.wait_for(|state| !state.is_loading()).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    errors::ApiError,
    param_utils::IntoEndpoint,
    resources::ApiResource,
    runtime::{CycleOutcome, FetchCycle, request::fetch_resource},
    state::State,
    transport::SharedTransport,
    types::ResourceBounds,
};

/// Observable state of a resource
pub type ResourceState<T> = State<T, ApiError>;

/// One independent fetch instance for a single endpoint
pub struct Resource<T> {
    transport: SharedTransport,
    endpoint: Option<String>,
    enabled: bool,
    cycle: FetchCycle,
    state: Arc<watch::Sender<ResourceState<T>>>,
}

impl<T: ResourceBounds> Resource<T> {
    /// Create an unmounted resource; nothing is fetched until [`Resource::mount`]
    pub fn new(transport: SharedTransport, endpoint: impl IntoEndpoint, enabled: bool) -> Self {
        let (state, _) = watch::channel(State::Idle);
        Self {
            transport,
            endpoint: endpoint.into_endpoint(),
            enabled,
            cycle: FetchCycle::new(),
            state: Arc::new(state),
        }
    }

    /// Create a resource bound to the endpoint of `R`
    pub fn typed<R>(transport: SharedTransport, enabled: bool) -> Self
    where
        R: ApiResource<Output = T>,
    {
        Self::new(transport, R::ENDPOINT, enabled)
    }

    /// Mount the resource and start fetching if it is active
    ///
    /// Mounting twice is a no-op.
    pub fn mount(&mut self) {
        if self.cycle.is_mounted() {
            return;
        }
        self.cycle.mount();
        if self.is_active() {
            self.start_cycle();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.cycle.is_mounted()
    }

    /// Whether this resource currently wants data: it has an endpoint and is enabled
    pub fn is_active(&self) -> bool {
        self.enabled && self.endpoint.is_some()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Switch to another endpoint (or to none)
    pub fn set_endpoint(&mut self, endpoint: impl IntoEndpoint) {
        let enabled = self.enabled;
        self.configure(endpoint, enabled);
    }

    /// Open or close the enabled gate
    pub fn set_enabled(&mut self, enabled: bool) {
        let endpoint = self.endpoint.clone();
        self.configure(endpoint, enabled);
    }

    /// Apply endpoint and gate together, starting at most one cycle
    ///
    /// - unchanged inputs do nothing
    /// - an active result starts a new cycle, aborting the previous one
    /// - an inactive result aborts the in-flight request; a loading resource
    ///   returns to `Idle`, and so does a settled one whose endpoint changed
    pub fn configure(&mut self, endpoint: impl IntoEndpoint, enabled: bool) {
        let endpoint = endpoint.into_endpoint();
        let endpoint_changed = endpoint != self.endpoint;
        if !endpoint_changed && enabled == self.enabled {
            return;
        }
        self.endpoint = endpoint;
        self.enabled = enabled;

        if self.is_active() {
            self.start_cycle();
        } else {
            self.deactivate(endpoint_changed);
        }
    }

    /// Start a fresh cycle for the current endpoint, e.g. from a "Try again" action
    pub fn refetch(&mut self) {
        if self.is_active() {
            self.start_cycle();
        }
    }

    /// Abort any in-flight request and stop publishing state
    pub fn unmount(&mut self) {
        if self.cycle.is_mounted() {
            crate::debug_log!(
                "🧹 [CLEANUP] Unmounting resource {:?}",
                self.endpoint.as_deref()
            );
        }
        self.cycle.unmount();
    }

    /// Current state snapshot
    pub fn state(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    /// Subscribe to state transitions
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    fn deactivate(&mut self, reset_settled: bool) {
        let canceled = self.cycle.cancel();
        if canceled {
            crate::log_fetch_cancel!("Deactivated {:?}", self.endpoint.as_deref());
        }
        if !self.cycle.is_mounted() {
            return;
        }
        self.state.send_if_modified(|state| {
            if state.is_loading() || (reset_settled && !state.is_idle()) {
                *state = State::Idle;
                true
            } else {
                false
            }
        });
    }

    fn start_cycle(&mut self) {
        let Some(endpoint) = self.endpoint.clone() else {
            return;
        };
        let Some((ticket, registration)) = self.cycle.begin() else {
            return;
        };

        self.state.send_modify(|state| *state = state.reloading());
        crate::log_fetch_start!("GET {}", endpoint);

        let transport = self.transport.clone();
        let cycle = self.cycle.clone();
        let state = self.state.clone();

        tokio::spawn(async move {
            match fetch_resource::<T>(transport.as_ref(), &endpoint, registration).await {
                CycleOutcome::Canceled => {
                    crate::log_fetch_cancel!("Aborted GET {}", endpoint);
                }
                CycleOutcome::Settled(result) => {
                    let failure = result.as_ref().err().map(ToString::to_string);
                    let applied = cycle.settle(ticket, || {
                        state.send_replace(State::from(result));
                    });
                    match (applied, failure) {
                        (false, _) => {
                            crate::log_fetch_cancel!("Discarded stale response for {}", endpoint);
                        }
                        (true, Some(error)) => {
                            crate::log_fetch_error!("GET {} failed: {}", endpoint, error);
                        }
                        (true, None) => {
                            crate::log_fetch_success!("GET {}", endpoint);
                        }
                    }
                }
            }
        });
    }
}

impl<T> Drop for Resource<T> {
    fn drop(&mut self) {
        self.cycle.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::mock::{Method, ScriptedTransport};

    async fn settled<T: ResourceBounds>(
        receiver: &mut watch::Receiver<ResourceState<T>>,
    ) -> ResourceState<T> {
        let state = tokio::time::timeout(
            Duration::from_secs(1),
            receiver.wait_for(|state| state.is_success() || state.is_error()),
        )
        .await
        .expect("resource did not settle")
        .expect("state channel closed");
        state.clone()
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while !condition() {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("condition not reached");
    }

    fn shared(transport: &ScriptedTransport) -> SharedTransport {
        Arc::new(transport.clone())
    }

    #[tokio::test]
    async fn mount_fetches_once_and_publishes_body() {
        let transport = ScriptedTransport::new();
        transport.respond_json("/numbers", json!([1, 2, 3]));

        let mut resource = Resource::<Vec<u32>>::new(shared(&transport), "/numbers", true);
        let mut updates = resource.subscribe();
        assert!(resource.state().is_idle());

        resource.mount();
        assert!(resource.state().is_loading());
        assert_eq!(settled(&mut updates).await, State::Success(vec![1, 2, 3]));
        assert_eq!(transport.call_count(Method::Get, "/numbers"), 1);
        assert_eq!(transport.aborted(), 0);

        resource.mount();
        tokio::task::yield_now().await;
        assert_eq!(transport.call_count(Method::Get, "/numbers"), 1);
    }

    #[tokio::test]
    async fn server_error_settles_without_data() {
        let transport = ScriptedTransport::new();
        transport.fail(
            "/numbers",
            ApiError::Status {
                status: 500,
                body: "boom".into(),
            },
        );

        let mut resource = Resource::<Vec<u32>>::new(shared(&transport), "/numbers", true);
        let mut updates = resource.subscribe();
        resource.mount();

        let state = settled(&mut updates).await;
        assert!(state.is_error());
        assert!(!state.is_loading());
        assert_eq!(state.data(), None);
        assert_eq!(state.error().and_then(ApiError::status), Some(500));
    }

    #[tokio::test]
    async fn shape_mismatch_is_a_deserialize_error() {
        let transport = ScriptedTransport::new();
        transport.respond_json("/numbers", json!({ "not": "a list" }));

        let mut resource = Resource::<Vec<u32>>::new(shared(&transport), "/numbers", true);
        let mut updates = resource.subscribe();
        resource.mount();

        assert!(matches!(
            settled(&mut updates).await,
            State::Error(ApiError::Deserialize(_))
        ));
    }

    #[tokio::test]
    async fn missing_endpoint_or_closed_gate_stays_idle() {
        let transport = ScriptedTransport::new();

        let mut no_endpoint = Resource::<u32>::new(shared(&transport), None::<&str>, true);
        no_endpoint.mount();
        let mut gated = Resource::<u32>::new(shared(&transport), "/count", false);
        gated.mount();
        tokio::task::yield_now().await;

        assert!(no_endpoint.state().is_idle());
        assert!(gated.state().is_idle());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn opening_the_gate_fetches_exactly_once() {
        let transport = ScriptedTransport::new();
        transport.respond_json("/count", json!(4));

        let mut resource = Resource::<u32>::new(shared(&transport), "/count", false);
        let mut updates = resource.subscribe();
        resource.mount();
        resource.set_enabled(true);
        resource.set_enabled(true);

        assert_eq!(settled(&mut updates).await, State::Success(4));
        assert_eq!(transport.call_count(Method::Get, "/count"), 1);
    }

    #[tokio::test]
    async fn unmount_aborts_without_error_or_update() {
        let transport = ScriptedTransport::new();
        transport.hang("/count");

        let mut resource = Resource::<u32>::new(shared(&transport), "/count", true);
        resource.mount();
        wait_until(|| transport.call_count(Method::Get, "/count") == 1).await;
        assert_eq!(transport.aborted(), 0);

        resource.unmount();
        wait_until(|| transport.aborted() == 1).await;
        tokio::task::yield_now().await;

        // The last published state is the one from before unmounting.
        assert!(resource.state().is_loading());
        assert!(!resource.state().is_error());
    }

    #[tokio::test]
    async fn disabling_mid_flight_returns_to_idle() {
        let transport = ScriptedTransport::new();
        transport.hang("/count");

        let mut resource = Resource::<u32>::new(shared(&transport), "/count", true);
        resource.mount();
        assert!(resource.state().is_loading());

        assert_eq!(transport.aborted(), 0);
        resource.set_enabled(false);
        assert!(resource.state().is_idle());
        wait_until(|| transport.aborted() == 1).await;
        assert!(!resource.state().is_error());
    }

    #[tokio::test]
    async fn endpoint_switch_supersedes_pending_cycle() {
        let transport = ScriptedTransport::new();
        let first = transport.hold(Method::Get, "/a");
        transport.respond_json("/b", json!(2));

        let mut resource = Resource::<u32>::new(shared(&transport), "/a", true);
        let mut updates = resource.subscribe();
        resource.mount();
        wait_until(|| transport.call_count(Method::Get, "/a") == 1).await;

        resource.set_endpoint("/b");
        assert_eq!(settled(&mut updates).await, State::Success(2));

        // The first request was aborted, so its late answer goes nowhere.
        wait_until(|| transport.aborted() == 1).await;
        assert!(!first.succeed(json!(1)));
        tokio::task::yield_now().await;
        assert_eq!(resource.state(), State::Success(2));
    }

    #[tokio::test]
    async fn refetch_keeps_previous_snapshot_while_loading() {
        let transport = ScriptedTransport::new();
        transport.respond_json("/count", json!(1));

        let mut resource = Resource::<u32>::new(shared(&transport), "/count", true);
        let mut updates = resource.subscribe();
        resource.mount();
        assert_eq!(settled(&mut updates).await, State::Success(1));

        let gate = transport.hold(Method::Get, "/count");
        resource.refetch();
        assert_eq!(
            resource.state(),
            State::Loading {
                previous: Some(1)
            }
        );

        wait_until(|| transport.call_count(Method::Get, "/count") == 2).await;
        assert!(gate.succeed(json!(5)));
        updates.mark_unchanged();
        assert_eq!(settled(&mut updates).await, State::Success(5));
    }

    #[tokio::test]
    async fn try_again_after_failure_recovers() {
        let transport = ScriptedTransport::new();
        transport
            .respond_json("/count", json!(9))
            .enqueue("/count", Err(ApiError::Timeout));

        let mut resource = Resource::<u32>::new(shared(&transport), "/count", true);
        let mut updates = resource.subscribe();
        resource.mount();
        assert_eq!(settled(&mut updates).await, State::Error(ApiError::Timeout));

        resource.refetch();
        assert_eq!(settled(&mut updates).await, State::Success(9));
    }

    #[tokio::test]
    async fn instances_do_not_share_state() {
        let transport = ScriptedTransport::new();
        transport.respond_json("/count", json!(3));

        let mut first = Resource::<u32>::new(shared(&transport), "/count", true);
        let mut second = Resource::<u32>::new(shared(&transport), "/count", true);
        let mut first_updates = first.subscribe();
        first.mount();
        assert_eq!(settled(&mut first_updates).await, State::Success(3));

        assert!(second.state().is_idle());
        second.mount();
        assert!(second.state().is_loading());
        assert_eq!(first.state(), State::Success(3));

        second.unmount();
        wait_until(|| transport.call_count(Method::Get, "/count") == 2).await;
        assert_eq!(first.state(), State::Success(3));
        assert!(second.state().is_loading());
    }
}
