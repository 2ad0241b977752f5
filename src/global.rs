//! # Global Client Management
//!
//! This module holds the process-wide transport that hooks fall back to when
//! no transport has been provided through component context.

use std::sync::{Arc, OnceLock};

use crate::{
    config::ClientConfig,
    errors::GlobalError,
    transport::{ApiClient, SharedTransport, Transport},
};

/// Global singleton instance of the shared transport
static GLOBAL_TRANSPORT: OnceLock<SharedTransport> = OnceLock::new();

/// Initialize the global client from the process environment
///
/// Reads `PORTFOLIO_BACKEND_URL` (and optionally `PORTFOLIO_DEV_LOGGING`) and
/// installs an [`ApiClient`] built from them.
///
/// ## Example
///
/// ```rust,no_run
/// use dioxus::prelude::*;
///
/// fn main() {
///     portfolio_provider::init().expect("backend configuration");
///     dioxus::launch(App);
/// }
///
/// #[component]
/// fn App() -> Element {
///     rsx! { div { "Portfolio" } }
/// }
/// ```
pub fn init() -> Result<(), GlobalError> {
    let config = ClientConfig::from_env()?;
    init_with(&config)
}

/// Initialize the global client with an explicit configuration
pub fn init_with(config: &ClientConfig) -> Result<(), GlobalError> {
    let client = ApiClient::new(config)?;
    init_with_transport(client)
}

/// Install any transport as the global one
///
/// ## Errors
///
/// Returns `GlobalError::AlreadyInitialized` if a transport was installed before.
pub fn init_with_transport(transport: impl Transport) -> Result<(), GlobalError> {
    GLOBAL_TRANSPORT
        .set(Arc::new(transport))
        .map_err(|_| GlobalError::AlreadyInitialized)
}

/// Get the global transport instance
///
/// ## Errors
///
/// Returns `GlobalError::NotInitialized` if `init()` has not been called yet.
pub fn get_global_transport() -> Result<SharedTransport, GlobalError> {
    GLOBAL_TRANSPORT
        .get()
        .cloned()
        .ok_or(GlobalError::NotInitialized)
}

/// Check if the global transport has been initialized
pub fn is_initialized() -> bool {
    GLOBAL_TRANSPORT.get().is_some()
}
