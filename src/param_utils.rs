//! Endpoint normalization utilities for portfolio-provider

/// Trait for normalizing the different ways an endpoint can be passed to a fetch
///
/// This trait allows `Resource` and the `use_api` hook to accept:
/// - `()` for "no endpoint" (the idle, do-not-fetch sentinel)
/// - `&str` / `String` for a path
/// - `Option<&str>` / `Option<String>` where `None` means "do not fetch"
///
/// Empty paths normalize to `None` and a missing leading `/` is added.
///
/// # Examples
///
/// ```rust
/// use portfolio_provider::param_utils::IntoEndpoint;
///
/// assert_eq!("projects".into_endpoint(), Some("/projects".to_string()));
/// assert_eq!(None::<&str>.into_endpoint(), None);
/// assert_eq!(().into_endpoint(), None);
/// ```
pub trait IntoEndpoint {
    /// Convert the input into a normalized endpoint path
    fn into_endpoint(self) -> Option<String>;
}

fn normalize(path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        None
    } else if path.starts_with('/') {
        Some(path.to_string())
    } else {
        Some(format!("/{path}"))
    }
}

impl IntoEndpoint for () {
    fn into_endpoint(self) -> Option<String> {
        None
    }
}

impl IntoEndpoint for &str {
    fn into_endpoint(self) -> Option<String> {
        normalize(self)
    }
}

impl IntoEndpoint for String {
    fn into_endpoint(self) -> Option<String> {
        normalize(&self)
    }
}

impl IntoEndpoint for &String {
    fn into_endpoint(self) -> Option<String> {
        normalize(self)
    }
}

impl<T: IntoEndpoint> IntoEndpoint for Option<T> {
    fn into_endpoint(self) -> Option<String> {
        self.and_then(IntoEndpoint::into_endpoint)
    }
}
