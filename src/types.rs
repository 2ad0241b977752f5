//! Common types and aliases used throughout portfolio-provider

use serde::de::DeserializeOwned;

/// Common trait bounds for data fetched from a resource endpoint
pub trait ResourceBounds: DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {}
impl<T> ResourceBounds for T where T: DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {}
