//! Typed portfolio resources
//!
//! Each resource type binds one endpoint of the backend to the model it
//! returns. Hooks and headless [`Resource`] instances are created from these
//! types so an endpoint is never spelled twice.

use crate::{
    models::{DeveloperInfo, Experience, Project, Skill, Testimonial},
    resource::Resource,
    transport::SharedTransport,
    types::ResourceBounds,
};

/// A backend endpoint with a known response shape
pub trait ApiResource: 'static {
    /// Decoded response body
    type Output: ResourceBounds;
    /// Path relative to the API base URL
    const ENDPOINT: &'static str;

    /// Create an unmounted headless instance of this resource
    fn resource(transport: SharedTransport, enabled: bool) -> Resource<Self::Output>
    where
        Self: Sized,
    {
        Resource::typed::<Self>(transport, enabled)
    }
}

/// `GET /developer`: the developer profile
pub struct DeveloperProfile;

impl ApiResource for DeveloperProfile {
    type Output = DeveloperInfo;
    const ENDPOINT: &'static str = "/developer";
}

/// `GET /projects`: every project, in backend order
pub struct Projects;

impl ApiResource for Projects {
    type Output = Vec<Project>;
    const ENDPOINT: &'static str = "/projects";
}

/// `GET /skills`: the skills document
pub struct Skills;

impl ApiResource for Skills {
    type Output = Skill;
    const ENDPOINT: &'static str = "/skills";
}

/// `GET /experiences`: work history
pub struct Experiences;

impl ApiResource for Experiences {
    type Output = Vec<Experience>;
    const ENDPOINT: &'static str = "/experiences";
}

/// `GET /testimonials`: client testimonials
pub struct Testimonials;

impl ApiResource for Testimonials {
    type Output = Vec<Testimonial>;
    const ENDPOINT: &'static str = "/testimonials";
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use serde_json::json;

    use super::*;
    use crate::mock::{Method, ScriptedTransport};

    #[tokio::test]
    async fn typed_resource_hits_its_endpoint() {
        let transport = ScriptedTransport::new();
        transport.respond_json(
            "/experiences",
            json!([{
                "_id": "e1",
                "title": "Engineer",
                "company": "Acme",
                "period": "2021 - Present",
                "description": "Built things",
                "achievements": ["Shipped v2"],
                "order": 1
            }]),
        );

        let mut experiences = Experiences::resource(Arc::new(transport.clone()), true);
        let mut updates = experiences.subscribe();
        experiences.mount();

        let state = tokio::time::timeout(
            Duration::from_secs(1),
            updates.wait_for(|state| state.is_success()),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();

        let data = state.data().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].company, "Acme");
        assert_eq!(transport.call_count(Method::Get, Experiences::ENDPOINT), 1);
    }

    #[test]
    fn endpoints_are_distinct() {
        let endpoints = [
            DeveloperProfile::ENDPOINT,
            Projects::ENDPOINT,
            Skills::ENDPOINT,
            Experiences::ENDPOINT,
            Testimonials::ENDPOINT,
        ];
        let unique: std::collections::BTreeSet<_> = endpoints.iter().collect();
        assert_eq!(unique.len(), endpoints.len());
    }
}
