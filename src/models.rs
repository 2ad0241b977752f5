//! Data transfer objects mirrored from the backend.
//!
//! Every resource is deserialized at the boundary; a body that does not match
//! these shapes fails the fetch with `ApiError::Deserialize`.

use serde::{Deserialize, Serialize};

/// A named link to an external profile, e.g. `github`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// Headline numbers shown on the hero and skills sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub years_experience: f64,
    pub products_shipped: f64,
    pub active_users: f64,
    pub average_rating: f64,
}

/// The developer profile. One instance per app load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperInfo {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub bio: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    pub avatar: String,
    #[serde(rename = "resumeUrl")]
    pub resume_url: String,
    pub stats: Stats,
    pub availability: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Lifecycle of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Live,
    #[serde(rename = "In Development")]
    InDevelopment,
    Completed,
}

/// A source repository linked from a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub demo_url: String,
    #[serde(default)]
    pub github_repos: Vec<GithubRepo>,
    pub status: ProjectStatus,
    pub category: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub downloads: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A single skill inside the grouped skill document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub years: Option<f64>,
}

/// The skills resource: one document holding a flat list of skills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    pub company: String,
    /// Free text, e.g. "2021 - Present"
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub content: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Raw, unvalidated contact form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Answer of `POST /contact`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default)]
    pub id: Option<String>,
}
