//! Pure view helpers applied to fetched snapshots.
//!
//! Nothing here touches the network or mutates its input; callers pass the
//! data of a settled resource and render the result.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Experience, Project, SkillEntry, SocialLink, Testimonial};

/// Pseudo-category selecting every project
pub const ALL_CATEGORIES: &str = "All";

/// Distinct project categories, sorted, with [`ALL_CATEGORIES`] first
///
/// ```rust
/// # use portfolio_provider::selectors::project_categories;
/// assert_eq!(project_categories(&[]), vec!["All".to_string()]);
/// ```
pub fn project_categories(projects: &[Project]) -> Vec<String> {
    let distinct: BTreeSet<&str> = projects
        .iter()
        .map(|project| project.category.as_str())
        .filter(|category| *category != ALL_CATEGORIES)
        .collect();

    std::iter::once(ALL_CATEGORIES)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

/// Projects in `category`, in their original order; [`ALL_CATEGORIES`] keeps all
pub fn filter_projects<'a>(projects: &'a [Project], category: &str) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| category == ALL_CATEGORIES || project.category == category)
        .collect()
}

/// Skill names per category, each bucket in first-seen order
pub fn group_skills(skills: &[SkillEntry]) -> BTreeMap<String, Vec<String>> {
    skills
        .iter()
        .fold(BTreeMap::new(), |mut groups, skill| {
            groups
                .entry(skill.category.clone())
                .or_insert_with(Vec::new)
                .push(skill.name.clone());
            groups
        })
}

/// URL of the social link named exactly `platform`, or `""`
pub fn social_url<'a>(social: &'a [SocialLink], platform: &str) -> &'a str {
    social
        .iter()
        .find(|link| link.name == platform)
        .map(|link| link.url.as_str())
        .unwrap_or("")
}

/// Entities with a backend-assigned display position
pub trait DisplayOrder {
    fn display_order(&self) -> i64;
}

impl DisplayOrder for Project {
    fn display_order(&self) -> i64 {
        self.order
    }
}

impl DisplayOrder for Experience {
    fn display_order(&self) -> i64 {
        self.order
    }
}

impl DisplayOrder for Testimonial {
    fn display_order(&self) -> i64 {
        self.order
    }
}

/// Borrowed items sorted by ascending display order; ties keep input order
pub fn in_display_order<T: DisplayOrder>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.display_order());
    sorted
}

/// Experiences as a timeline, ascending by `order`
pub fn timeline(experiences: &[Experience]) -> Vec<&Experience> {
    in_display_order(experiences)
}

pub fn ordered_testimonials(testimonials: &[Testimonial]) -> Vec<&Testimonial> {
    in_display_order(testimonials)
}

/// Compact form of a headline number: `950`, `15.4K`, `2M`, `1.2B`
///
/// The value is rounded to an integer first (halves round up), then scaled
/// with one decimal and a trailing `.0` dropped.
pub fn format_metric(value: f64) -> String {
    let rounded = (value + 0.5).floor();
    if rounded < 1_000.0 {
        return format!("{rounded}");
    }

    let (scaled, suffix) = if rounded < 1_000_000.0 {
        (rounded / 1_000.0, "K")
    } else if rounded < 1_000_000_000.0 {
        (rounded / 1_000_000.0, "M")
    } else {
        (rounded / 1_000_000_000.0, "B")
    };

    let tenths = (scaled * 10.0).round();
    let whole = (tenths / 10.0).trunc();
    let fraction = tenths - whole * 10.0;
    if fraction == 0.0 {
        format!("{whole}{suffix}")
    } else {
        format!("{whole}.{fraction}{suffix}")
    }
}
