use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A portfolio or personal project entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A previously held job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

/// A person's contact and portfolio record, exposed as `/api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub profession: String,
    pub photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub awards: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub personal_projects: Vec<Project>,
    #[serde(default)]
    pub previous_positions: Vec<Position>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Social profile URLs in display order, skipping the unset ones
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("LinkedIn", self.linkedin.as_deref()),
            ("GitHub", self.github.as_deref()),
            ("Instagram", self.instagram.as_deref()),
            ("Twitter", self.twitter.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.filter(|u| !u.trim().is_empty()).map(|u| (label, u)))
        .collect()
    }

    /// Case-insensitive substring match on name, profession or company.
    /// An empty term matches every profile.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&term)
            || self.profession.to_lowercase().contains(&term)
            || self
                .company
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profile {
        serde_json::from_value(serde_json::json!({
            "id": "6a2f41a3-c54c-4b4e-9c3c-2b6a3c1f0e11",
            "name": "Jean Dupont",
            "profession": "Développeur",
            "photo": "http://x/y.png",
            "company": "Acme",
            "github": "https://github.com/jdupont",
            "linkedin": "https://linkedin.com/in/jdupont",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_collections_default_to_empty() {
        let profile = sample();
        assert!(profile.skills.is_empty());
        assert!(profile.projects.is_empty());
        assert!(profile.education.is_empty());
    }

    #[test]
    fn test_absent_optionals_are_not_serialized() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("email").is_none());
        assert!(value.get("years_of_experience").is_none());
        assert_eq!(value["skills"], serde_json::json!([]));
        assert_eq!(value["linkedin"], "https://linkedin.com/in/jdupont");
    }

    #[test]
    fn test_social_links_order() {
        let profile = sample();
        let labels: Vec<_> = profile.social_links().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["LinkedIn", "GitHub"]);
    }

    #[test]
    fn test_matches() {
        let profile = sample();
        assert!(profile.matches(""));
        assert!(profile.matches("dupont"));
        assert!(profile.matches("DÉVELOPPEUR"));
        assert!(profile.matches("acme"));
        assert!(!profile.matches("designer"));
    }
}
