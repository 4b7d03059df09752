use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Education, Position, Profile, Project};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name, profession, and photo are required")]
    MissingRequiredFields,
}

/// Body of `POST /api/users` and `PUT /api/users/:id`.
///
/// Updates replace the whole record, so every field left out here is
/// cleared on the stored profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
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
}

impl ProfileInput {
    /// Names of the required fields that are missing or blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("profession", &self.profession),
            ("photo", &self.photo),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value.as_deref()))
        .map(|(field, _)| field)
        .collect()
    }

    /// Normalize the input and check the required fields.
    pub fn validate(self) -> Result<ValidProfile, ValidationError> {
        let input = self.normalized();
        if !input.missing_required().is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }
        Ok(ValidProfile(input))
    }

    /// Trim strings, turn blank optionals into `None`, drop blank and
    /// duplicate set entries and drop records without a title or degree.
    pub fn normalized(self) -> Self {
        Self {
            name: clean(self.name),
            profession: clean(self.profession),
            photo: clean(self.photo),
            company: clean(self.company),
            address: clean(self.address),
            email: clean(self.email),
            phone: clean(self.phone),
            website: clean(self.website),
            bio: clean(self.bio),
            cover_image: clean(self.cover_image),
            cv_url: clean(self.cv_url),
            years_of_experience: self.years_of_experience,
            linkedin: clean(self.linkedin),
            github: clean(self.github),
            twitter: clean(self.twitter),
            instagram: clean(self.instagram),
            skills: clean_set(self.skills),
            specializations: clean_set(self.specializations),
            languages: clean_set(self.languages),
            certifications: clean_set(self.certifications),
            awards: clean_set(self.awards),
            projects: clean_projects(self.projects),
            personal_projects: clean_projects(self.personal_projects),
            previous_positions: self
                .previous_positions
                .into_iter()
                .filter(|p| !p.title.trim().is_empty())
                .map(|p| Position {
                    title: p.title.trim().to_string(),
                    ..p
                })
                .collect(),
            education: self
                .education
                .into_iter()
                .filter(|e| !e.degree.trim().is_empty())
                .map(|e| Education {
                    degree: e.degree.trim().to_string(),
                    ..e
                })
                .collect(),
        }
    }
}

impl From<&Profile> for ProfileInput {
    fn from(profile: &Profile) -> Self {
        Self {
            name: Some(profile.name.clone()),
            profession: Some(profile.profession.clone()),
            photo: Some(profile.photo.clone()),
            company: profile.company.clone(),
            address: profile.address.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            website: profile.website.clone(),
            bio: profile.bio.clone(),
            cover_image: profile.cover_image.clone(),
            cv_url: profile.cv_url.clone(),
            years_of_experience: profile.years_of_experience,
            linkedin: profile.linkedin.clone(),
            github: profile.github.clone(),
            twitter: profile.twitter.clone(),
            instagram: profile.instagram.clone(),
            skills: profile.skills.clone(),
            specializations: profile.specializations.clone(),
            languages: profile.languages.clone(),
            certifications: profile.certifications.clone(),
            awards: profile.awards.clone(),
            projects: profile.projects.clone(),
            personal_projects: profile.personal_projects.clone(),
            previous_positions: profile.previous_positions.clone(),
            education: profile.education.clone(),
        }
    }
}

/// Normalized input whose name, profession and photo are all present.
/// Only `ProfileInput::validate` builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProfile(ProfileInput);

impl ValidProfile {
    pub fn name(&self) -> &str {
        self.0.name.as_deref().unwrap_or_default()
    }

    pub fn profession(&self) -> &str {
        self.0.profession.as_deref().unwrap_or_default()
    }

    pub fn photo(&self) -> &str {
        self.0.photo.as_deref().unwrap_or_default()
    }

    pub fn fields(&self) -> &ProfileInput {
        &self.0
    }

    /// Build the stored record for this input
    pub fn into_profile(
        self,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Profile {
        let input = self.0;
        Profile {
            id,
            name: input.name.unwrap_or_default(),
            profession: input.profession.unwrap_or_default(),
            photo: input.photo.unwrap_or_default(),
            company: input.company,
            address: input.address,
            email: input.email,
            phone: input.phone,
            website: input.website,
            bio: input.bio,
            cover_image: input.cover_image,
            cv_url: input.cv_url,
            years_of_experience: input.years_of_experience,
            linkedin: input.linkedin,
            github: input.github,
            twitter: input.twitter,
            instagram: input.instagram,
            skills: input.skills,
            specializations: input.specializations,
            languages: input.languages,
            certifications: input.certifications,
            awards: input.awards,
            projects: input.projects,
            personal_projects: input.personal_projects,
            previous_positions: input.previous_positions,
            education: input.education,
            created_at,
            updated_at,
        }
    }
}

/// Response of `POST /api/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: Uuid,
    #[serde(default)]
    pub message: String,
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_set(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

fn clean_projects(projects: Vec<Project>) -> Vec<Project> {
    projects
        .into_iter()
        .filter(|p| !p.title.trim().is_empty())
        .map(|p| Project {
            title: p.title.trim().to_string(),
            link: clean(p.link),
            description: p.description,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> ProfileInput {
        ProfileInput {
            name: Some("Jean Dupont".to_string()),
            profession: Some("Développeur".to_string()),
            photo: Some("http://x/y.png".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_required_fields() {
        let valid = required().validate().unwrap();
        assert_eq!(valid.name(), "Jean Dupont");
        assert_eq!(valid.profession(), "Développeur");
        assert_eq!(valid.photo(), "http://x/y.png");
    }

    #[test]
    fn test_validate_rejects_each_missing_field() {
        let cases = [
            ProfileInput { name: None, ..required() },
            ProfileInput { profession: Some("   ".to_string()), ..required() },
            ProfileInput { photo: Some(String::new()), ..required() },
        ];
        for input in cases {
            assert_eq!(input.validate(), Err(ValidationError::MissingRequiredFields));
        }
    }

    #[test]
    fn test_missing_required_lists_fields() {
        let input = ProfileInput {
            name: Some("Ana".to_string()),
            ..Default::default()
        };
        assert_eq!(input.missing_required(), vec!["profession", "photo"]);
    }

    #[test]
    fn test_normalization() {
        let input = ProfileInput {
            name: Some("  Jean Dupont ".to_string()),
            company: Some("  ".to_string()),
            email: Some(" jean@example.com ".to_string()),
            skills: vec![
                "Rust".to_string(),
                " ".to_string(),
                "SQL ".to_string(),
                "Rust".to_string(),
            ],
            projects: vec![
                Project {
                    title: "".to_string(),
                    description: "dropped".to_string(),
                    link: None,
                },
                Project {
                    title: " Folio ".to_string(),
                    description: "cards".to_string(),
                    link: Some("".to_string()),
                },
            ],
            education: vec![Education {
                degree: " ".to_string(),
                institution: "Nowhere".to_string(),
                year: "2020".to_string(),
            }],
            ..required()
        }
        .normalized();

        assert_eq!(input.name.as_deref(), Some("Jean Dupont"));
        assert_eq!(input.company, None);
        assert_eq!(input.email.as_deref(), Some("jean@example.com"));
        assert_eq!(input.skills, vec!["Rust", "SQL"]);
        assert_eq!(input.projects.len(), 1);
        assert_eq!(input.projects[0].title, "Folio");
        assert_eq!(input.projects[0].link, None);
        assert!(input.education.is_empty());
    }

    #[test]
    fn test_profile_round_trips_through_input() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let profile = ProfileInput {
            bio: Some("Builds things".to_string()),
            years_of_experience: Some(7),
            ..required()
        }
        .validate()
        .unwrap()
        .into_profile(id, now, now);

        let back = ProfileInput::from(&profile).validate().unwrap();
        assert_eq!(back.into_profile(id, now, now), profile);
    }

    #[test]
    fn test_input_accepts_minimal_json() {
        let input: ProfileInput = serde_json::from_str(
            r#"{"name":"Jean Dupont","profession":"Développeur","photo":"http://x/y.png"}"#,
        )
        .unwrap();
        assert!(input.skills.is_empty());
        assert!(input.validate().is_ok());
    }
}
