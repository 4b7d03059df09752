//! Client-side copy of the profile list.
//!
//! The cache is owned by the app and mirrors what the server returned, so
//! views never query the API directly. Writes go to the server first and the
//! local list only changes once the server has accepted them.

use std::time::Duration;

use folio_shared::{
    api::{ProfileInput, ValidationError},
    Profile,
};
use uuid::Uuid;

use crate::api::{ApiError, ProfileApi};

/// How the initial list load retries transient failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

/// Result of [`ProfileCache::load`]; anything but `Loaded` leaves the list empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    EndpointMissing,
    InvalidData,
    Unavailable,
}

impl LoadOutcome {
    /// Message to show the user when the load fell back
    pub fn notice(self) -> Option<&'static str> {
        match self {
            LoadOutcome::Loaded => None,
            LoadOutcome::EndpointMissing => {
                Some("Profile endpoint not found. Check the server configuration.")
            }
            LoadOutcome::InvalidData => Some("The server returned invalid profile data."),
            LoadOutcome::Unavailable => Some("Could not load profiles. Please try again later."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Update,
    Remove,
}

impl Action {
    fn describe(self) -> &'static str {
        match self {
            Action::Add => "add profile",
            Action::Update => "update profile",
            Action::Remove => "delete profile",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl CacheError {
    fn api(action: Action, source: ApiError) -> Self {
        Self::Api {
            message: user_message(action, &source),
            source,
        }
    }
}

/// Human-readable message for a failed write
pub fn user_message(action: Action, err: &ApiError) -> String {
    match err {
        ApiError::NotFound if action == Action::Add => {
            "Profile endpoint not found. Check the server configuration.".to_string()
        }
        ApiError::NotFound => "Profile endpoint not found or profile does not exist.".to_string(),
        ApiError::Validation(msg) if !msg.is_empty() => msg.clone(),
        ApiError::Validation(_) => "Invalid data, please check the fields.".to_string(),
        other => format!("Failed to {}: {}", action.describe(), other),
    }
}

/// Shareable address of a profile's public portfolio page
pub fn portfolio_link(public_url: &str, id: Uuid) -> String {
    format!("{}/portfolio/{}", public_url.trim_end_matches('/'), id)
}

pub struct ProfileCache<A> {
    api: A,
    retry: RetryPolicy,
    profiles: Vec<Profile>,
}

impl<A: ProfileApi> ProfileCache<A> {
    pub fn new(api: A) -> Self {
        Self::with_retry(api, RetryPolicy::default())
    }

    pub fn with_retry(api: A, retry: RetryPolicy) -> Self {
        Self {
            api,
            retry,
            profiles: Vec::new(),
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Replace the list with the server's.
    ///
    /// A missing endpoint or a malformed body is not retried.
    pub async fn load(&mut self) -> LoadOutcome {
        let attempts = self.retry.attempts.max(1);

        for attempt in 1..=attempts {
            match self.api.list_profiles().await {
                Ok(profiles) => {
                    tracing::debug!(count = profiles.len(), "Profiles loaded");
                    self.profiles = profiles;
                    return LoadOutcome::Loaded;
                }
                Err(ApiError::NotFound) => {
                    tracing::error!("Profile endpoint not found");
                    self.profiles.clear();
                    return LoadOutcome::EndpointMissing;
                }
                Err(ApiError::InvalidResponse(detail)) => {
                    tracing::error!(%detail, "Profile list is not valid");
                    self.profiles.clear();
                    return LoadOutcome::InvalidData;
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Failed to load profiles");
                    if attempt < attempts {
                        tokio::time::sleep(self.retry.delay).await;
                    }
                }
            }
        }

        self.profiles.clear();
        LoadOutcome::Unavailable
    }

    /// Create a profile and append the stored record; returns its id
    pub async fn add(&mut self, input: ProfileInput) -> Result<Uuid, CacheError> {
        let input = input.validate()?;

        let created = self
            .api
            .create_profile(input.fields())
            .await
            .map_err(|e| CacheError::api(Action::Add, e))?;

        let profile = self
            .api
            .get_profile(created.id)
            .await
            .map_err(|e| CacheError::api(Action::Add, e))?;

        tracing::info!(profile_id = %profile.id, "Profile added");
        self.profiles.push(profile);
        Ok(created.id)
    }

    pub async fn update(&mut self, id: Uuid, input: ProfileInput) -> Result<(), CacheError> {
        let updated = self
            .api
            .update_profile(id, &input)
            .await
            .map_err(|e| CacheError::api(Action::Update, e))?;

        if let Some(slot) = self.profiles.iter_mut().find(|p| p.id == id) {
            *slot = updated;
        }
        Ok(())
    }

    pub async fn remove(&mut self, id: Uuid) -> Result<(), CacheError> {
        self.api
            .delete_profile(id)
            .await
            .map_err(|e| CacheError::api(Action::Remove, e))?;

        self.profiles.retain(|p| p.id != id);
        Ok(())
    }

    /// Cached lookup; never queries the server
    pub fn get(&self, id: Uuid) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn filter(&self, term: &str) -> Vec<&Profile> {
        self.profiles.iter().filter(|p| p.matches(term)).collect()
    }
}
