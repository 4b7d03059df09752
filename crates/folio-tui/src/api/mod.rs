mod client;

use async_trait::async_trait;
use folio_shared::{
    api::{CreatedResponse, ProfileInput},
    Profile,
};
use uuid::Uuid;

pub use client::{ApiClient, ApiError};

/// Profile endpoints used by the console
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError>;

    async fn get_profile(&self, id: Uuid) -> Result<Profile, ApiError>;

    async fn create_profile(&self, input: &ProfileInput) -> Result<CreatedResponse, ApiError>;

    async fn update_profile(&self, id: Uuid, input: &ProfileInput) -> Result<Profile, ApiError>;

    async fn delete_profile(&self, id: Uuid) -> Result<(), ApiError>;
}
