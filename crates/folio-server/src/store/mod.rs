//! Profile and card persistence.
//!
//! Handlers only see the [`ProfileStore`] trait. `PgStore` is the production
//! backend; `MemoryStore` backs servers started without a database and the
//! test suite.

mod memory;
mod postgres;

use async_trait::async_trait;
use folio_shared::{
    api::{CardInput, ValidProfile},
    Card, Profile,
};
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage for profiles and NFC cards.
///
/// Updates replace every writable field of the record. `update_*` returns
/// `None` and `delete_*` returns `false` when the id is unknown.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn list_profiles(&self) -> StoreResult<Vec<Profile>>;

    async fn get_profile(&self, id: Uuid) -> StoreResult<Option<Profile>>;

    /// Assigns a fresh id and both timestamps.
    async fn create_profile(&self, profile: ValidProfile) -> StoreResult<Profile>;

    /// Refreshes `updated_at`; `created_at` is kept.
    async fn update_profile(&self, id: Uuid, profile: ValidProfile)
        -> StoreResult<Option<Profile>>;

    async fn delete_profile(&self, id: Uuid) -> StoreResult<bool>;

    async fn list_cards(&self) -> StoreResult<Vec<Card>>;

    async fn get_card(&self, id: Uuid) -> StoreResult<Option<Card>>;

    async fn create_card(&self, card: CardInput) -> StoreResult<Card>;

    async fn update_card(&self, id: Uuid, card: CardInput) -> StoreResult<Option<Card>>;

    async fn delete_card(&self, id: Uuid) -> StoreResult<bool>;
}
