use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use folio_shared::{
    api::{CardInput, ValidProfile},
    Card, Profile,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProfileStore, StoreResult};

/// Store kept in process memory; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<Uuid, Profile>>,
    cards: RwLock<HashMap<Uuid, Card>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn list_profiles(&self) -> StoreResult<Vec<Profile>> {
        let profiles = self.profiles.read().await;
        let mut result: Vec<Profile> = profiles.values().cloned().collect();
        result.sort_by_key(|p| p.created_at);
        Ok(result)
    }

    async fn get_profile(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&id).cloned())
    }

    async fn create_profile(&self, profile: ValidProfile) -> StoreResult<Profile> {
        let now = Utc::now();
        let profile = profile.into_profile(Uuid::new_v4(), now, now);

        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        profile: ValidProfile,
    ) -> StoreResult<Option<Profile>> {
        let mut profiles = self.profiles.write().await;
        let Some(existing) = profiles.get_mut(&id) else {
            return Ok(None);
        };

        *existing = profile.into_profile(id, existing.created_at, Utc::now());
        Ok(Some(existing.clone()))
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<bool> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.remove(&id).is_some())
    }

    async fn list_cards(&self) -> StoreResult<Vec<Card>> {
        let cards = self.cards.read().await;
        let mut result: Vec<Card> = cards.values().cloned().collect();
        result.sort_by_key(|c| c.created_at);
        Ok(result)
    }

    async fn get_card(&self, id: Uuid) -> StoreResult<Option<Card>> {
        let cards = self.cards.read().await;
        Ok(cards.get(&id).cloned())
    }

    async fn create_card(&self, card: CardInput) -> StoreResult<Card> {
        let now = Utc::now();
        let card = Card {
            id: Uuid::new_v4(),
            user_id: card.user_id,
            nfc_id: card.nfc_id,
            is_active: card.is_active,
            created_at: now,
            updated_at: now,
        };

        let mut cards = self.cards.write().await;
        cards.insert(card.id, card.clone());
        Ok(card)
    }

    async fn update_card(&self, id: Uuid, card: CardInput) -> StoreResult<Option<Card>> {
        let mut cards = self.cards.write().await;
        let Some(existing) = cards.get_mut(&id) else {
            return Ok(None);
        };

        existing.user_id = card.user_id;
        existing.nfc_id = card.nfc_id;
        existing.is_active = card.is_active;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete_card(&self, id: Uuid) -> StoreResult<bool> {
        let mut cards = self.cards.write().await;
        Ok(cards.remove(&id).is_some())
    }
}
