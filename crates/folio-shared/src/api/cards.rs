use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/cards` and `PUT /api/cards/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInput {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub nfc_id: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_input_defaults() {
        let input: CardInput = serde_json::from_str(r#"{"nfc_id":"04:A2:1B:7C"}"#).unwrap();
        assert_eq!(input.user_id, None);
        assert!(input.is_active);
    }

    #[test]
    fn test_card_input_requires_nfc_id() {
        assert!(serde_json::from_str::<CardInput>(r#"{"is_active":false}"#).is_err());
    }
}
