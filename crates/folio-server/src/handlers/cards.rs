use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use folio_shared::{api::CardInput, Card};

use super::parse_id;
use crate::error::AppError;
use crate::routes::AppState;

const ENTITY: &str = "Card";

/// GET /api/cards
pub async fn list_cards(State(state): State<AppState>) -> Result<Json<Vec<Card>>, AppError> {
    let cards = state.store.list_cards().await?;
    Ok(Json(cards))
}

/// GET /api/cards/:id
pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Card>, AppError> {
    let id = parse_id(&id, ENTITY)?;

    let card = state
        .store
        .get_card(id)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;

    Ok(Json(card))
}

/// POST /api/cards
pub async fn create_card(
    State(state): State<AppState>,
    Json(req): Json<CardInput>,
) -> Result<(StatusCode, Json<Card>), AppError> {
    let card = state.store.create_card(req).await?;

    tracing::info!(card_id = %card.id, nfc_id = %card.nfc_id, "Card created");

    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /api/cards/:id
pub async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CardInput>,
) -> Result<Json<Card>, AppError> {
    let id = parse_id(&id, ENTITY)?;

    let card = state
        .store
        .update_card(id, req)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;

    Ok(Json(card))
}

/// DELETE /api/cards/:id
pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, ENTITY)?;

    if !state.store.delete_card(id).await? {
        return Err(AppError::NotFound(ENTITY));
    }

    tracing::info!(card_id = %id, "Card deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::super::test_support::{send, test_app};

    #[tokio::test]
    async fn test_card_lifecycle() {
        let app = test_app();

        let (status, card) = send(
            &app,
            "POST",
            "/api/cards",
            Some(json!({"nfc_id": "04:A2:1B:7C"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(card["nfc_id"], "04:A2:1B:7C");
        assert_eq!(card["is_active"], true);
        assert!(card["user_id"].is_null());
        let uri = format!("/api/cards/{}", card["id"].as_str().unwrap());

        let (status, updated) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({"nfc_id": "04:A2:1B:7C", "is_active": false})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["is_active"], false);
        assert_eq!(updated["created_at"], card["created_at"]);

        let (_, list) = send(&app, "GET", "/api/cards", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Card not found");
    }

    #[tokio::test]
    async fn test_card_keeps_link_after_profile_deleted() {
        let app = test_app();

        let (_, profile) = send(
            &app,
            "POST",
            "/api/users",
            Some(json!({"name": "Ana", "profession": "Designer", "photo": "p.png"})),
        )
        .await;
        let profile_id = profile["id"].as_str().unwrap().to_string();

        let (_, card) = send(
            &app,
            "POST",
            "/api/cards",
            Some(json!({"user_id": profile_id, "nfc_id": "tag-1"})),
        )
        .await;

        let (status, _) = send(&app, "DELETE", &format!("/api/users/{}", profile_id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let uri = format!("/api/cards/{}", card["id"].as_str().unwrap());
        let (status, card) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card["user_id"], profile_id.as_str());
    }

    #[tokio::test]
    async fn test_unknown_card_is_not_found() {
        let app = test_app();
        let uri = format!("/api/cards/{}", uuid::Uuid::new_v4());

        let (status, _) = send(&app, "PUT", &uri, Some(json!({"nfc_id": "x"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/api/cards/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
